// Property-based tests for scoring and slider redistribution.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;

use archdecide_engine::answers::{BusinessGoal, BusinessWeights, WizardAnswers};
use archdecide_engine::rebalance::{partners, rebalance};
use archdecide_engine::recommend::{recommend, score, Architecture};
use archdecide_engine::store::WizardState;
use archdecide_engine::AnswersPatch;

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_percent() -> impl Strategy<Value = u8> {
    prop_oneof![
        4 => 0u8..=100,
        1 => Just(0u8),
        1 => Just(100u8),
        1 => Just(50u8),
    ]
}

fn arb_answers() -> impl Strategy<Value = WizardAnswers> {
    (
        arb_percent(),
        arb_percent(),
        arb_percent(),
        arb_percent(),
        arb_percent(),
        arb_percent(),
    )
        .prop_map(|(s, p, e, t, c, f)| WizardAnswers {
            scalability: s,
            performance: p,
            expertise_level: e,
            time_to_market: t,
            cost: c,
            flexibility: f,
            ..WizardAnswers::default()
        })
}

/// Three goal weights that already total 100.
fn arb_balanced() -> impl Strategy<Value = BusinessWeights> {
    (0u8..=100)
        .prop_flat_map(|t| (Just(t), 0u8..=(100 - t)))
        .prop_map(|(t, c)| BusinessWeights::new(t, c, 100 - t - c))
}

fn arb_goal() -> impl Strategy<Value = BusinessGoal> {
    prop_oneof![
        Just(BusinessGoal::TimeToMarket),
        Just(BusinessGoal::Cost),
        Just(BusinessGoal::Flexibility),
    ]
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn recommend_is_total_and_bounded(answers in arb_answers()) {
        let r = recommend(&answers);
        prop_assert!(r.confidence <= 100);
        let s = score(&answers);
        prop_assert!((0.0..=1.0).contains(&s.microservices));
        prop_assert!((0.0..=1.0).contains(&s.monolith));
    }

    #[test]
    fn recommend_is_pure(answers in arb_answers()) {
        prop_assert_eq!(recommend(&answers), recommend(&answers.clone()));
    }

    #[test]
    fn winner_matches_strict_comparison(answers in arb_answers()) {
        let s = score(&answers);
        let r = recommend(&answers);
        let expected = if s.microservices > s.monolith {
            Architecture::Microservices
        } else {
            Architecture::Monolith
        };
        prop_assert_eq!(r.recommended, expected);
        let winner = s.microservices.max(s.monolith);
        prop_assert_eq!(r.confidence, (winner * 100.0).round() as u8);
    }

    #[test]
    fn text_answers_never_affect_score(answers in arb_answers(), name in "[a-zA-Z ]{0,20}") {
        let mut named = answers.clone();
        named.project_name = name;
        named.critical_features = "everything".into();
        prop_assert_eq!(recommend(&answers), recommend(&named));
    }
}

// ---------------------------------------------------------------------------
// Rebalance
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn rebalance_always_totals_hundred(
        start in (0u8..=100, 0u8..=100, 0u8..=100),
        goal in arb_goal(),
        value in 0u8..=100,
    ) {
        let weights = BusinessWeights::new(start.0, start.1, start.2);
        let next = rebalance(weights, goal, value).unwrap();
        prop_assert_eq!(next.total(), 100);
        prop_assert_eq!(next.get(goal), value);
    }

    #[test]
    fn rebalance_rounded_partner_follows_formula(
        weights in arb_balanced(),
        goal in arb_goal(),
        value in 0u8..=100,
    ) {
        let (rounded_goal, absorbing_goal) = partners(goal);
        let next = rebalance(weights, goal, value).unwrap();

        let remaining = f64::from(100 - value);
        let other_sum = f64::from(weights.get(rounded_goal)) + f64::from(weights.get(absorbing_goal));
        let scale = if other_sum > 0.0 { remaining / other_sum } else { 0.5 };
        let expected = (f64::from(weights.get(rounded_goal)) * scale).round() as u8;

        prop_assert_eq!(next.get(rounded_goal), expected);
        prop_assert_eq!(next.get(absorbing_goal), 100 - value - expected);
    }

    #[test]
    fn rebalance_to_current_value_keeps_balanced_weights(weights in arb_balanced(), goal in arb_goal()) {
        let next = rebalance(weights, goal, weights.get(goal)).unwrap();
        prop_assert_eq!(next, weights);
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn set_data_changes_only_patched_fields(scalability in arb_percent(), cost in arb_percent()) {
        let state = WizardState::new();
        state.set_data(AnswersPatch::new().with_scalability(scalability).with_cost(cost));

        let expected = WizardAnswers {
            scalability,
            cost,
            ..WizardAnswers::default()
        };
        prop_assert_eq!(state.get_data(), expected);
    }
}
