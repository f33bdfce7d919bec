// Golden values for scoring, slider redistribution and the store contract.
//
// These pin exact arithmetic (operation order, rounding mode). A change here
// means recommendations shown to users change.

use std::cell::Cell;
use std::rc::Rc;

use archdecide_engine::answers::{AnswersPatch, BusinessGoal, BusinessWeights, WizardAnswers};
use archdecide_engine::flow::{Step, StepForm};
use archdecide_engine::rebalance::rebalance;
use archdecide_engine::recommend::{recommend, score, Architecture, RecommendationResult};
use archdecide_engine::store::WizardState;
use archdecide_engine::TextField;

fn answers(s: u8, p: u8, e: u8, t: u8, c: u8, f: u8) -> WizardAnswers {
    WizardAnswers {
        scalability: s,
        performance: p,
        expertise_level: e,
        time_to_market: t,
        cost: c,
        flexibility: f,
        ..WizardAnswers::default()
    }
}

fn result(recommended: Architecture, confidence: u8) -> RecommendationResult {
    RecommendationResult { recommended, confidence }
}

// -------------------------------------------------------------------------
// Scoring
// -------------------------------------------------------------------------

#[test]
fn golden_recommendations() {
    use Architecture::{Microservices as M, Monolith as Mono};

    let cases = [
        // (s, p, e, t, c, f) => expected
        ((100, 100, 100, 100, 100, 100), result(M, 100)),
        ((0, 0, 0, 0, 0, 0), result(Mono, 30)),
        ((50, 50, 50, 50, 50, 50), result(Mono, 50)),
        ((50, 50, 50, 33, 33, 34), result(M, 45)),
        ((90, 80, 85, 10, 20, 70), result(M, 81)),
        ((10, 30, 20, 60, 30, 10), result(Mono, 59)),
        ((0, 0, 0, 100, 0, 0), result(Mono, 70)),
        ((0, 0, 0, 0, 0, 100), result(Mono, 30)),
    ];

    for ((s, p, e, t, c, f), expected) in cases {
        let got = recommend(&answers(s, p, e, t, c, f));
        assert_eq!(got, expected, "inputs ({s},{p},{e},{t},{c},{f})");
    }
}

#[test]
fn fifty_everywhere_is_an_exact_floating_tie() {
    let s = score(&answers(50, 50, 50, 50, 50, 50));
    assert_eq!(s.microservices.to_bits(), 0.5f64.to_bits());
    assert_eq!(s.monolith.to_bits(), 0.5f64.to_bits());
}

#[test]
fn zero_everywhere_scores_inverse_terms_only() {
    let s = score(&answers(0, 0, 0, 0, 0, 0));
    assert_eq!(s.microservices, 0.0);
    assert!((s.monolith - 0.3).abs() < 1e-12);
}

// -------------------------------------------------------------------------
// Rebalance
// -------------------------------------------------------------------------

#[test]
fn golden_rebalance_from_defaults() {
    let start = BusinessWeights::default();
    let cases = [
        (BusinessGoal::TimeToMarket, 50, BusinessWeights::new(50, 25, 25)),
        (BusinessGoal::TimeToMarket, 0, BusinessWeights::new(0, 49, 51)),
        (BusinessGoal::TimeToMarket, 100, BusinessWeights::new(100, 0, 0)),
        (BusinessGoal::Cost, 50, BusinessWeights::new(25, 50, 25)),
        (BusinessGoal::Cost, 40, BusinessWeights::new(30, 40, 30)),
        (BusinessGoal::Flexibility, 10, BusinessWeights::new(45, 45, 10)),
        (BusinessGoal::Flexibility, 60, BusinessWeights::new(20, 20, 60)),
    ];
    for (goal, value, expected) in cases {
        assert_eq!(rebalance(start, goal, value).unwrap(), expected, "{goal:?} -> {value}");
    }
}

// -------------------------------------------------------------------------
// Store contract
// -------------------------------------------------------------------------

#[test]
fn reset_then_get_returns_documented_defaults() {
    let state = WizardState::new();
    state.set_data(
        AnswersPatch::new()
            .with_text(TextField::ProjectName, "Ledger")
            .with_scalability(1)
            .with_flexibility(99),
    );
    state.reset();

    let d = state.get_data();
    assert_eq!(d.project_name, "");
    assert_eq!(d.team_size, "");
    assert_eq!(d.user_load, "");
    assert_eq!(d.critical_features, "");
    assert_eq!(d.scalability, 50);
    assert_eq!(d.performance, 50);
    assert_eq!(d.expertise_level, 50);
    assert_eq!(d.time_to_market, 33);
    assert_eq!(d.cost, 33);
    assert_eq!(d.flexibility, 34);
}

#[test]
fn subscribe_set_unsubscribe() {
    let state = WizardState::new();
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    let sub = state.subscribe(move || c.set(c.get() + 1));

    state.set_data(AnswersPatch::new().with_scalability(10));
    assert_eq!(calls.get(), 1);
    assert_eq!(state.get_data(), answers(10, 50, 50, 33, 33, 34));

    sub.unsubscribe();
    state.set_data(AnswersPatch::new().with_scalability(20));
    assert_eq!(calls.get(), 1);
}

// -------------------------------------------------------------------------
// Full wizard pass
// -------------------------------------------------------------------------

#[test]
fn full_wizard_pass_reaches_results() {
    let state = WizardState::new();

    let mut overview = StepForm::mount(Step::ProjectOverview, &state);
    overview.set_text(TextField::ProjectName, "Storefront");
    overview.set_text(TextField::TeamSize, "25 engineers");
    overview.set_text(TextField::UserLoad, "1M monthly users");
    overview.set_text(TextField::CriticalFeatures, "checkout, search, recommendations");
    let step = overview.advance(&state).unwrap();

    let mut technical = StepForm::mount(step, &state);
    technical
        .set_requirement(archdecide_engine::Requirement::Scalability, 90)
        .unwrap();
    technical
        .set_requirement(archdecide_engine::Requirement::ExpertiseLevel, 80)
        .unwrap();
    let step = technical.advance(&state).unwrap();

    let mut business = StepForm::mount(step, &state);
    business.drag_goal(BusinessGoal::Flexibility, 60).unwrap();
    let step = business.advance(&state).unwrap();
    assert_eq!(step, Step::Results);

    let data = state.get_data();
    assert_eq!(data.project_name, "Storefront");
    assert_eq!((data.time_to_market, data.cost, data.flexibility), (20, 20, 60));

    // micro = (27 + 10 + 16 + 18) / 100 = 0.71
    assert_eq!(recommend(&data), result(Architecture::Microservices, 71));
}
