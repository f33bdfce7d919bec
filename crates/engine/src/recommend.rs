//! Architecture recommendation.
//!
//! Two weighted averages over the 0..=100 answers, each normalised to 0..=1:
//!
//! ```text
//! microservices = (scalability*0.30 + performance*0.20 + expertise*0.20 + flexibility*0.30) / 100
//! monolith      = (timeToMarket*0.40 + cost*0.30 + (100-scalability)*0.20 + (100-expertise)*0.10) / 100
//! ```
//!
//! Microservices wins only on a strict `>`; ties go to the monolith.
//! Confidence is the winning score as a percentage, rounded half away from
//! zero. Scores are never negative, so this agrees with a round-half-up
//! implementation everywhere on the input domain.
//!
//! Operations are evaluated in the order above in `f64`; changing the order
//! changes results by one ulp and can move confidence across a .5 boundary.

use serde::{Deserialize, Serialize};

use crate::answers::WizardAnswers;
use crate::error::EngineError;

/// Tolerance when checking that a side's weights sum to 1.
const WEIGHT_SUM_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Microservices,
    Monolith,
}

impl Architecture {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Microservices => "Microservices",
            Self::Monolith => "Monolith",
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Microservices => write!(f, "microservices"),
            Self::Monolith => write!(f, "monolith"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommended: Architecture,
    /// 0..=100
    pub confidence: u8,
}

/// Raw normalised scores, both in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub microservices: f64,
    pub monolith: f64,
}

impl Scores {
    pub fn recommended(&self) -> Architecture {
        if self.microservices > self.monolith {
            Architecture::Microservices
        } else {
            Architecture::Monolith
        }
    }

    pub fn confidence(&self) -> u8 {
        let pct = (self.microservices.max(self.monolith) * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    pub fn result(&self) -> RecommendationResult {
        RecommendationResult {
            recommended: self.recommended(),
            confidence: self.confidence(),
        }
    }
}

// ============================================================================
// Weights
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MicroservicesWeights {
    pub scalability: f64,
    pub performance: f64,
    pub expertise_level: f64,
    pub flexibility: f64,
}

impl Default for MicroservicesWeights {
    fn default() -> Self {
        Self {
            scalability: 0.3,
            performance: 0.2,
            expertise_level: 0.2,
            flexibility: 0.3,
        }
    }
}

/// Monolith weights. `inverse_*` apply to `100 - value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonolithWeights {
    pub time_to_market: f64,
    pub cost: f64,
    pub inverse_scalability: f64,
    pub inverse_expertise_level: f64,
}

impl Default for MonolithWeights {
    fn default() -> Self {
        Self {
            time_to_market: 0.4,
            cost: 0.3,
            inverse_scalability: 0.2,
            inverse_expertise_level: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringWeights {
    pub microservices: MicroservicesWeights,
    pub monolith: MonolithWeights,
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), EngineError> {
        let m = &self.microservices;
        let o = &self.monolith;
        let sides = [
            ("microservices", [m.scalability, m.performance, m.expertise_level, m.flexibility]),
            (
                "monolith",
                [o.time_to_market, o.cost, o.inverse_scalability, o.inverse_expertise_level],
            ),
        ];

        for (side, weights) in sides {
            if let Some(w) = weights.iter().find(|w| !(0.0..=1.0).contains(*w)) {
                return Err(EngineError::InvalidWeights(format!(
                    "{side} weight {w} is outside 0..=1"
                )));
            }
            let sum: f64 = weights.iter().sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
                return Err(EngineError::InvalidWeights(format!(
                    "{side} weights sum to {sum}, expected 1"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Scoring
// ============================================================================

pub fn score_with(weights: &ScoringWeights, answers: &WizardAnswers) -> Scores {
    let scalability = f64::from(answers.scalability);
    let performance = f64::from(answers.performance);
    let expertise = f64::from(answers.expertise_level);
    let time_to_market = f64::from(answers.time_to_market);
    let cost = f64::from(answers.cost);
    let flexibility = f64::from(answers.flexibility);

    let m = &weights.microservices;
    let microservices = (scalability * m.scalability
        + performance * m.performance
        + expertise * m.expertise_level
        + flexibility * m.flexibility)
        / 100.0;

    let o = &weights.monolith;
    let monolith = (time_to_market * o.time_to_market
        + cost * o.cost
        + (100.0 - scalability) * o.inverse_scalability
        + (100.0 - expertise) * o.inverse_expertise_level)
        / 100.0;

    Scores { microservices, monolith }
}

pub fn score(answers: &WizardAnswers) -> Scores {
    score_with(&ScoringWeights::default(), answers)
}

pub fn recommend_with(weights: &ScoringWeights, answers: &WizardAnswers) -> RecommendationResult {
    let scores = score_with(weights, answers);
    let result = scores.result();
    log::debug!(
        "scored microservices={:.4} monolith={:.4} -> {} ({}%)",
        scores.microservices,
        scores.monolith,
        result.recommended,
        result.confidence
    );
    result
}

/// Recommend an architecture using the standard coefficients.
pub fn recommend(answers: &WizardAnswers) -> RecommendationResult {
    recommend_with(&ScoringWeights::default(), answers)
}
