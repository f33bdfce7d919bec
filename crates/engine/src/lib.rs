//! Questionnaire state and architecture scoring for archdecide.
//!
//! Pure engine crate: no CLI, file or terminal dependencies.

pub mod answers;
pub mod error;
pub mod flow;
pub mod rebalance;
pub mod recommend;
pub mod store;

pub use answers::{AnswersPatch, BusinessGoal, BusinessWeights, Requirement, TextField, WizardAnswers};
pub use error::EngineError;
pub use flow::{NavigationError, Step, StepForm};
pub use rebalance::rebalance;
pub use recommend::{recommend, recommend_with, score, Architecture, RecommendationResult, Scores, ScoringWeights};
pub use store::{Subscription, WizardState};
