//! Wizard steps and navigation gates.
//!
//! Each step edits a private working copy of the answers (`StepForm`) and
//! only writes it back to the shared `WizardState` when the user moves to
//! another step. Moving forward is gated:
//!
//! - Project Overview needs all four text answers to be non-empty;
//! - Business Goals needs the three goal weights to total exactly 100.
//!
//! A blocked gate writes nothing.

use std::fmt;

use serde::Serialize;

use crate::answers::{
    check_percent, BusinessGoal, Requirement, TextField, WizardAnswers, BUSINESS_TOTAL,
};
use crate::error::EngineError;
use crate::rebalance::rebalance;
use crate::store::WizardState;

// ============================================================================
// Steps
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    ProjectOverview,
    TechnicalRequirements,
    BusinessGoals,
    Results,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::ProjectOverview,
        Step::TechnicalRequirements,
        Step::BusinessGoals,
        Step::Results,
    ];

    pub fn index(&self) -> usize {
        match self {
            Self::ProjectOverview => 0,
            Self::TechnicalRequirements => 1,
            Self::BusinessGoals => 2,
            Self::Results => 3,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::ProjectOverview => "/",
            Self::TechnicalRequirements => "/technical",
            Self::BusinessGoals => "/business",
            Self::Results => "/results",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ProjectOverview => "Project Overview",
            Self::TechnicalRequirements => "Technical Requirements",
            Self::BusinessGoals => "Business Goals",
            Self::Results => "Results",
        }
    }

    pub fn from_path(path: &str) -> Option<Step> {
        Self::ALL.into_iter().find(|s| s.path() == path)
    }

    pub fn next(&self) -> Option<Step> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<Step> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepProgress {
    pub step: Step,
    pub status: StepStatus,
}

/// Status of every step relative to `current`.
pub fn progress(current: Step) -> Vec<StepProgress> {
    Step::ALL
        .into_iter()
        .map(|step| {
            let status = match step.index().cmp(&current.index()) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::Current,
                std::cmp::Ordering::Greater => StepStatus::Upcoming,
            };
            StepProgress { step, status }
        })
        .collect()
}

// ============================================================================
// Navigation errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Project Overview: these text answers are still empty.
    MissingFields(Vec<TextField>),
    /// Business Goals: weights total something other than 100.
    Unbalanced { total: u32 },
    /// Results is the last step.
    NoNextStep,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.label()).collect();
                write!(f, "missing required answers: {}", names.join(", "))
            }
            Self::Unbalanced { total } => {
                write!(f, "business goal weights total {total}%, expected {BUSINESS_TOTAL}%")
            }
            Self::NoNextStep => write!(f, "results is the final step"),
        }
    }
}

impl std::error::Error for NavigationError {}

// ============================================================================
// Step form
// ============================================================================

/// Working copy of the answers owned by the step currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct StepForm {
    step: Step,
    draft: WizardAnswers,
}

impl StepForm {
    /// Open `step` with a copy of the current answers.
    pub fn mount(step: Step, state: &WizardState) -> Self {
        Self {
            step,
            draft: state.get_data(),
        }
    }

    /// Discard local edits and re-read the store.
    pub fn refresh(&mut self, state: &WizardState) {
        self.draft = state.get_data();
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &WizardAnswers {
        &self.draft
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        self.draft.set_text(field, value);
    }

    pub fn set_requirement(&mut self, field: Requirement, value: u8) -> Result<(), EngineError> {
        let value = check_percent(field.key(), u32::from(value))?;
        match field {
            Requirement::Scalability => self.draft.scalability = value,
            Requirement::Performance => self.draft.performance = value,
            Requirement::ExpertiseLevel => self.draft.expertise_level = value,
        }
        Ok(())
    }

    /// Move one business-goal slider; the other two follow.
    pub fn drag_goal(&mut self, goal: BusinessGoal, value: u8) -> Result<(), EngineError> {
        let next = rebalance(self.draft.business_weights(), goal, value)?;
        self.draft.set_business_weights(next);
        Ok(())
    }

    /// Whether the forward gate of this step is open.
    pub fn check_gate(&self) -> Result<(), NavigationError> {
        match self.step {
            Step::ProjectOverview => {
                let missing = self.draft.missing_text_fields();
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(NavigationError::MissingFields(missing))
                }
            }
            Step::TechnicalRequirements => Ok(()),
            Step::BusinessGoals => {
                let weights = self.draft.business_weights();
                if weights.is_balanced() {
                    Ok(())
                } else {
                    Err(NavigationError::Unbalanced { total: weights.total() })
                }
            }
            Step::Results => Err(NavigationError::NoNextStep),
        }
    }

    /// Persist the draft and return the next step, if the gate allows it.
    pub fn advance(&self, state: &WizardState) -> Result<Step, NavigationError> {
        self.check_gate()?;
        let next = self.step.next().ok_or(NavigationError::NoNextStep)?;
        state.set_data(self.draft.clone());
        log::debug!("wizard advanced {} -> {}", self.step, next);
        Ok(next)
    }

    /// Return the previous step. Steps with editable drafts persist them
    /// first; Results goes back without writing.
    pub fn retreat(&self, state: &WizardState) -> Option<Step> {
        let previous = self.step.previous()?;
        if matches!(self.step, Step::TechnicalRequirements | Step::BusinessGoals) {
            state.set_data(self.draft.clone());
        }
        log::debug!("wizard retreated {} -> {}", self.step, previous);
        Some(previous)
    }
}

/// Clear every answer and go back to the first step.
pub fn restart(state: &WizardState) -> Step {
    state.reset();
    Step::ProjectOverview
}
