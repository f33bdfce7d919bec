//! Questionnaire answers and partial updates.
//!
//! `WizardAnswers` is the single record every wizard step reads and writes.
//! The wire names are camelCase so answer files use the same keys as the
//! questionnaire (`projectName`, `timeToMarket`, ...).
//!
//! Percentages are stored as `u8`. Nothing here enforces the 0..=100 range or
//! the business-goal total; callers that accept outside input go through
//! [`AnswersPatch::validate`] (or `WizardState::try_set_data`).

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Upper bound of every percentage field.
pub const MAX_PERCENT: u8 = 100;

/// Required total of the three business-goal weights.
pub const BUSINESS_TOTAL: u32 = 100;

// ============================================================================
// Answers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardAnswers {
    pub project_name: String,
    pub team_size: String,
    pub user_load: String,
    pub critical_features: String,
    pub scalability: u8,
    pub performance: u8,
    pub expertise_level: u8,
    pub time_to_market: u8,
    pub cost: u8,
    pub flexibility: u8,
}

impl Default for WizardAnswers {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            team_size: String::new(),
            user_load: String::new(),
            critical_features: String::new(),
            scalability: 50,
            performance: 50,
            expertise_level: 50,
            time_to_market: 33,
            cost: 33,
            flexibility: 34,
        }
    }
}

impl WizardAnswers {
    /// Shallow merge: every field present in `patch` replaces ours.
    pub fn apply(&mut self, patch: &AnswersPatch) {
        if let Some(v) = &patch.project_name {
            self.project_name = v.clone();
        }
        if let Some(v) = &patch.team_size {
            self.team_size = v.clone();
        }
        if let Some(v) = &patch.user_load {
            self.user_load = v.clone();
        }
        if let Some(v) = &patch.critical_features {
            self.critical_features = v.clone();
        }
        if let Some(v) = patch.scalability {
            self.scalability = v;
        }
        if let Some(v) = patch.performance {
            self.performance = v;
        }
        if let Some(v) = patch.expertise_level {
            self.expertise_level = v;
        }
        if let Some(v) = patch.time_to_market {
            self.time_to_market = v;
        }
        if let Some(v) = patch.cost {
            self.cost = v;
        }
        if let Some(v) = patch.flexibility {
            self.flexibility = v;
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::ProjectName => &self.project_name,
            TextField::TeamSize => &self.team_size,
            TextField::UserLoad => &self.user_load,
            TextField::CriticalFeatures => &self.critical_features,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TextField::ProjectName => self.project_name = value,
            TextField::TeamSize => self.team_size = value,
            TextField::UserLoad => self.user_load = value,
            TextField::CriticalFeatures => self.critical_features = value,
        }
    }

    pub fn requirement(&self, field: Requirement) -> u8 {
        match field {
            Requirement::Scalability => self.scalability,
            Requirement::Performance => self.performance,
            Requirement::ExpertiseLevel => self.expertise_level,
        }
    }

    pub fn business_weights(&self) -> BusinessWeights {
        BusinessWeights {
            time_to_market: self.time_to_market,
            cost: self.cost,
            flexibility: self.flexibility,
        }
    }

    pub fn set_business_weights(&mut self, weights: BusinessWeights) {
        self.time_to_market = weights.time_to_market;
        self.cost = weights.cost;
        self.flexibility = weights.flexibility;
    }

    /// Text fields that are still empty, in questionnaire order.
    ///
    /// Presence only: a value made of spaces counts as answered.
    pub fn missing_text_fields(&self) -> Vec<TextField> {
        TextField::ALL
            .into_iter()
            .filter(|f| self.text(*f).is_empty())
            .collect()
    }
}

// ============================================================================
// Partial update
// ============================================================================

/// A partial `WizardAnswers`; `None` fields are left untouched by a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AnswersPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_load: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_features: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalability: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_market: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flexibility: Option<u8>,
}

impl AnswersPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_scalability(mut self, v: u8) -> Self {
        self.scalability = Some(v);
        self
    }

    pub fn with_performance(mut self, v: u8) -> Self {
        self.performance = Some(v);
        self
    }

    pub fn with_expertise_level(mut self, v: u8) -> Self {
        self.expertise_level = Some(v);
        self
    }

    pub fn with_time_to_market(mut self, v: u8) -> Self {
        self.time_to_market = Some(v);
        self
    }

    pub fn with_cost(mut self, v: u8) -> Self {
        self.cost = Some(v);
        self
    }

    pub fn with_flexibility(mut self, v: u8) -> Self {
        self.flexibility = Some(v);
        self
    }

    pub fn with_text(mut self, field: TextField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            TextField::ProjectName => self.project_name = value,
            TextField::TeamSize => self.team_size = value,
            TextField::UserLoad => self.user_load = value,
            TextField::CriticalFeatures => self.critical_features = value,
        }
        self
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: AnswersPatch) -> Self {
        Self {
            project_name: other.project_name.or(self.project_name),
            team_size: other.team_size.or(self.team_size),
            user_load: other.user_load.or(self.user_load),
            critical_features: other.critical_features.or(self.critical_features),
            scalability: other.scalability.or(self.scalability),
            performance: other.performance.or(self.performance),
            expertise_level: other.expertise_level.or(self.expertise_level),
            time_to_market: other.time_to_market.or(self.time_to_market),
            cost: other.cost.or(self.cost),
            flexibility: other.flexibility.or(self.flexibility),
        }
    }

    /// Reject the patch if any percentage it sets is above 100.
    pub fn validate(&self) -> Result<(), EngineError> {
        let fields = [
            ("scalability", self.scalability),
            ("performance", self.performance),
            ("expertiseLevel", self.expertise_level),
            ("timeToMarket", self.time_to_market),
            ("cost", self.cost),
            ("flexibility", self.flexibility),
        ];
        for (field, value) in fields {
            if let Some(v) = value {
                check_percent(field, u32::from(v))?;
            }
        }
        Ok(())
    }
}

impl From<WizardAnswers> for AnswersPatch {
    fn from(a: WizardAnswers) -> Self {
        Self {
            project_name: Some(a.project_name),
            team_size: Some(a.team_size),
            user_load: Some(a.user_load),
            critical_features: Some(a.critical_features),
            scalability: Some(a.scalability),
            performance: Some(a.performance),
            expertise_level: Some(a.expertise_level),
            time_to_market: Some(a.time_to_market),
            cost: Some(a.cost),
            flexibility: Some(a.flexibility),
        }
    }
}

/// Range check shared by every input boundary.
pub fn check_percent(field: &'static str, value: u32) -> Result<u8, EngineError> {
    if value > u32::from(MAX_PERCENT) {
        return Err(EngineError::OutOfRange { field, value });
    }
    Ok(value as u8)
}

// ============================================================================
// Field identifiers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    ProjectName,
    TeamSize,
    UserLoad,
    CriticalFeatures,
}

impl TextField {
    pub const ALL: [TextField; 4] = [
        TextField::ProjectName,
        TextField::TeamSize,
        TextField::UserLoad,
        TextField::CriticalFeatures,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ProjectName => "Project Name",
            Self::TeamSize => "Team Size",
            Self::UserLoad => "Expected User Load",
            Self::CriticalFeatures => "Critical Features",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::ProjectName => "e.g., E-commerce Platform",
            Self::TeamSize => "e.g., 5-10 developers",
            Self::UserLoad => "e.g., 10,000 daily active users",
            Self::CriticalFeatures => "Describe the key features your application needs...",
        }
    }
}

impl std::fmt::Display for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Technical requirement sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    Scalability,
    Performance,
    ExpertiseLevel,
}

impl Requirement {
    pub const ALL: [Requirement; 3] = [
        Requirement::Scalability,
        Requirement::Performance,
        Requirement::ExpertiseLevel,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Scalability => "scalability",
            Self::Performance => "performance",
            Self::ExpertiseLevel => "expertiseLevel",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Scalability => "Scalability Needs",
            Self::Performance => "Performance Requirements",
            Self::ExpertiseLevel => "Team Expertise Level",
        }
    }

    /// Slider end captions (low, high).
    pub fn scale(&self) -> (&'static str, &'static str) {
        match self {
            Self::Scalability => ("Low", "High"),
            Self::Performance => ("Standard", "Critical"),
            Self::ExpertiseLevel => ("Junior", "Expert"),
        }
    }
}

// ============================================================================
// Business goals
// ============================================================================

/// The three linked business-goal sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BusinessGoal {
    TimeToMarket,
    Cost,
    Flexibility,
}

impl BusinessGoal {
    pub const ALL: [BusinessGoal; 3] = [
        BusinessGoal::TimeToMarket,
        BusinessGoal::Cost,
        BusinessGoal::Flexibility,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::TimeToMarket => "timeToMarket",
            Self::Cost => "cost",
            Self::Flexibility => "flexibility",
        }
    }

    /// Slider label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TimeToMarket => "Time to Market",
            Self::Cost => "Cost Efficiency",
            Self::Flexibility => "Flexibility & Adaptability",
        }
    }

    /// Label used when naming the top priority.
    pub fn priority_label(&self) -> &'static str {
        match self {
            Self::TimeToMarket => "Time to Market",
            Self::Cost => "Cost Efficiency",
            Self::Flexibility => "Flexibility",
        }
    }
}

impl std::fmt::Display for BusinessGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.priority_label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessWeights {
    pub time_to_market: u8,
    pub cost: u8,
    pub flexibility: u8,
}

impl Default for BusinessWeights {
    fn default() -> Self {
        WizardAnswers::default().business_weights()
    }
}

impl BusinessWeights {
    pub fn new(time_to_market: u8, cost: u8, flexibility: u8) -> Self {
        Self { time_to_market, cost, flexibility }
    }

    pub fn get(&self, goal: BusinessGoal) -> u8 {
        match goal {
            BusinessGoal::TimeToMarket => self.time_to_market,
            BusinessGoal::Cost => self.cost,
            BusinessGoal::Flexibility => self.flexibility,
        }
    }

    pub fn total(&self) -> u32 {
        u32::from(self.time_to_market) + u32::from(self.cost) + u32::from(self.flexibility)
    }

    pub fn is_balanced(&self) -> bool {
        self.total() == BUSINESS_TOTAL
    }

    /// Highest-weighted goal. Ties favour time to market, then cost.
    pub fn top_priority(&self) -> BusinessGoal {
        if self.time_to_market >= self.cost && self.time_to_market >= self.flexibility {
            BusinessGoal::TimeToMarket
        } else if self.cost >= self.flexibility {
            BusinessGoal::Cost
        } else {
            BusinessGoal::Flexibility
        }
    }
}
