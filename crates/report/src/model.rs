use serde::Serialize;

use archdecide_engine::answers::{BusinessGoal, WizardAnswers};
use archdecide_engine::recommend::{score_with, RecommendationResult, Scores, ScoringWeights};

use crate::comparison::{
    CategoryScore, RoiPoint, RoiSummaryRow, CATEGORY_SCORES, ROI_PROJECTION, ROI_SUMMARY,
};

pub const UNNAMED_PROJECT: &str = "Unnamed Project";
pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub project: ProjectSummary,
    pub recommendation: RecommendationResult,
    pub scores: Scores,
    pub top_priority: BusinessGoal,
    pub inputs: WizardAnswers,
    pub comparison: Vec<CategoryScore>,
    pub roi_projection: Vec<RoiPoint>,
    pub roi_summary: Vec<RoiSummaryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub tool_version: String,
    pub generated_at: String,
}

/// Display values for the text answers, with empty answers replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub team: String,
    pub expected_load: String,
    /// Left empty when not answered; the view shows nothing for it.
    pub critical_features: String,
}

impl ProjectSummary {
    pub fn from_answers(answers: &WizardAnswers) -> Self {
        Self {
            name: or_fallback(&answers.project_name, UNNAMED_PROJECT),
            team: or_fallback(&answers.team_size, NOT_SPECIFIED),
            expected_load: or_fallback(&answers.user_load, NOT_SPECIFIED),
            critical_features: answers.critical_features.clone(),
        }
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

impl Report {
    pub fn build(answers: &WizardAnswers) -> Self {
        Self::build_with(&ScoringWeights::default(), answers)
    }

    pub fn build_with(weights: &ScoringWeights, answers: &WizardAnswers) -> Self {
        let scores = score_with(weights, answers);
        let recommendation = scores.result();
        let top_priority = answers.business_weights().top_priority();

        log::debug!(
            "building report for {:?}: {} at {}%",
            answers.project_name,
            recommendation.recommended,
            recommendation.confidence
        );

        Self {
            meta: ReportMeta {
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                generated_at: chrono::Utc::now().to_rfc3339(),
            },
            project: ProjectSummary::from_answers(answers),
            recommendation,
            scores,
            top_priority,
            inputs: answers.clone(),
            comparison: CATEGORY_SCORES.to_vec(),
            roi_projection: ROI_PROJECTION.to_vec(),
            roi_summary: ROI_SUMMARY.to_vec(),
        }
    }
}
