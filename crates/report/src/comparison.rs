//! Fixed comparison figures shown alongside every recommendation.
//!
//! These do not depend on the answers. Values are relative scores (0..=100)
//! for the category chart and percentage return for the ROI projection.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: &'static str,
    pub microservices: u8,
    pub monolith: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoiPoint {
    pub month: &'static str,
    pub microservices: i32,
    pub monolith: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiSummaryRow {
    pub architecture: &'static str,
    pub initial_investment: i32,
    pub operational_savings: i32,
    pub roi_percent: i32,
}

pub const CATEGORY_SCORES: [CategoryScore; 5] = [
    CategoryScore { category: "Scalability", microservices: 95, monolith: 60 },
    CategoryScore { category: "Speed", microservices: 65, monolith: 90 },
    CategoryScore { category: "Cost", microservices: 60, monolith: 85 },
    CategoryScore { category: "Flexibility", microservices: 90, monolith: 55 },
    CategoryScore { category: "Maintenance", microservices: 70, monolith: 75 },
];

pub const ROI_PROJECTION: [RoiPoint; 7] = [
    RoiPoint { month: "M1", microservices: -50, monolith: -30 },
    RoiPoint { month: "M3", microservices: -40, monolith: -10 },
    RoiPoint { month: "M6", microservices: -20, monolith: 20 },
    RoiPoint { month: "M9", microservices: 10, monolith: 40 },
    RoiPoint { month: "M12", microservices: 45, monolith: 55 },
    RoiPoint { month: "M18", microservices: 85, monolith: 70 },
    RoiPoint { month: "M24", microservices: 130, monolith: 85 },
];

/// 12-month summary.
pub const ROI_SUMMARY: [RoiSummaryRow; 2] = [
    RoiSummaryRow {
        architecture: "Microservices",
        initial_investment: -50,
        operational_savings: 45,
        roi_percent: 45,
    },
    RoiSummaryRow {
        architecture: "Monolith",
        initial_investment: -30,
        operational_savings: 55,
        roi_percent: 55,
    },
];
