use std::fmt::{self, Write as _};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::model::Report;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }

    /// Guess the format from a file extension (`.json` or `.md`/`.markdown`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format '{other}' (expected markdown or json)")),
        }
    }
}

impl Report {
    pub fn render(&self, format: ReportFormat) -> Result<String, ReportError> {
        match format {
            ReportFormat::Markdown => Ok(self.to_markdown()),
            ReportFormat::Json => serde_json::to_string_pretty(self)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| ReportError::Serialize(e.to_string())),
        }
    }

    pub fn write_to(&self, path: &Path, format: ReportFormat) -> Result<(), ReportError> {
        let body = self.render(format)?;
        std::fs::write(path, body).map_err(|e| ReportError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::info!("wrote {} report to {}", format, path.display());
        Ok(())
    }

    pub fn to_markdown(&self) -> String {
        // Writing into a String cannot fail.
        let mut out = String::new();
        let _ = self.write_markdown(&mut out);
        out
    }

    fn write_markdown(&self, out: &mut String) -> fmt::Result {
        let rec = &self.recommendation;

        writeln!(out, "# Architecture Recommendation")?;
        writeln!(out)?;
        writeln!(out, "Based on your inputs, here's the analysis and recommendation.")?;
        writeln!(out)?;
        writeln!(out, "**Recommended Architecture:** {} (Primary Choice)", rec.recommended.label())?;
        writeln!(out)?;
        writeln!(out, "**Confidence Score:** {}%", rec.confidence)?;
        writeln!(out)?;

        writeln!(out, "## Project")?;
        writeln!(out)?;
        writeln!(out, "- **Project:** {}", self.project.name)?;
        writeln!(out, "- **Team:** {}", self.project.team)?;
        writeln!(out, "- **Expected Load:** {}", self.project.expected_load)?;
        writeln!(out, "- **Top Priority:** {}", self.top_priority.priority_label())?;
        if !self.project.critical_features.is_empty() {
            writeln!(out, "- **Critical Features:** {}", self.project.critical_features)?;
        }
        writeln!(out)?;

        let i = &self.inputs;
        writeln!(out, "## Inputs")?;
        writeln!(out)?;
        writeln!(out, "| Factor | Value |")?;
        writeln!(out, "|---|---:|")?;
        for (label, value) in [
            ("Scalability Needs", i.scalability),
            ("Performance Requirements", i.performance),
            ("Team Expertise Level", i.expertise_level),
            ("Time to Market", i.time_to_market),
            ("Cost Efficiency", i.cost),
            ("Flexibility & Adaptability", i.flexibility),
        ] {
            writeln!(out, "| {label} | {value}% |")?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "Scores: microservices {:.3}, monolith {:.3}.",
            self.scores.microservices, self.scores.monolith
        )?;
        writeln!(out)?;

        writeln!(out, "## Architecture Comparison")?;
        writeln!(out)?;
        writeln!(out, "| Category | Microservices | Monolith |")?;
        writeln!(out, "|---|---:|---:|")?;
        for row in &self.comparison {
            writeln!(out, "| {} | {} | {} |", row.category, row.microservices, row.monolith)?;
        }
        writeln!(out)?;

        writeln!(out, "## ROI Projection")?;
        writeln!(out)?;
        writeln!(out, "| Month | Microservices | Monolith |")?;
        writeln!(out, "|---|---:|---:|")?;
        for point in &self.roi_projection {
            writeln!(out, "| {} | {} | {} |", point.month, point.microservices, point.monolith)?;
        }
        writeln!(out)?;

        writeln!(out, "## ROI Summary (12-Month Projection)")?;
        writeln!(out)?;
        writeln!(out, "| Architecture | Initial Investment | Operational Savings | ROI 12 Months |")?;
        writeln!(out, "|---|---:|---:|---:|")?;
        for row in &self.roi_summary {
            writeln!(
                out,
                "| {} | {} | {:+} | {}% |",
                row.architecture, row.initial_investment, row.operational_savings, row.roi_percent
            )?;
        }
        writeln!(out)?;

        writeln!(
            out,
            "_Generated {} by archdecide {}._",
            self.meta.generated_at, self.meta.tool_version
        )
    }
}
