//! The results view as data, plus Markdown and JSON
//! exporters.
//!
//! A [`Report`] is built once from a finished answer set and is read-only
//! afterwards. Rendering never touches the wizard state.

pub mod comparison;
pub mod error;
pub mod model;
pub mod render;

pub use error::ReportError;
pub use model::{ProjectSummary, Report, ReportMeta};
pub use render::ReportFormat;
