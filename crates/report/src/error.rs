use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ReportError {
    /// JSON serialization failed.
    Serialize(String),
    /// Writing the rendered report failed.
    Io { path: PathBuf, message: String },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize(msg) => write!(f, "cannot serialize report: {msg}"),
            Self::Io { path, message } => {
                write!(f, "cannot write report to {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {}
