use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A percentage field was given a value above 100.
    OutOfRange { field: &'static str, value: u32 },
    /// Scoring coefficients that cannot produce a 0..=1 score.
    InvalidWeights(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { field, value } => {
                write!(f, "{field} must be between 0 and 100, got {value}")
            }
            Self::InvalidWeights(msg) => write!(f, "invalid scoring weights: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
