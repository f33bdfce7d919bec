use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    Read { path: PathBuf, message: String },
    /// TOML syntax or shape error.
    Parse { path: PathBuf, message: String },
    /// Parsed, but a value is unusable (bad log level, weights not summing to 1).
    Validation(String),
    /// Writing the settings file failed.
    Write { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "cannot read {}: {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "cannot parse {}: {message}", path.display())
            }
            Self::Validation(msg) => write!(f, "invalid settings: {msg}"),
            Self::Write { path, message } => {
                write!(f, "cannot write {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}
