//! Answer files.
//!
//! An answers file is a partial answer set with the questionnaire's camelCase
//! keys. `.toml` files are read as TOML, everything else as JSON. `-` reads
//! JSON from stdin.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use archdecide_engine::AnswersPatch;

#[derive(Debug)]
pub enum InputError {
    Read { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "cannot read {}: {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "cannot parse {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for InputError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswersFormat {
    Json,
    Toml,
}

impl AnswersFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

pub fn parse_answers(
    contents: &str,
    format: AnswersFormat,
    path: &Path,
) -> Result<AnswersPatch, InputError> {
    let parse_err = |message: String| InputError::Parse {
        path: path.to_path_buf(),
        message,
    };
    match format {
        AnswersFormat::Json => serde_json::from_str(contents).map_err(|e| parse_err(e.to_string())),
        AnswersFormat::Toml => toml::from_str(contents).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read an answers file (or stdin for `-`).
pub fn load_answers(path: &Path) -> Result<AnswersPatch, InputError> {
    let read_err = |e: std::io::Error| InputError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(read_err)?
    };

    let patch = parse_answers(&contents, AnswersFormat::for_path(path), path)?;
    log::debug!("loaded answers from {}: {:?}", path.display(), patch);
    Ok(patch)
}
