use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use archdecide_engine::recommend::ScoringWeights;
use archdecide_report::ReportFormat;

use crate::error::ConfigError;

/// Environment variable that points at an alternative settings file.
pub const CONFIG_ENV: &str = "ARCHDECIDE_CONFIG";

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSettings {
    pub format: ReportFormat,
    /// Default output file for `report` when `-o` is not given.
    pub output: PathBuf,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: ReportFormat::Markdown,
            output: PathBuf::from("architecture-report.md"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "warn".to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub report: ReportSettings,

    /// Replaces the standard scoring coefficients when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringWeights>,

    pub log: LogSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("archdecide");
        config_dir.join("settings.toml")
    }

    /// `--config` wins, then `ARCHDECIDE_CONFIG`, then the platform default.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        Self::resolve_path_from(explicit, std::env::var_os(CONFIG_ENV))
    }

    fn resolve_path_from(explicit: Option<&Path>, env: Option<OsString>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match env {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => Self::config_path(),
        }
    }

    /// Parse and validate a settings document.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Strict load: any read, parse or validation problem is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents, path)
    }

    /// Load the resolved settings file. `Ok(None)` when there is no file.
    pub fn try_load(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        let path = Self::resolve_path(explicit);
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Load settings from disk, falling back to defaults.
    ///
    /// A missing file is normal. Anything else is logged and ignored.
    pub fn load(explicit: Option<&Path>) -> Self {
        match Self::try_load(explicit) {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                log::debug!("no settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.log.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "log.level '{}' is not one of {}",
                self.log.level,
                LOG_LEVELS.join(", ")
            )));
        }
        if self.report.output.as_os_str().is_empty() {
            return Err(ConfigError::Validation("report.output must not be empty".into()));
        }
        if let Some(weights) = &self.scoring {
            weights
                .validate()
                .map_err(|e| ConfigError::Validation(format!("scoring: {e}")))?;
        }
        Ok(())
    }

    /// Coefficients to score with: the override if configured, else the standard set.
    pub fn scoring_weights(&self) -> ScoringWeights {
        self.scoring.unwrap_or_default()
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Validation(format!("cannot serialize settings: {e}")))
    }

    /// Save settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        write_file(path, &self.to_toml()?)
    }

    /// Commented template written by `archdecide config init`.
    pub fn default_toml() -> &'static str {
        r#"# archdecide settings

[report]
# "markdown" or "json"
format = "markdown"
# Used by `archdecide report` when -o is not given
output = "architecture-report.md"

[log]
# off, error, warn, info, debug, trace (RUST_LOG and --verbose take precedence)
level = "warn"

# Optional: replace the scoring coefficients. Each side must sum to 1.
# [scoring.microservices]
# scalability = 0.3
# performance = 0.2
# expertise_level = 0.2
# flexibility = 0.3
#
# [scoring.monolith]
# time_to_market = 0.4
# cost = 0.3
# inverse_scalability = 0.2
# inverse_expertise_level = 0.1
"#
    }

    /// Write the commented template to `path`, creating parent directories.
    pub fn write_default_file(path: &Path) -> Result<(), ConfigError> {
        write_file(path, Self::default_toml())?;
        log::info!("wrote default settings to {}", path.display());
        Ok(())
    }

    /// Get the config file path for display
    pub fn config_path_display(explicit: Option<&Path>) -> String {
        Self::resolve_path(explicit).to_string_lossy().to_string()
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let write_err = |e: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    fs::write(path, contents).map_err(write_err)
}
