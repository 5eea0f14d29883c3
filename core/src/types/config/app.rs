use super::{IndexConfig, ScoringConfig, StagedConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// User-facing configuration, persisted as TOML.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub staged: StagedConfig,
}

impl AppConfig {
    /// Returns the config file path within the given directory.
    pub fn path(dir: &Path) -> std::path::PathBuf {
        dir.join("typeahead.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, AppConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(index_errors(&self.index));
        errors.extend(scoring_errors(&self.scoring));
        errors.extend(staged_errors(&self.staged));
        errors
    }

    /// Returns a validated config, replacing invalid sections with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        Self {
            index: if index_errors(&self.index).is_empty() {
                self.index.clone()
            } else {
                IndexConfig {
                    mode: self.index.mode,
                    ..IndexConfig::default()
                }
            },
            scoring: if scoring_errors(&self.scoring).is_empty() {
                self.scoring.clone()
            } else {
                ScoringConfig::default()
            },
            staged: if staged_errors(&self.staged).is_empty() {
                self.staged.clone()
            } else {
                StagedConfig::default()
            },
        }
    }
}

fn index_errors(index: &IndexConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if index.min_token_len == 0 {
        errors.push("index.min_token_len must be at least 1".to_string());
    }
    if index.min_prefix_len == 0 {
        errors.push("index.min_prefix_len must be at least 1".to_string());
    }
    if index.max_prefix_len < index.min_prefix_len {
        errors.push("index.max_prefix_len must not be below index.min_prefix_len".to_string());
    }

    errors
}

fn scoring_errors(scoring: &ScoringConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if scoring.result_limit == 0 {
        errors.push("scoring.result_limit must be at least 1".to_string());
    }
    if scoring.quick_result_limit == 0 {
        errors.push("scoring.quick_result_limit must be at least 1".to_string());
    }
    if scoring.quick_prefix_len == 0 {
        errors.push("scoring.quick_prefix_len must be at least 1".to_string());
    }

    errors
}

fn staged_errors(staged: &StagedConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if staged.min_query_len == 0 {
        errors.push("staged.min_query_len must be at least 1".to_string());
    }

    errors
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
