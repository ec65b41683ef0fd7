//! Configuration structures for field handlers.

use std::path::Path;

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for fieldkit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldkitConfig {
    /// Date handler configuration.
    pub date: DateConfig,

    /// Human name handler configuration.
    pub name: NameConfig,
}

/// Date handler configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// Keep parsed years that lie in the future instead of moving them
    /// back one century.
    pub allow_future_years: bool,

    /// Year treated as "now" for century disambiguation (default: the
    /// current local year).
    pub reference_year: Option<i32>,
}

impl DateConfig {
    /// The year after which parsed dates count as "in the future".
    pub fn current_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| Local::now().year())
    }
}

/// Human name handler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameConfig {
    /// Query tokens shorter than this (in characters) are treated as OCR
    /// noise and ignored when scoring.
    pub min_token_len: usize,
}

impl Default for NameConfig {
    fn default() -> Self {
        Self { min_token_len: 2 }
    }
}

impl FieldkitConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::from)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.name.min_token_len == 0 {
            return Err(ConfigError::Invalid {
                field: "name.min_token_len".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
