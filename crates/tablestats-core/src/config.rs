//! `tablestats` Configuration Module
//!
//! Provides configuration file support via `tablestats.toml`, environment variables,
//! and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Command-line flags
//! 2. Environment variables (`TABLESTATS_*`, nested keys split on `__`)
//! 3. Configuration file (`tablestats.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default number of rows kept by a sampled read.
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// Default number of random seek positions.
pub const DEFAULT_RANDOM_POSITIONS: usize = 5;

/// Default confidence level for the row-count interval.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Files up to this size (100 MiB) are read end to end.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Controls the full-scan versus sampled-scan decision and the sampling itself.
///
/// Immutable once validated; the reader takes it by reference and copies it into
/// the resulting [`TableStats`](crate::TableStats).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Number of rows to keep from a sampled read.
    pub sample_size: usize,
    /// Number of random byte offsets to seek to.
    pub random_positions: usize,
    /// Confidence level for the row-count interval, strictly inside (0, 1).
    pub confidence: f64,
    /// Maximum file size in bytes that is still read entirely.
    pub max_file_size: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            random_positions: DEFAULT_RANDOM_POSITIONS,
            confidence: DEFAULT_CONFIDENCE,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl SamplingConfig {
    /// Validates the sampling parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "sampling.sample_size".to_string(),
                message: "sample size must be positive".to_string(),
            });
        }

        if self.random_positions == 0 {
            return Err(ConfigError::InvalidValue {
                key: "sampling.random_positions".to_string(),
                message: "random positions must be positive".to_string(),
            });
        }

        // Negated range check so NaN is rejected as well.
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "sampling.confidence".to_string(),
                message: format!(
                    "confidence must be between 0 and 1 (exclusive), got {}",
                    self.confidence
                ),
            });
        }

        Ok(())
    }

    /// Rows read from each random position before moving to the next one.
    #[must_use]
    pub fn records_per_position(&self) -> usize {
        (self.sample_size / self.random_positions.max(1)).max(1)
    }
}

/// Reader configuration section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Seed for random position selection. `None` seeds from entropy.
    pub seed: Option<u64>,
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Checks the level against the names `tracing` understands.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.level, valid_levels
                ),
            });
        }
        Ok(())
    }
}

/// Main `tablestats` configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStatsConfig {
    /// Sampling configuration.
    pub sampling: SamplingConfig,
    /// Reader configuration.
    pub reader: ReaderConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl TableStatsConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < `tablestats.toml` < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("tablestats.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; its layer is simply empty.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("TABLESTATS_").split("__"))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sampling.validate()?;
        self.logging.validate()
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
