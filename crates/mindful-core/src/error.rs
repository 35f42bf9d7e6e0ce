//! Core error types for mindful-core.
//!
//! The session engine itself only ever fails with
//! [`ValidationError::InvalidConfig`]; the remaining kinds cover preset
//! parsing and configuration storage.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mindful-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Breathing preset errors
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Could not resolve the configuration directory
    #[error("Cannot determine configuration directory: {0}")]
    NoDataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A session configuration was rejected by `start`.
    #[error("Invalid session config '{field}': {message}")]
    InvalidConfig { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the rejected config field.
    pub fn field(&self) -> &str {
        let ValidationError::InvalidConfig { field, .. } = self;
        field
    }
}

/// Errors raised while turning a preset name or pattern string into a
/// breathing pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Pattern '{pattern}' has {len} phases; expected 3 or 4")]
    WrongPhaseCount { pattern: String, len: usize },

    #[error("Invalid phase duration '{value}' in pattern '{pattern}'")]
    InvalidPhaseSeconds { pattern: String, value: String },

    /// The exercise has no numeric pattern (e.g. "Natural").
    #[error("Pattern '{0}' is not a timed breathing pattern")]
    Untimed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message_names_field() {
        let err = ValidationError::invalid_config("duration_secs", "must be greater than 0");
        assert_eq!(err.field(), "duration_secs");
        assert_eq!(
            err.to_string(),
            "Invalid session config 'duration_secs': must be greater than 0"
        );
    }

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::invalid_config("breathing_pattern", "empty").into();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
