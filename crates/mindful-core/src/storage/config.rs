//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default meditation length
//! - Default breathing preset and length
//! - Runner cadence
//! - Display options
//!
//! Configuration is stored at `~/.config/mindful/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use crate::error::{ConfigError, CoreError, PresetError, Result};
use crate::presets;
use crate::session::SessionConfig;

/// Meditation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeditationConfig {
    #[serde(default = "default_meditation_minutes")]
    pub default_minutes: u32,
}

/// Breathing exercise defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    /// Preset name (`box`, `4-7-8`) or a raw pattern such as `5-5-5`.
    #[serde(default = "default_preset")]
    pub default_preset: String,
    #[serde(default = "default_breathing_minutes")]
    pub default_minutes: u32,
}

/// Scheduler cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Wall-clock milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_phase_countdown: bool,
    #[serde(default)]
    pub json_output: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/mindful/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub meditation: MeditationConfig,
    #[serde(default)]
    pub breathing: BreathingConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_meditation_minutes() -> u32 {
    10
}
fn default_preset() -> String {
    "box".into()
}
fn default_breathing_minutes() -> u32 {
    5
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}

impl Default for MeditationConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_meditation_minutes(),
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            default_preset: default_preset(),
            default_minutes: default_breathing_minutes(),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_phase_countdown: true,
            json_output: false,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(unknown());
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                CoreError::from(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file; writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(CoreError::Io(e)),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn update(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// Update a value and persist to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.update(key, value)?;
        self.save()
    }

    /// Every leaf key with its current value, in dot notation.
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.runner.tick_interval_ms)
    }

    /// Breathing session from the default preset.
    pub fn breathing_session(
        &self,
        minutes: Option<u32>,
    ) -> std::result::Result<SessionConfig, PresetError> {
        let pattern = presets::resolve_pattern(&self.breathing.default_preset)?;
        let minutes = minutes.unwrap_or(self.breathing.default_minutes);
        Ok(SessionConfig::breathing(minutes.saturating_mul(60), pattern))
    }

    pub fn meditation_session(&self, minutes: Option<u32>) -> SessionConfig {
        let minutes = minutes.unwrap_or(self.meditation.default_minutes);
        SessionConfig::timed(minutes.saturating_mul(60))
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
