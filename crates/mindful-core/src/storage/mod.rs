mod config;

pub use config::{BreathingConfig, Config, DisplayConfig, MeditationConfig, RunnerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/mindful[-dev]/` based on MINDFUL_ENV.
///
/// Set MINDFUL_ENV=dev to use the development data directory, or
/// MINDFUL_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("MINDFUL_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("MINDFUL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("mindful-dev")
            } else {
                base_dir.join("mindful")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::NoDataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
