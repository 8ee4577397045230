//! Configuration settings for rollcall.
//!
//! Settings are loaded from `~/.rollcall/config.yaml`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::RollcallError;
use crate::presence::ConfigAdminGate;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Report settings.
    pub report: ReportConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Admin user ids per chat id.
    pub admins: HashMap<i64, Vec<i64>>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
}

/// Report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Threshold used for non-interactive reports run without a token.
    #[serde(default = "default_threshold_minutes")]
    pub default_threshold_minutes: i64,
    /// Maximum entries listed per bucket.
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    /// Thresholds offered by the chooser, in minutes.
    #[serde(default = "default_presets")]
    pub presets: Vec<i64>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_threshold_minutes() -> i64 {
    30
}

const fn default_list_limit() -> usize {
    30
}

fn default_presets() -> Vec<i64> {
    vec![30, 60, 120, 1440, 2880]
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_threshold_minutes: default_threshold_minutes(),
            list_limit: default_list_limit(),
            presets: default_presets(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, RollcallError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, RollcallError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            RollcallError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            RollcallError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), RollcallError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| RollcallError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            RollcallError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Admin gate backed by the `admins` table.
    #[must_use]
    pub fn admin_gate(&self) -> ConfigAdminGate {
        ConfigAdminGate::new(self.admins.clone())
    }
}
