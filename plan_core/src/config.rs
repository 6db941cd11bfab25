//! Configuration file support for Trainingsplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/trainingsplan/config.toml`.

use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MAX_WEIGHT_DECIMALS: usize = 6;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Form parsing rules
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputConfig {
    /// Accept "42,5" as well as "42.5"
    #[serde(default = "default_decimal_comma")]
    pub decimal_comma: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            decimal_comma: default_decimal_comma(),
        }
    }
}

/// How weights and dates are shown
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,

    #[serde(default = "default_weight_decimals")]
    pub weight_decimals: usize,

    /// chrono strftime format for entry dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            weight_unit: default_weight_unit(),
            weight_decimals: default_weight_decimals(),
            date_format: default_date_format(),
        }
    }
}

impl DisplayConfig {
    /// Format a weight with the configured precision and unit, e.g. "42.50 kg"
    pub fn format_weight(&self, weight: f64) -> String {
        format!("{:.*} {}", self.weight_decimals, weight, self.weight_unit)
    }
}

/// Logging defaults (RUST_LOG still wins)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_decimal_comma() -> bool {
    true
}

fn default_weight_unit() -> String {
    "kg".into()
}

fn default_weight_decimals() -> usize {
    2
}

fn default_date_format() -> String {
    "%Y-%m-%d".into()
}

fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("trainingsplan").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.display.weight_decimals > MAX_WEIGHT_DECIMALS {
            return Err(Error::Config(format!(
                "display.weight_decimals must be at most {}, got {}",
                MAX_WEIGHT_DECIMALS, self.display.weight_decimals
            )));
        }
        if StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!(
                "display.date_format is not a valid strftime format: {:?}",
                self.display.date_format
            )));
        }
        Ok(())
    }
}
