//! Configuration file support for BrewLog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/brewlog/config.toml`.

use crate::rules::{
    CautionPolicy, DEFAULT_CUTOFF_HOUR, DEFAULT_CUTOFF_MINUTE, DEFAULT_MAX_CUPS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub cautions: CautionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Caution thresholds configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CautionConfig {
    /// Local hour after which a cup reads as late (24h clock)
    #[serde(default = "default_cutoff_hour")]
    pub cutoff_hour: u32,

    #[serde(default = "default_cutoff_minute")]
    pub cutoff_minute: u32,

    /// Daily cup ceiling before the limit caution fires
    #[serde(default = "default_max_cups")]
    pub max_cups: usize,
}

impl Default for CautionConfig {
    fn default() -> Self {
        Self {
            cutoff_hour: default_cutoff_hour(),
            cutoff_minute: default_cutoff_minute(),
            max_cups: default_max_cups(),
        }
    }
}

impl CautionConfig {
    /// The policy handed to rule evaluation
    pub fn policy(&self) -> CautionPolicy {
        CautionPolicy {
            cutoff_hour: self.cutoff_hour,
            cutoff_minute: self.cutoff_minute,
            max_cups: self.max_cups,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.cutoff_hour > 23 {
            return Err(Error::Config(format!(
                "cutoff_hour must be 0-23, got {}",
                self.cutoff_hour
            )));
        }
        if self.cutoff_minute > 59 {
            return Err(Error::Config(format!(
                "cutoff_minute must be 0-59, got {}",
                self.cutoff_minute
            )));
        }
        Ok(())
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("brewlog")
}

fn default_cutoff_hour() -> u32 {
    DEFAULT_CUTOFF_HOUR
}

fn default_cutoff_minute() -> u32 {
    DEFAULT_CUTOFF_MINUTE
}

fn default_max_cups() -> usize {
    DEFAULT_MAX_CUPS
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.cautions.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("brewlog").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
