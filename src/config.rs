//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::storage::DEFAULT_QUOTA_BYTES;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub money: MoneyConfig,

    #[serde(default)]
    pub hub: HubConfig,

    #[serde(default)]
    pub sim: SimConfig,
}

/// Slot storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Largest value a single slot may hold
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("pocketkit").to_string_lossy().to_string())
        .unwrap_or_else(|| "./pocketkit_data".to_string())
}

fn default_quota_bytes() -> usize {
    DEFAULT_QUOTA_BYTES
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            quota_bytes: default_quota_bytes(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

/// Money tracker settings
#[derive(Debug, Clone, Deserialize)]
pub struct MoneyConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Avatar used when the user signs in without a photo
    #[serde(default = "default_photo")]
    pub default_photo: String,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_photo() -> String {
    "https://cdn-icons-png.flaticon.com/512/3135/3135715.png".to_string()
}

impl Default for MoneyConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            default_photo: default_photo(),
        }
    }
}

/// Hub settings
#[derive(Debug, Clone, Deserialize)]
pub struct HubConfig {
    /// Icon for apps added without one
    #[serde(default = "default_fallback_icon")]
    pub fallback_icon: String,
}

fn default_fallback_icon() -> String {
    "https://cdn-icons-png.flaticon.com/512/5738/5738031.png".to_string()
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            fallback_icon: default_fallback_icon(),
        }
    }
}

/// SIM tracker settings
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Days after expiry before a SIM counts as safely inactive
    #[serde(default = "default_inactive_after_days")]
    pub inactive_after_days: i64,
}

fn default_inactive_after_days() -> i64 {
    90
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            inactive_after_days: default_inactive_after_days(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        if config.sim.inactive_after_days <= 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                error: "sim.inactive_after_days must be positive".to_string(),
            });
        }

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("pocketkit").join("config.toml")),
            Some(PathBuf::from("./pocketkit.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("POCKETKIT_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Ok(level) = std::env::var("POCKETKIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("POCKETKIT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Data directory with a leading `~` expanded
    pub fn data_dir(&self) -> PathBuf {
        match self.storage.data_dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.storage.data_dir)),
            None => PathBuf::from(&self.storage.data_dir),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid config file {path:?}: {error}")]
    Invalid { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# PocketKit Configuration
#
# Environment variables override these settings:
# - POCKETKIT_DATA_DIR
# - POCKETKIT_LOG_LEVEL
# - POCKETKIT_LOG_FORMAT

[storage]
# Directory holding pocketkit.db
data_dir = "~/.local/share/pocketkit"

# Largest value one slot may hold (bytes)
quota_bytes = 5242880

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/tmp/pocketkit.log"

[money]
# Symbol shown before amounts
currency_symbol = "₹"

# Avatar used when signing in without a photo
default_photo = "https://cdn-icons-png.flaticon.com/512/3135/3135715.png"

[hub]
# Icon for apps added without one
fallback_icon = "https://cdn-icons-png.flaticon.com/512/5738/5738031.png"

[sim]
# Days after expiry before a SIM is shown as safe/inactive
inactive_after_days = 90
"#
    .to_string()
}
