//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub lottery: LotteryConfig,
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout; unset means the HTTP client default
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

/// Live draw timing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LotteryConfig {
    pub poll_interval_ms: u64,
    pub spin_duration_ms: u64,
}

/// Local key-value storage holding auth tokens and the cached user record
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: PathBuf,
}

/// Export configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
    pub json: bool,
}

impl LotteryConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load settings layered over the defaults from a named file (extension optional)
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("RETAIL_CHAMPIONS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::RetailChampionsError> {
        super::validation::validate_settings(self)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, crate::utils::errors::RetailChampionsError> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::utils::errors::RetailChampionsError::Config(e.to_string()))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:5000/api/".to_string(),
                timeout_seconds: None,
                user_agent: "RetailChampions-Client/0.1".to_string(),
            },
            lottery: LotteryConfig {
                poll_interval_ms: 3000,
                spin_duration_ms: 8000,
            },
            storage: StorageConfig {
                path: PathBuf::from(".retail-champions/storage.json"),
            },
            export: ExportConfig {
                output_dir: PathBuf::from("exports"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: None,
                json: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let settings = Settings::default();
        assert_eq!(settings.lottery.poll_interval(), Duration::from_millis(3000));
        assert_eq!(settings.lottery.spin_duration(), Duration::from_secs(8));
        assert!(settings.api.timeout_seconds.is_none());
    }

    #[test]
    fn test_render_toml() {
        let rendered = Settings::default().to_toml().unwrap();
        assert!(rendered.contains("[lottery]"));
        assert!(rendered.contains("poll_interval_ms = 3000"));
    }
}
