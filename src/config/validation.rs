//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{RetailChampionsError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_lottery_config(&settings.lottery)?;
    validate_storage_config(&settings.storage)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(RetailChampionsError::Config(
            "API base URL is required".to_string()
        ));
    }

    let parsed = url::Url::parse(&config.base_url).map_err(|e| {
        RetailChampionsError::Config(format!("Invalid API base URL {}: {}", config.base_url, e))
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(RetailChampionsError::Config(
            format!("API base URL must be http or https, got {}", parsed.scheme())
        ));
    }

    if config.timeout_seconds == Some(0) {
        return Err(RetailChampionsError::Config(
            "API timeout must be greater than 0 when set".to_string()
        ));
    }

    Ok(())
}

/// Validate live draw timing
fn validate_lottery_config(config: &super::LotteryConfig) -> Result<()> {
    if config.poll_interval_ms == 0 {
        return Err(RetailChampionsError::Config(
            "Poll interval must be greater than 0".to_string()
        ));
    }

    if config.spin_duration_ms == 0 {
        return Err(RetailChampionsError::Config(
            "Spin duration must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.path.as_os_str().is_empty() {
        return Err(RetailChampionsError::Config(
            "Storage path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(RetailChampionsError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(RetailChampionsError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = "ftp://example.com/".to_string();
        assert_matches!(validate_settings(&settings), Err(RetailChampionsError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_poll_interval() {
        let mut settings = Settings::default();
        settings.lottery.poll_interval_ms = 0;
        assert_matches!(validate_settings(&settings), Err(RetailChampionsError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
