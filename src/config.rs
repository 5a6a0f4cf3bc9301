//! Configuration management for the `Gompa` library
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::GompaError;
use crate::location::PositionOptions;

/// Root configuration structure for the `Gompa` library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GompaConfig {
    /// Persistent storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Geolocation request settings
    #[serde(default)]
    pub location: LocationConfig,
    /// Nearby recommendation settings
    #[serde(default)]
    pub nearby: NearbyConfig,
}

/// Persistent storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store directory location
    #[serde(default = "default_storage_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Geolocation request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Prefer a high-accuracy fix
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
    /// Request timeout in seconds
    #[serde(default = "default_location_timeout")]
    pub timeout_seconds: u32,
    /// Platform-level cached fix allowance in minutes
    #[serde(default = "default_maximum_age")]
    pub maximum_age_minutes: u32,
    /// Persisted fix freshness window in minutes
    #[serde(default = "default_freshness")]
    pub freshness_minutes: u32,
}

/// Nearby recommendation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyConfig {
    /// Simulated lookup latency in milliseconds
    #[serde(default = "default_nearby_delay")]
    pub delay_ms: u32,
    /// Maximum entries per recommendation list
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

// Default value functions
fn default_storage_location() -> String {
    "~/.local/share/gompa".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_high_accuracy() -> bool {
    true
}

fn default_location_timeout() -> u32 {
    10
}

fn default_maximum_age() -> u32 {
    5
}

fn default_freshness() -> u32 {
    60
}

fn default_nearby_delay() -> u32 {
    1500
}

fn default_max_results() -> u32 {
    10
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            location: default_storage_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            high_accuracy: default_high_accuracy(),
            timeout_seconds: default_location_timeout(),
            maximum_age_minutes: default_maximum_age(),
            freshness_minutes: default_freshness(),
        }
    }
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_nearby_delay(),
            max_results: default_max_results(),
        }
    }
}

impl Default for GompaConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
            location: LocationConfig::default(),
            nearby: NearbyConfig::default(),
        }
    }
}

impl GompaConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with GOMPA_ prefix
        builder = builder.add_source(
            Environment::with_prefix("GOMPA")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: GompaConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gompa").join("config.toml"))
    }

    /// The position options the geolocation provider should use
    #[must_use]
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            high_accuracy: self.location.high_accuracy,
            timeout: Duration::from_secs(u64::from(self.location.timeout_seconds)),
            maximum_age: Duration::from_secs(u64::from(self.location.maximum_age_minutes) * 60),
        }
    }

    /// The persisted-fix freshness window
    #[must_use]
    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(u64::from(self.location.freshness_minutes) * 60)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.location.timeout_seconds == 0 || self.location.timeout_seconds > 300 {
            return Err(GompaError::config(
                "Location timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.location.freshness_minutes == 0 || self.location.freshness_minutes > 24 * 60 {
            return Err(GompaError::config(
                "Fix freshness window must be between 1 minute and 24 hours",
            )
            .into());
        }

        if self.nearby.delay_ms > 60_000 {
            return Err(GompaError::config(
                "Simulated lookup delay cannot exceed 60000 ms",
            )
            .into());
        }

        if self.nearby.max_results == 0 || self.nearby.max_results > 100 {
            return Err(GompaError::config(
                "Maximum results must be between 1 and 100",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(GompaError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(GompaError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.storage.location.is_empty() {
            return Err(GompaError::config("Storage location cannot be empty").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GompaConfig::default();
        assert_eq!(config.location.timeout_seconds, 10);
        assert_eq!(config.location.maximum_age_minutes, 5);
        assert_eq!(config.location.freshness_minutes, 60);
        assert!(config.location.high_accuracy);
        assert_eq!(config.nearby.delay_ms, 1500);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_position_options_from_config() {
        let config = GompaConfig::default();
        let options = config.position_options();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.maximum_age, Duration::from_secs(300));
        assert_eq!(config.freshness_window(), Duration::from_secs(3600));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = GompaConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = GompaConfig::default();
        config.location.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("between 1 and 300")
        );

        let mut config = GompaConfig::default();
        config.nearby.max_results = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = GompaConfig::get_config_path();
        if let Some(path) = path {
            assert!(path.to_string_lossy().contains("gompa"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
