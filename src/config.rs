//! Configuration management for `RideCast`
//!
//! Handles loading configuration from files and environment variables
//! and provides validation for all configuration settings.

use crate::RideError;
use crate::models::{Location, UnitSystem};
use crate::riding::Activity;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "ridecast";

/// Root configuration structure for the `RideCast` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RideConfig {
    /// Forecast and geocoding endpoints
    pub weather: WeatherConfig,
    /// Local store for recents and the last location
    pub storage: StorageConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Defaults used when the command line leaves something out
    pub defaults: DefaultsConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL of the forecast API
    pub forecast_url: String,
    /// Base URL of the geocoding search API
    pub geocoding_url: String,
    /// Base URL of the reverse geocoding API
    pub reverse_geocoding_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory of the key-value store. Empty keeps everything in memory.
    pub path: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
    /// OTLP HTTP endpoint for trace export
    pub otlp_endpoint: Option<String>,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub activity: Activity,
    pub units: UnitSystem,
    /// Number of upcoming hours in the hourly view
    pub hourly_hours: u32,
    /// Location used when nothing else is known
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

// Default value functions
fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_reverse_geocoding_url() -> String {
    "https://api.bigdatacloud.net/data".to_string()
}

fn default_weather_timeout() -> u32 {
    15
}

fn default_storage_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join("store").to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_hourly_hours() -> u32 {
    12
}

fn default_location_name() -> String {
    "Girona".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            geocoding_url: default_geocoding_url(),
            reverse_geocoding_url: default_reverse_geocoding_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            activity: Activity::default(),
            units: UnitSystem::default(),
            hourly_hours: default_hourly_hours(),
            location_name: default_location_name(),
            latitude: 41.9794,
            longitude: 2.8214,
        }
    }
}

impl DefaultsConfig {
    /// The configured fallback location
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude, self.location_name.clone())
    }
}

impl RideConfig {
    /// Load configuration from the default file and environment variables
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

        // RIDECAST_WEATHER__TIMEOUT_SECONDS overrides weather.timeout_seconds
        builder = builder.add_source(
            Environment::with_prefix("RIDECAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: RideConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.forecast_url.is_empty() {
            self.weather.forecast_url = default_forecast_url();
        }
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_url();
        }
        if self.weather.reverse_geocoding_url.is_empty() {
            self.weather.reverse_geocoding_url = default_reverse_geocoding_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.hourly_hours == 0 {
            self.defaults.hourly_hours = default_hourly_hours();
        }
        if self.defaults.location_name.trim().is_empty() {
            self.defaults.location_name = default_location_name();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(RideError::config("Weather API timeout cannot exceed 300 seconds").into());
        }

        if self.defaults.hourly_hours > 168 {
            return Err(RideError::config("Hourly view cannot exceed 168 hours").into());
        }

        if !(-90.0..=90.0).contains(&self.defaults.latitude) {
            return Err(RideError::config(format!(
                "Default latitude must be between -90 and 90, got: {}",
                self.defaults.latitude
            ))
            .into());
        }

        if !(-180.0..=180.0).contains(&self.defaults.longitude) {
            return Err(RideError::config(format!(
                "Default longitude must be between -180 and 180, got: {}",
                self.defaults.longitude
            ))
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(RideError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(RideError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("forecast", &self.weather.forecast_url),
            ("geocoding", &self.weather.geocoding_url),
            ("reverse geocoding", &self.weather.reverse_geocoding_url),
        ];
        for (name, url) in urls {
            if !is_http_url(url) {
                return Err(RideError::config(format!(
                    "The {name} URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if let Some(endpoint) = &self.logging.otlp_endpoint {
            if !is_http_url(endpoint) {
                return Err(
                    RideError::config("The OTLP endpoint must be a valid HTTP or HTTPS URL").into(),
                );
            }
        }

        Ok(())
    }

    /// Path of the key-value store, if one is configured
    #[must_use]
    pub fn storage_path(&self) -> Option<PathBuf> {
        let path = self.storage.path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RideConfig::default();
        assert_eq!(config.weather.forecast_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 15);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.activity, Activity::Road);
        assert_eq!(config.defaults.units, UnitSystem::Metric);
        assert_eq!(config.defaults.hourly_hours, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = RideConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = RideConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_bad_default_location() {
        let mut config = RideConfig::default();
        config.defaults.latitude = 95.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = RideConfig::default();
        config.weather.geocoding_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("geocoding URL"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = RideConfig::default();
        config.weather.forecast_url.clear();
        config.weather.timeout_seconds = 0;
        config.defaults.hourly_hours = 0;
        config.defaults.location_name = "  ".to_string();

        config.apply_defaults();

        assert_eq!(config.weather.forecast_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 15);
        assert_eq!(config.defaults.hourly_hours, 12);
        assert_eq!(config.defaults.location_name, "Girona");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[weather]\ntimeout_seconds = 5\n\n[defaults]\nactivity = \"gravel\"\nunits = \"imperial\"\n"
        )
        .unwrap();

        let config = RideConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.weather.timeout_seconds, 5);
        assert_eq!(config.weather.forecast_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.defaults.activity, Activity::Gravel);
        assert_eq!(config.defaults.units, UnitSystem::Imperial);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_default_location() {
        let location = RideConfig::default().defaults.location();
        assert_eq!(location.name, "Girona");
        assert_eq!(location.id, "41.9794,2.8214");
    }

    #[test]
    fn test_storage_path() {
        let mut config = RideConfig::default();
        config.storage.path = String::new();
        assert!(config.storage_path().is_none());

        config.storage.path = "/tmp/ridecast".to_string();
        assert_eq!(config.storage_path(), Some(PathBuf::from("/tmp/ridecast")));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = RideConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("ridecast"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
