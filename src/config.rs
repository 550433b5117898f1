//! Configuration management for the forecast service
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and validates every setting before the service starts.

use std::env;
use std::path::PathBuf;

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::ForecastError;
use crate::weather::Credentials;

/// Environment variable the API key is read from when not configured
pub const API_KEY_ENV: &str = "MET_OFFICE_API_KEY";
/// Environment variable pointing at an alternative config file
pub const CONFIG_PATH_ENV: &str = "DOWNLAND_CONFIG";
const ENV_PREFIX: &str = "DOWNLAND";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub datapoint: DataPointConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub debug: DebugConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Met Office DataPoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPointConfig {
    /// DataPoint API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// DataPoint site id of the forecast location
    #[serde(default = "default_location_id")]
    pub location_id: String,
    /// Base URL of the 3-hourly forecast feed
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; expiry fails the fetch
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Forecast cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Age after which the cached forecast is fetched again
    #[serde(default = "default_freshness_minutes")]
    pub freshness_minutes: u32,
}

/// Diagnostic settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Write every raw provider response to `dump_path`
    #[serde(default)]
    pub dump_responses: bool,
    #[serde(default = "default_dump_path")]
    pub dump_path: PathBuf,
}

/// Where "today" is
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// IANA time zone used for the current date and minute of day
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for the home page and assets
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
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

// Default value functions
fn default_location_id() -> String {
    "351611".to_string()
}

fn default_base_url() -> String {
    "http://datapoint.metoffice.gov.uk/public/data/val/wxfcs/all/json".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_freshness_minutes() -> u32 {
    30
}

fn default_dump_path() -> PathBuf {
    PathBuf::from("forecast.json")
}

fn default_timezone() -> String {
    "Europe/London".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for DataPointConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            location_id: default_location_id(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness_minutes: default_freshness_minutes(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            dump_responses: false,
            dump_path: default_dump_path(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
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

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV)
            .map_or_else(|_| PathBuf::from("config.toml"), PathBuf::from);
        Self::load_from_path(&path)
    }

    /// Load configuration from the given file (if it exists) plus environment
    pub fn load_from_path(config_file: &std::path::Path) -> Result<Self> {
        let mut builder = Config::builder();

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.to_path_buf())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. DOWNLAND_DATAPOINT__LOCATION_ID
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ForecastError::config(format!("Failed to build configuration: {e}")))?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| {
                ForecastError::config(format!("Failed to deserialize configuration: {e}"))
            })?;

        config.apply_env_fallbacks();
        config.validate()?;

        Ok(config)
    }

    /// Fill the API key from `MET_OFFICE_API_KEY` when not configured
    pub fn apply_env_fallbacks(&mut self) {
        if self.datapoint.api_key.is_none() {
            self.datapoint.api_key = env::var(API_KEY_ENV).ok();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_api_key(&self) -> Result<()> {
        match self.datapoint.api_key.as_deref() {
            None => Err(ForecastError::config(format!(
                "DataPoint API key is required. Set datapoint.api_key or {API_KEY_ENV}."
            ))),
            Some(key) if key.trim().is_empty() => {
                Err(ForecastError::config("DataPoint API key cannot be empty"))
            }
            Some(_) => Ok(()),
        }
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(1..=300).contains(&self.datapoint.timeout_seconds) {
            return Err(ForecastError::config(
                "DataPoint timeout must be between 1 and 300 seconds",
            ));
        }

        if !(1..=1440).contains(&self.cache.freshness_minutes) {
            return Err(ForecastError::config(
                "Cache freshness must be between 1 and 1440 minutes",
            ));
        }

        if self.server.port == 0 {
            return Err(ForecastError::config("Server port cannot be 0"));
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        if self.datapoint.location_id.trim().is_empty() {
            return Err(ForecastError::config("DataPoint location id cannot be empty"));
        }

        if !self.datapoint.base_url.starts_with("http://")
            && !self.datapoint.base_url.starts_with("https://")
        {
            return Err(ForecastError::config(
                "DataPoint base URL must be a valid HTTP or HTTPS URL",
            ));
        }

        self.timezone()?;

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ForecastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ForecastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        Ok(())
    }

    /// Parsed time zone of the forecast location
    pub fn timezone(&self) -> Result<Tz> {
        self.location.timezone.parse::<Tz>().map_err(|_| {
            ForecastError::config(format!("Unknown time zone '{}'", self.location.timezone))
        })
    }

    pub fn credentials(&self) -> Result<Credentials> {
        self.validate_api_key()?;
        let api_key = self.datapoint.api_key.clone().unwrap_or_default();
        Ok(Credentials::new(api_key, self.datapoint.location_id.clone()))
    }

    #[must_use]
    pub fn freshness(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.cache.freshness_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.datapoint.api_key = Some("0123-4567-89ab".to_string());
        config
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.datapoint.location_id, "351611");
        assert_eq!(config.datapoint.timeout_seconds, 30);
        assert_eq!(config.cache.freshness_minutes, 30);
        assert_eq!(config.location.timezone, "Europe/London");
        assert!(!config.debug.dump_responses);
        assert!(config.datapoint.api_key.is_none());
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let config = AppConfig::default();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("API key is required"));
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = valid_config();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = valid_config();
        config.datapoint.timeout_seconds = 0;
        assert!(config.validate().unwrap_err().to_string().contains("timeout"));

        let mut config = valid_config();
        config.cache.freshness_minutes = 5000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let mut config = valid_config();
        config.location.timezone = "Sussex/Downs".to_string();
        assert!(config.validate().unwrap_err().to_string().contains("time zone"));
    }

    #[test]
    fn test_freshness_and_credentials() {
        let config = valid_config();
        assert_eq!(config.freshness(), chrono::Duration::minutes(30));
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.location_id, "351611");
        assert_eq!(credentials.api_key, "0123-4567-89ab");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[datapoint]
api_key = "file-key-1234"
location_id = "353595"

[debug]
dump_responses = true
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.datapoint.api_key.as_deref(), Some("file-key-1234"));
        assert_eq!(config.datapoint.location_id, "353595");
        assert!(config.debug.dump_responses);
        assert_eq!(config.cache.freshness_minutes, 30);
    }
}
