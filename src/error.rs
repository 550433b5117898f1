//! Error types and handling for the forecast processor

use thiserror::Error;

/// Main error type for the forecast processor
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Outbound request failed: network error, timeout or non-success status
    #[error("Fetch error: {message}")]
    Fetch {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Provider body was not JSON or did not have the expected shape
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Provider sent a weather type code with no known description
    #[error("Unknown weather type code '{0}'")]
    UnknownWeatherType(String),

    /// Provider sent a time code that is not one of the daylight slots
    #[error("Unknown time code '{0}'")]
    UnknownTimeCode(String),

    /// Wind direction label is not one of the 16 compass points
    #[error("Unknown compass point '{0}'")]
    UnknownCompassPoint(String),

    /// An attribute value could not be read as the expected type
    #[error("Invalid value '{value}' for {attribute}")]
    InvalidValue { attribute: String, value: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ForecastError {
    /// Create a new fetch error without an underlying transport error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new fetch error wrapping a transport error
    pub fn fetch_with_source<S: Into<String>>(message: S, source: reqwest::Error) -> Self {
        Self::Fetch {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_value(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Whether this error came from the outbound fetch boundary
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Parse { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::Fetch { .. } | ForecastError::Parse { .. } => {
                "Unable to get the forecast from the Met Office right now.".to_string()
            }
            ForecastError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            ForecastError::UnknownWeatherType(_)
            | ForecastError::UnknownTimeCode(_)
            | ForecastError::UnknownCompassPoint(_)
            | ForecastError::InvalidValue { .. } => {
                "The forecast contained data we could not interpret.".to_string()
            }
            ForecastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let fetch_err = ForecastError::fetch("status 503");
        assert!(matches!(fetch_err, ForecastError::Fetch { source: None, .. }));

        let config_err = ForecastError::config("missing API key");
        assert!(matches!(config_err, ForecastError::Config { .. }));

        let value_err = ForecastError::invalid_value("wind_speed", "fast");
        assert_eq!(value_err.to_string(), "Invalid value 'fast' for wind_speed");
    }

    #[test]
    fn test_fetch_failure_classification() {
        assert!(ForecastError::fetch("boom").is_fetch_failure());
        assert!(ForecastError::parse("not json").is_fetch_failure());
        assert!(!ForecastError::UnknownWeatherType("31".into()).is_fetch_failure());
    }

    #[test]
    fn test_user_messages() {
        let fetch_err = ForecastError::fetch("test");
        assert!(fetch_err.user_message().contains("Met Office"));

        let lookup_err = ForecastError::UnknownTimeCode("0".into());
        assert!(lookup_err.user_message().contains("could not interpret"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ForecastError = io_err.into();
        assert!(matches!(err, ForecastError::Io { .. }));
    }
}
