//! Error types and handling for `RideCast`

use thiserror::Error;

/// Main error type for the `RideCast` application
#[derive(Error, Debug)]
pub enum RideError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Forecast or geocoding API errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Local key-value store errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl RideError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RideError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            RideError::Api { .. } => {
                "Unable to load the forecast right now. Please try again in a moment.".to_string()
            }
            RideError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            RideError::Storage { .. } => {
                "Saved locations are unavailable. Continuing without them.".to_string()
            }
            RideError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            RideError::General { message } => message.clone(),
        }
    }
}

impl From<fjall::Error> for RideError {
    fn from(err: fjall::Error) -> Self {
        RideError::storage(err.to_string())
    }
}

impl From<postcard::Error> for RideError {
    fn from(err: postcard::Error) -> Self {
        RideError::storage(format!("encoding failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = RideError::config("bad timeout");
        assert!(matches!(config_err, RideError::Config { .. }));

        let api_err = RideError::api("connection failed");
        assert!(matches!(api_err, RideError::Api { .. }));

        let validation_err = RideError::validation("invalid coordinates");
        assert!(matches!(validation_err, RideError::Validation { .. }));

        let storage_err = RideError::storage("keyspace unavailable");
        assert!(matches!(storage_err, RideError::Storage { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = RideError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = RideError::api("test");
        assert!(api_err.user_message().contains("Unable to load the forecast"));

        let validation_err = RideError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ride_err: RideError = io_err.into();
        assert!(matches!(ride_err, RideError::Io { .. }));
    }
}
