//! Error types and handling for the heritage explorer

use thiserror::Error;

/// Main error type for the heritage explorer
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Place source (dataset or geocoding) failures
    #[error("Place source error: {message}")]
    Source { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl ExplorerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new place source error
    pub fn source<S: Into<String>>(message: S) -> Self {
        Self::Source {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ExplorerError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            ExplorerError::Source { .. } => {
                "No places found. Try another search.".to_string()
            }
            ExplorerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

impl From<reqwest::Error> for ExplorerError {
    fn from(err: reqwest::Error) -> Self {
        ExplorerError::source(err.to_string())
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        ExplorerError::source(format!("malformed JSON: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ExplorerError::config("bad page size");
        assert!(matches!(config_err, ExplorerError::Config { .. }));

        let source_err = ExplorerError::source("connection refused");
        assert!(matches!(source_err, ExplorerError::Source { .. }));

        let validation_err = ExplorerError::validation("invalid coordinates");
        assert!(matches!(validation_err, ExplorerError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = ExplorerError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let source_err = ExplorerError::source("test");
        assert_eq!(source_err.user_message(), "No places found. Try another search.");

        let validation_err = ExplorerError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let err: ExplorerError = json_err.into();
        assert!(err.to_string().contains("malformed JSON"));
    }
}
