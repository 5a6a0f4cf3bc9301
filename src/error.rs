//! Error types and handling for the `Gompa` library

use thiserror::Error;

/// Main error type for the `Gompa` library
#[derive(Error, Debug)]
pub enum GompaError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Key/value storage errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Catalog data errors (malformed or invariant-violating records)
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

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

impl GompaError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new catalog error
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
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
            GompaError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            GompaError::Storage { .. } => {
                "Saved data could not be read or written. You may need to clear the app data."
                    .to_string()
            }
            GompaError::Catalog { .. } => {
                "The monastery catalog could not be loaded.".to_string()
            }
            GompaError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            GompaError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            GompaError::General { message } => message.clone(),
        }
    }
}
