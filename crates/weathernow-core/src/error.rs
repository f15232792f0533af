//! Application-level error types for weathernow.
//!
//! Lookup failures live in `weathernow_weather::LookupError` and are shown to
//! the user by the session itself. The types here cover everything that can go
//! wrong before a lookup can even start: reading configuration and building
//! the HTTP client.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a message suitable for the terminal.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the terminal.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
        }
    }
}

/// HTTP client construction failed (bad TLS backend, invalid header value).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(#[from] reqwest::Error),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ClientSetup(_) => {
                "Could not prepare the HTTP client. Check your settings."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Failed to read configuration: {0}")]
    Unreadable(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration file not found. Check the --config path.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Unreadable(_) => "Configuration file could not be read.",
        }
    }
}
