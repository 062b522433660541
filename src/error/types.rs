//! Error type definitions
//!
//! Defines the main error types used throughout the redemption pipeline.
//!
//! Per-code redemption failures are deliberately not represented here:
//! they are captured at the redemption client boundary and returned as
//! [`crate::types::RedeemOutcome::Failed`] values so that one failing code
//! never aborts a batch.

use thiserror::Error;

/// Main error type for the redemption pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Login session cookies missing or empty after the browser wait
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Token endpoint returned a non-zero envelope code
    #[error("Token API error (code {code}): {message}")]
    TokenApi {
        /// Envelope code returned by the endpoint
        code: i64,
        /// Message carried alongside the code, if any
        message: String,
    },

    /// Browser automation errors (launch, navigation, wait timeout)
    #[error("Browser error: {0}")]
    Browser(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP client errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a token API error
    pub fn token_api(code: i64, message: impl Into<String>) -> Self {
        Self::TokenApi {
            code,
            message: message.into(),
        }
    }

    /// Create a new browser error
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
