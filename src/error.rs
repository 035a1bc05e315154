//! Error types for the Brandforge theme generator
//!
//! This module provides comprehensive error handling using thiserror for
//! structured error definitions and anyhow for error propagation.
//!
//! Only service failures are fatal to a run. Color and merge problems are
//! recovered where they happen and surface as warnings.

use thiserror::Error;

/// Main error type for Brandforge operations
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Malformed hex color input
    #[error("Invalid color format: {0}")]
    InvalidColorFormat(String),

    /// Generative-text service rate limited the request (retryable)
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Generative-text service is overloaded (retryable)
    #[error("Service overloaded: {0}")]
    ServiceOverloaded(String),

    /// A retryable failure persisted through every attempt
    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<ThemeError>,
    },

    /// LLM API request failed
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// API key rejected
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Merged document failed the well-formedness check
    #[error("Merged document rejected: {0}")]
    MergeValidation(String),

    /// Generated content payload could not be parsed
    #[error("Content parse error: {0}")]
    ContentParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl ThemeError {
    /// Whether the retry wrapper may try the call again.
    ///
    /// Only rate-limit and overload responses qualify; everything else
    /// propagates on first occurrence.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ThemeError::RateLimitExceeded(_) | ThemeError::ServiceOverloaded(_)
        )
    }
}

/// Result type alias for Brandforge operations
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Convert anyhow::Error to ThemeError
impl From<anyhow::Error> for ThemeError {
    fn from(err: anyhow::Error) -> Self {
        ThemeError::Other(err.to_string())
    }
}
