//! Error types for the Vigil screener

use thiserror::Error;

/// Failure reported by an upstream data provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider call exceeded its per-call timeout
    #[error("provider call timed out")]
    Timeout,

    /// The provider throttled the request
    #[error("provider rate limit exceeded")]
    RateLimited,

    /// The token does not exist upstream (terminal, not retryable)
    #[error("token not found upstream")]
    NotFound,

    /// Any other upstream failure
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl ProviderError {
    /// Whether a caller-driven retry with backoff is reasonable
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Timeout | ProviderError::RateLimited)
    }
}

/// Screener-level errors
#[derive(Error, Debug)]
pub enum ScreenerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Malformed token identifier (returned immediately, never retried)
    #[error("Invalid token identifier: {0}")]
    InvalidInput(String),

    /// A provider call failed
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The caller's deadline expired or the operation was cancelled
    #[error("Screening cancelled")]
    Canceled,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type ScreenerResult<T> = Result<T, ScreenerError>;
