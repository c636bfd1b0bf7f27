//! API-specific error types
//!
//! Classification of REST failures; [`ApiError::should_retry`] drives the
//! transport's replay decision.

use std::time::Duration;

use salesdesk_domain::SalesDeskError;
use thiserror::Error;

/// Categories of API errors for retry logic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403) - session is over, never retried
    Authentication,
    /// Rate limiting errors (429) - retry with backoff
    RateLimit,
    /// Server errors (5xx) - retryable
    Server,
    /// Client errors (4xx except auth) - non-retryable
    Client,
    /// Network/connection errors - retryable
    Network,
    /// Configuration errors - non-retryable
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::NotFound(_) | Self::Client(_) | Self::Decode(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Check if this error should be retried
    pub fn should_retry(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network
        )
    }

    pub fn is_auth(&self) -> bool {
        self.category() == ApiErrorCategory::Authentication
    }
}

/// Everything except auth, not-found and configuration problems is a
/// `NetworkFailure` as far as the dashboard is concerned.
impl From<ApiError> for SalesDeskError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::AuthRejected(message),
            ApiError::NotFound(message) => Self::NotFound(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::Timeout(after) => Self::Network(format!("request timed out after {after:?}")),
            other @ (ApiError::RateLimit(_)
            | ApiError::Server(_)
            | ApiError::Client(_)
            | ApiError::Network(_)
            | ApiError::Decode(_)) => Self::Network(other.to_string()),
        }
    }
}
