//! Error types used throughout the dashboard core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for SalesDesk
///
/// The variants follow the three-way taxonomy the view layer cares about
/// (validation, network, authentication) plus a few plumbing categories.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SalesDeskError {
    /// Bad or missing input (unparseable date, empty identifier)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Timeout, unreachable host, non-2xx status or undecodable body
    #[error("Network error: {0}")]
    Network(String),

    /// The backend rejected the credentials or the bearer token (401/403)
    #[error("Authentication rejected: {0}")]
    AuthRejected(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable credential storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SalesDeskError {
    /// Whether the UI can carry on after showing this error.
    ///
    /// Authentication rejections are handled globally (forced logout) and
    /// configuration/storage problems need operator attention.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Network(_) | Self::NotFound(_))
    }

    /// Stable label suitable for structured log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Network(_) => "network",
            Self::AuthRejected(_) => "auth_rejected",
            Self::NotFound(_) => "not_found",
            Self::Config(_) => "config",
            Self::Storage(_) => "storage",
            Self::Internal(_) => "internal",
        }
    }

    /// Short message intended for display to the dashboard user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Network(_) => "Could not reach the server. Please try again.".to_string(),
            Self::AuthRejected(msg) => msg.clone(),
            Self::NotFound(_) => "The requested record no longer exists.".to_string(),
            Self::Config(_) | Self::Storage(_) | Self::Internal(_) => {
                "Something went wrong. Please contact support.".to_string()
            }
        }
    }
}

/// Result type alias for SalesDesk operations
pub type Result<T> = std::result::Result<T, SalesDeskError>;
