//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS,
    DEFAULT_KEYCHAIN_ACCOUNT, DEFAULT_KEYCHAIN_SERVICE, HISTORY_PAGE_SIZE,
};
use crate::errors::{Result, SalesDeskError};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// REST backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Upper bound per request; generous to tolerate a slow-starting backend
    pub timeout_seconds: u64,
    /// Total attempts for idempotent requests (initial try + retries)
    pub max_attempts: usize,
    pub history_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_API_TIMEOUT_SECS,
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
            history_limit: HISTORY_PAGE_SIZE,
        }
    }
}

/// Where the session token and role are persisted between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStoreKind {
    #[default]
    Keychain,
    File,
    Memory,
}

crate::impl_status_conversions!(CredentialStoreKind {
    Keychain => "keychain",
    File => "file",
    Memory => "memory",
});

/// Session persistence configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub store: CredentialStoreKind,
    pub keychain_service: String,
    pub keychain_account: String,
    /// Only used by the `file` store
    pub file_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: CredentialStoreKind::Keychain,
            keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string(),
            keychain_account: DEFAULT_KEYCHAIN_ACCOUNT.to_string(),
            file_path: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

impl Config {
    /// Reject values that would make the client unusable.
    ///
    /// # Errors
    /// Returns `SalesDeskError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(SalesDeskError::Config("api.base_url must not be empty".into()));
        }
        if self.api.timeout_seconds == 0 {
            return Err(SalesDeskError::Config("api.timeout_seconds must be positive".into()));
        }
        if self.api.max_attempts == 0 {
            return Err(SalesDeskError::Config("api.max_attempts must be at least 1".into()));
        }
        if self.api.history_limit == 0 {
            return Err(SalesDeskError::Config("api.history_limit must be positive".into()));
        }
        if self.session.store == CredentialStoreKind::File && self.session.file_path.is_none() {
            return Err(SalesDeskError::Config(
                "session.file_path is required when session.store = \"file\"".into(),
            ));
        }
        Ok(())
    }
}
