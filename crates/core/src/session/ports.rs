//! Port interfaces for the session lifecycle

use async_trait::async_trait;
use salesdesk_domain::{LoginResponse, Result, StoredCredentials};

/// Credential exchange with the backend (`POST /auth/login`)
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange a passcode for a token and role.
    ///
    /// A wrong passcode must surface as `SalesDeskError::AuthRejected`.
    async fn exchange_passcode(&self, passcode: &str) -> Result<LoginResponse>;
}

/// Durable key-value storage for the token and role
pub trait CredentialStore: Send + Sync {
    /// Previously saved credentials, if any.
    fn load(&self) -> Result<Option<StoredCredentials>>;

    fn save(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Remove saved credentials. Idempotent.
    fn clear(&self) -> Result<()>;
}
