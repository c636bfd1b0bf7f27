//! Platform keychain credential store
//!
//! The token and role are kept together as one JSON secret under
//! `(service, account)`.

use keyring::Entry;
use salesdesk_core::CredentialStore;
use salesdesk_domain::{Result, SalesDeskError, StoredCredentials};
use tracing::debug;

use crate::errors::InfraError;

/// Credential store backed by the OS keychain
pub struct KeychainCredentialStore {
    service: String,
    account: String,
}

impl KeychainCredentialStore {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self { service: service.into(), account: account.into() }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, &self.account).map_err(|e| InfraError::from(e).into())
    }
}

impl CredentialStore for KeychainCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>> {
        let secret = match self.entry()?.get_password() {
            Ok(secret) => secret,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(err) => return Err(InfraError::from(err).into()),
        };

        let credentials = serde_json::from_str(&secret).map_err(InfraError::from)?;
        debug!(service = %self.service, "credentials loaded from keychain");
        Ok(Some(credentials))
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        let secret = serde_json::to_string(credentials).map_err(|e| {
            SalesDeskError::Internal(format!("failed to encode credentials: {e}"))
        })?;
        self.entry()?.set_password(&secret).map_err(InfraError::from)?;
        debug!(service = %self.service, "credentials stored in keychain");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}
