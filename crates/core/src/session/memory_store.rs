//! In-process credential store
//!
//! Used when persistence is disabled (`session.store = "memory"`) and as a
//! test double.

use parking_lot::Mutex;
use salesdesk_domain::{Result, StoredCredentials};

use super::ports::CredentialStore;

/// Credential store that forgets everything on restart
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<StoredCredentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with credentials, as if saved by an earlier run.
    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self { slot: Mutex::new(Some(credentials)) }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        *self.slot.lock() = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock() = None;
        Ok(())
    }
}
