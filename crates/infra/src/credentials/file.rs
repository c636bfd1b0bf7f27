//! JSON file credential store
//!
//! For machines without a usable keychain. The file holds a single
//! `{"token": ..., "role": ...}` object and is replaced atomically.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use salesdesk_core::CredentialStore;
use salesdesk_domain::{Result, SalesDeskError, StoredCredentials};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// Credential store persisted as a JSON file
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(InfraError::from(err).into()),
        };

        match serde_json::from_str(&contents) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(err) => {
                // A corrupt file means "log in again", not a startup failure.
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable credentials file");
                Ok(None)
            }
        }
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(InfraError::from)?;
        }

        let contents = serde_json::to_vec_pretty(credentials).map_err(|e| {
            SalesDeskError::Internal(format!("failed to encode credentials: {e}"))
        })?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents).map_err(InfraError::from)?;
        fs::rename(&tmp, &self.path).map_err(InfraError::from)?;
        debug!(path = %self.path.display(), "credentials written");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}
