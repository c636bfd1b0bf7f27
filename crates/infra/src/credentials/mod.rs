//! Durable credential stores for the session token and role

pub mod file;
pub mod keychain;

use std::path::PathBuf;
use std::sync::Arc;

use salesdesk_core::{CredentialStore, MemoryCredentialStore};
use salesdesk_domain::{CredentialStoreKind, Result, SalesDeskError, SessionConfig};

pub use file::FileCredentialStore;
pub use keychain::KeychainCredentialStore;

/// Build the store selected by `session.store`.
///
/// # Errors
/// Returns `SalesDeskError::Config` when the file store has no path.
pub fn credential_store_from_config(config: &SessionConfig) -> Result<Arc<dyn CredentialStore>> {
    let store: Arc<dyn CredentialStore> = match config.store {
        CredentialStoreKind::Keychain => Arc::new(KeychainCredentialStore::new(
            &config.keychain_service,
            &config.keychain_account,
        )),
        CredentialStoreKind::File => {
            let path = config.file_path.as_deref().ok_or_else(|| {
                SalesDeskError::Config("session.file_path is required for the file store".into())
            })?;
            Arc::new(FileCredentialStore::new(PathBuf::from(path)))
        }
        CredentialStoreKind::Memory => Arc::new(MemoryCredentialStore::new()),
    };
    Ok(store)
}
