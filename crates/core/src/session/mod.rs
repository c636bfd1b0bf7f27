//! Authentication session lifecycle

pub mod manager;
pub mod memory_store;
pub mod ports;

pub use manager::SessionManager;
pub use memory_store::MemoryCredentialStore;
pub use ports::{AuthGateway, CredentialStore};
