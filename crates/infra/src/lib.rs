//! # SalesDesk Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest-based REST client and its adapters
//! - Credential stores (keychain, JSON file)
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `salesdesk-core`
//! - Contains all "impure" code (HTTP, keychain, filesystem)

pub mod api;
pub mod config;
pub mod context;
pub mod credentials;
pub mod errors;
pub mod http;
pub mod observability;

pub use api::{ApiAuthService, ApiClient, ApiClientConfig, ApiError, RecordsApi};
pub use context::DashboardContext;
pub use credentials::{credential_store_from_config, FileCredentialStore, KeychainCredentialStore};
pub use errors::InfraError;
pub use http::{HttpClient, RetryPolicy};
pub use observability::init_tracing;
