//! Backend REST API client
//!
//! Bearer-token client, passcode login and the adapters implementing the
//! core record and summary ports.

pub mod auth;
pub mod client;
pub mod errors;
pub mod records;

pub use auth::{AccessTokenProvider, ApiAuthService, SessionTokenProvider};
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::{ApiError, ApiErrorCategory};
pub use records::RecordsApi;
