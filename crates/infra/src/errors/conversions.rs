//! Storage-side failures mapped onto [`SalesDeskError`].
//!
//! HTTP failures are classified by the transport as [`ApiError`] and never
//! pass through here.
//!
//! [`ApiError`]: crate::api::ApiError

use salesdesk_domain::SalesDeskError;

/// Carrier for conversions the orphan rule keeps out of the domain crate
#[derive(Debug)]
pub struct InfraError(pub SalesDeskError);

impl From<InfraError> for SalesDeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<keyring::Error> for InfraError {
    fn from(err: keyring::Error) -> Self {
        let mapped = match err {
            keyring::Error::NoEntry => SalesDeskError::NotFound("no saved session in keychain".into()),
            keyring::Error::NoStorageAccess(inner) => {
                SalesDeskError::Storage(format!("keychain is locked or unavailable: {inner}"))
            }
            keyring::Error::BadEncoding(_) => {
                SalesDeskError::Storage("saved session in keychain is not UTF-8".into())
            }
            other => SalesDeskError::Storage(format!("keychain: {other}")),
        };
        Self(mapped)
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(err: serde_json::Error) -> Self {
        Self(SalesDeskError::Storage(format!("saved session is not valid JSON: {err}")))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(err: std::io::Error) -> Self {
        let mapped = if err.kind() == std::io::ErrorKind::NotFound {
            SalesDeskError::NotFound(err.to_string())
        } else {
            SalesDeskError::Storage(format!("session file: {err}"))
        };
        Self(mapped)
    }
}
