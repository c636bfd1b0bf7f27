//! API authentication
//!
//! Passcode login against `POST /auth/login` and the bearer-token provider
//! the [`ApiClient`](super::ApiClient) consults on every call.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use salesdesk_core::{AuthGateway, SessionManager};
use salesdesk_domain::{LoginRequest, LoginResponse, Result, SalesDeskError};
use tracing::{debug, instrument};

use super::client::{join_url, normalize_base_url, read_json};
use super::errors::ApiError;
use crate::http::HttpClient;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Current bearer token, or `ApiError::Auth` when there is none.
    async fn access_token(&self) -> std::result::Result<String, ApiError>;

    /// Called with the token the backend just rejected (401/403).
    fn invalidate(&self, _rejected_token: &str) {}
}

/// Token provider backed by the dashboard session
///
/// Invalidation forces the session back to anonymous, which the view layer
/// observes and answers with a redirect to the login screen.
pub struct SessionTokenProvider {
    session: Arc<SessionManager>,
}

impl SessionTokenProvider {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl AccessTokenProvider for SessionTokenProvider {
    async fn access_token(&self) -> std::result::Result<String, ApiError> {
        self.session.token().ok_or_else(|| ApiError::Auth("not logged in".into()))
    }

    fn invalidate(&self, rejected_token: &str) {
        self.session.handle_auth_rejected(rejected_token);
    }
}

/// Passcode exchange against the backend
pub struct ApiAuthService {
    http_client: HttpClient,
    base_url: String,
}

impl ApiAuthService {
    /// # Errors
    /// Returns `ApiError::Config` for an unparseable base URL.
    pub fn new(http_client: HttpClient, base_url: &str) -> std::result::Result<Self, ApiError> {
        Ok(Self { http_client, base_url: normalize_base_url(base_url)? })
    }

    async fn login(&self, passcode: &str) -> std::result::Result<LoginResponse, ApiError> {
        let url = join_url(&self.base_url, "/auth/login");
        let request = self
            .http_client
            .request(Method::POST, &url)
            .json(&LoginRequest { passcode: passcode.to_string() });

        // Login is not idempotent from the backend's point of view
        let response = self.http_client.send_once(request).await?;
        read_json(response, &url).await
    }
}

#[async_trait]
impl AuthGateway for ApiAuthService {
    #[instrument(skip_all)]
    async fn exchange_passcode(&self, passcode: &str) -> Result<LoginResponse> {
        let response = self.login(passcode).await.map_err(SalesDeskError::from)?;
        debug!(role = %response.role, "passcode accepted");
        Ok(response)
    }
}
