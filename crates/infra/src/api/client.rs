//! REST client for the SalesDesk backend
//!
//! Attaches the bearer token to every call, bounds each call with the
//! configured timeout and reports 401/403 to the token provider so the
//! session can be ended.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use salesdesk_domain::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS,
};
use salesdesk_domain::ApiConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use crate::http::{HttpClient, RetryPolicy};

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "http://localhost:8000/api")
    pub base_url: String,
    /// Upper bound for a whole call, retries included
    pub timeout: Duration,
    /// Total attempts for GET requests
    pub max_attempts: usize,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            max_attempts: config.max_attempts,
        }
    }
}

impl ApiClientConfig {
    /// Shared transport matching this configuration.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the reqwest client cannot be built.
    pub fn http_client(&self) -> Result<HttpClient, ApiError> {
        HttpClient::new(self.timeout, RetryPolicy::new(self.max_attempts))
    }
}

/// Authenticated API client
pub struct ApiClient {
    http_client: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new API client with its own transport.
    ///
    /// # Errors
    /// Returns `ApiError::Config` for an unparseable base URL or if the HTTP
    /// client cannot be created.
    pub fn new(
        config: ApiClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        let http_client = config.http_client()?;
        Self::with_http_client(config, http_client, auth)
    }

    /// Create a client sharing an existing transport.
    ///
    /// # Errors
    /// Returns `ApiError::Config` for an unparseable base URL.
    pub fn with_http_client(
        config: ApiClientConfig,
        http_client: HttpClient,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;
        Ok(Self { http_client, auth, base_url, timeout: config.timeout })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute an authenticated GET request.
    ///
    /// Retried on connection failures and 5xx. A 401/403 invalidates the
    /// token before the error is returned.
    ///
    /// # Errors
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = join_url(&self.base_url, path);
        debug!("GET request");

        let (request, token) = self.authorized(Method::GET, &url).await?;
        let response = self.bounded(self.http_client.send(request.query(query))).await?;
        self.finish(response, &url, &token).await
    }

    /// Execute an authenticated POST request. Never retried.
    ///
    /// # Errors
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let url = join_url(&self.base_url, path);
        debug!("POST request");

        let (request, token) = self.authorized(Method::POST, &url).await?;
        let response = self.bounded(self.http_client.send_once(request.json(body))).await?;
        self.finish(response, &url, &token).await
    }

    /// Request carrying the current bearer token, and that token.
    async fn authorized(
        &self,
        method: Method,
        url: &str,
    ) -> Result<(RequestBuilder, String), ApiError> {
        let token = self.auth.access_token().await?;
        let request = self
            .http_client
            .request(method, url)
            .bearer_auth(&token)
            .header("Accept", "application/json");
        Ok((request, token))
    }

    async fn bounded<F>(&self, send: F) -> Result<Response, ApiError>
    where
        F: std::future::Future<Output = Result<Response, ApiError>>,
    {
        tokio::time::timeout(self.timeout, send)
            .await
            .unwrap_or(Err(ApiError::Timeout(self.timeout)))
    }

    async fn finish<T: DeserializeOwned>(
        &self,
        response: Response,
        url: &str,
        token: &str,
    ) -> Result<T, ApiError> {
        let result = read_json(response, url).await;
        if let Err(err) = &result {
            if err.is_auth() {
                warn!("backend rejected bearer token");
                self.auth.invalidate(token);
            }
        }
        result
    }
}

/// Decode a response body, mapping non-2xx statuses onto [`ApiError`].
///
/// 204/205 responses decode from JSON `null`, so `()` and `Option<T>` work.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    url: &str,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(map_status_error(status, url, body));
    }

    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            ApiError::Decode(format!(
                "No content response ({}), but response type cannot be deserialized from empty body",
                status.as_u16()
            ))
        });
    }

    response.json().await.map_err(|e| ApiError::Decode(format!("{}: {}", url, e)))
}

pub(crate) fn map_status_error(status: StatusCode, url: &str, body: String) -> ApiError {
    let message = if body.is_empty() {
        format!("{} returned status {}", url, status)
    } else {
        format!("{} returned status {}: {}", url, status, body)
    };

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ApiError::Auth(message)
    } else if status == StatusCode::NOT_FOUND {
        ApiError::NotFound(message)
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        ApiError::RateLimit(message)
    } else if status.is_server_error() {
        ApiError::Server(message)
    } else if status.is_client_error() {
        ApiError::Client(message)
    } else {
        ApiError::Network(message)
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| ApiError::Config(format!("Invalid base URL {raw:?}: {e}")))?;
    Ok(trimmed.to_string())
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url, path.trim_start_matches('/'))
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    http_client: Option<HttpClient>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Reuse an existing transport
    pub fn http_client(mut self, http_client: HttpClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Set the authentication provider
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let auth =
            self.auth.ok_or_else(|| ApiError::Config("Auth provider not set".to_string()))?;

        match self.http_client {
            Some(http_client) => ApiClient::with_http_client(config, http_client, auth),
            None => ApiClient::new(config, auth),
        }
    }
}
