//! Reqwest transport shared by the API client and the login call
//!
//! Every attempt is bounded by the reqwest timeout. Idempotent requests go
//! through [`HttpClient::send`] and are replayed on transport failures and
//! 5xx responses; everything else uses [`HttpClient::send_once`].

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use salesdesk_domain::constants::DEFAULT_API_MAX_ATTEMPTS;
use tracing::debug;

use crate::api::ApiError;

const USER_AGENT: &str = concat!("salesdesk/", env!("CARGO_PKG_VERSION"));

/// Attempts for idempotent requests and the first backoff delay, doubled
/// after each retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: usize,
    base_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: usize) -> Self {
        Self { attempts: attempts.max(1), base_backoff: Duration::from_millis(250) }
    }

    /// One attempt, no retries.
    pub fn single() -> Self {
        Self::new(1)
    }

    pub fn with_base_backoff(mut self, base_backoff: Duration) -> Self {
        self.base_backoff = base_backoff;
        self
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Wait before retry number `retry` (1-based).
    fn delay(&self, retry: usize) -> Duration {
        let exponent = retry.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(2u32.pow(exponent))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_API_MAX_ATTEMPTS)
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    retry: RetryPolicy,
}

impl HttpClient {
    /// # Errors
    /// Returns `ApiError::Config` if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration, retry: RetryPolicy) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .no_proxy()
            .build()
            .map_err(|err| ApiError::Config(format!("cannot build HTTP client: {err}")))?;
        Ok(Self { client, retry })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send an idempotent request, replaying it while the policy allows.
    ///
    /// A 5xx on the last attempt is returned as a response so the caller can
    /// read its body.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let mut retry = 0;
        loop {
            let attempt = request.try_clone().ok_or_else(|| {
                ApiError::Config("streaming request bodies cannot be replayed".into())
            })?;
            let last = retry + 1 >= self.retry.attempts;

            match attempt.send().await {
                Ok(response) if response.status().is_server_error() && !last => {
                    debug!(status = %response.status(), retry, "server error, retrying");
                }
                Ok(response) => return Ok(response),
                Err(err) => {
                    let err = transport_error(err);
                    if last || !err.should_retry() {
                        return Err(err);
                    }
                    debug!(error = %err, retry, "transport failure, retrying");
                }
            }

            retry += 1;
            tokio::time::sleep(self.retry.delay(retry)).await;
        }
    }

    /// Send a request exactly once.
    pub async fn send_once(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        request.send().await.map_err(transport_error)
    }
}

/// Failures before any status line was read.
fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::Config(format!("invalid request: {err}"))
    } else if err.is_timeout() {
        ApiError::Network(format!("request timed out: {err}"))
    } else if err.is_connect() {
        ApiError::Network(format!("could not connect: {err}"))
    } else {
        ApiError::Network(err.to_string())
    }
}
