//! Dashboard wiring
//!
//! [`DashboardContext`] builds every adapter from a [`Config`] and exposes
//! the operations the view layer calls.

use std::sync::Arc;

use salesdesk_core::{
    warranty_or_none, Clock, CredentialStore, HistoryOutcome, HistoryResolver, SessionManager,
    SummaryService, SwitchOutcome, SystemClock,
};
use salesdesk_domain::{
    Config, Record, RecordId, Result, Role, SalesDeskError, SummaryFilter, SummaryViewModel,
    WarrantyStatus,
};
use tracing::{info, warn};

use crate::api::{ApiAuthService, ApiClient, ApiClientConfig, RecordsApi, SessionTokenProvider};
use crate::credentials::credential_store_from_config;

/// Everything the dashboard needs, wired together
pub struct DashboardContext {
    config: Config,
    session: Arc<SessionManager>,
    history: HistoryResolver,
    summary: SummaryService,
    clock: Arc<dyn Clock>,
}

impl DashboardContext {
    /// Build the context and restore any persisted session.
    ///
    /// # Errors
    /// Returns `SalesDeskError::Config` for invalid configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = credential_store_from_config(&config.session)?;
        Self::with_parts(config, store, Arc::new(SystemClock))
    }

    /// Build the context with an explicit credential store and clock.
    ///
    /// # Errors
    /// Returns `SalesDeskError::Config` for invalid configuration.
    pub fn with_parts(
        config: Config,
        store: Arc<dyn CredentialStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        let client_config = ApiClientConfig::from(&config.api);
        let http = client_config.http_client().map_err(SalesDeskError::from)?;

        let gateway = ApiAuthService::new(http.clone(), &client_config.base_url)
            .map_err(SalesDeskError::from)?;
        let session = Arc::new(SessionManager::new(Arc::new(gateway), store));
        match session.restore() {
            Ok(true) => info!("resumed previous session"),
            Ok(false) => {}
            Err(err) => warn!(error = %err, "could not restore previous session"),
        }

        let token_provider = Arc::new(SessionTokenProvider::new(session.clone()));
        let client = ApiClient::builder()
            .config(client_config)
            .http_client(http)
            .auth(token_provider)
            .build()
            .map_err(SalesDeskError::from)?;
        let records = Arc::new(RecordsApi::new(Arc::new(client)));

        let history =
            HistoryResolver::new(records.clone()).with_page_size(config.api.history_limit);
        let summary = SummaryService::new(records);

        Ok(Self { config, session, history, summary, clock })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Detail-view state (displayed record and its history).
    pub fn history(&self) -> &HistoryResolver {
        &self.history
    }

    /// # Errors
    /// See [`SessionManager::login`].
    pub async fn login(&self, passcode: &str) -> Result<Role> {
        self.session.login(passcode).await
    }

    pub fn logout(&self) {
        self.history.close();
        self.session.logout();
    }

    pub async fn fetch_history(&self, phone: Option<&str>, exclude_id: RecordId) -> HistoryOutcome {
        self.history.fetch_history(phone, exclude_id).await
    }

    pub async fn switch_record(&self, id: RecordId) -> SwitchOutcome {
        self.history.switch_record(id).await
    }

    /// # Errors
    /// Network and authentication failures from the summary endpoint.
    pub async fn summary_view(&self, filter: &SummaryFilter) -> Result<SummaryViewModel> {
        self.summary.load(filter).await
    }

    /// Warranty of `record` as of now; `None` when it has no usable
    /// delivery date.
    pub fn warranty(&self, record: &Record) -> Option<WarrantyStatus> {
        warranty_or_none(record, self.clock.now())
    }
}
