//! Port interfaces for the sales summary view

use async_trait::async_trait;
use salesdesk_domain::{Result, SummaryFilter, SummaryPayload};

/// Source of aggregate sales statistics (`GET /sales/summary`)
#[async_trait]
pub trait SummarySource: Send + Sync {
    /// Fetch the summary for the given filter.
    ///
    /// `Ok(None)` means the backend had nothing to report.
    async fn fetch_summary(&self, filter: &SummaryFilter) -> Result<Option<SummaryPayload>>;
}
