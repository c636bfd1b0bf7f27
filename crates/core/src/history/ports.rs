//! Port interfaces for record lookups
//!
//! These traits define the boundary between the history resolver and the
//! REST adapter that actually talks to the backend.

use async_trait::async_trait;
use salesdesk_domain::{Record, RecordId, Result};

/// Read access to records (`GET /records/...`)
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Prior records of the client identified by `phone`, excluding
    /// `exclude_id`, at most `limit` entries.
    async fn fetch_history(
        &self,
        phone: &str,
        exclude_id: RecordId,
        limit: usize,
    ) -> Result<Vec<Record>>;

    /// Full detail of a single record.
    async fn fetch_record(&self, id: RecordId) -> Result<Record>;
}
