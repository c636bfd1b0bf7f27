//! REST adapters for records and the sales summary

use std::sync::Arc;

use async_trait::async_trait;
use salesdesk_core::{RecordSource, SummarySource};
use salesdesk_domain::{
    HistoryResponse, Record, RecordId, Result, SalesDeskError, SummaryFilter, SummaryPayload,
};
use tracing::{debug, instrument};

use super::client::ApiClient;

/// Records and summary endpoints of the backend
#[derive(Clone)]
pub struct RecordsApi {
    client: Arc<ApiClient>,
}

impl RecordsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordSource for RecordsApi {
    #[instrument(skip(self, phone))]
    async fn fetch_history(
        &self,
        phone: &str,
        exclude_id: RecordId,
        limit: usize,
    ) -> Result<Vec<Record>> {
        let path = format!("/records/history/{}", urlencoding::encode(phone));
        let exclude_id = exclude_id.to_string();
        let limit = limit.to_string();

        let response: HistoryResponse = self
            .client
            .get(&path, &[("exclude_id", exclude_id.as_str()), ("limit", limit.as_str())])
            .await
            .map_err(SalesDeskError::from)?;

        debug!(count = response.records.len(), "history response decoded");
        Ok(response.records)
    }

    #[instrument(skip(self))]
    async fn fetch_record(&self, id: RecordId) -> Result<Record> {
        self.client.get(&format!("/records/{id}"), &[]).await.map_err(SalesDeskError::from)
    }
}

#[async_trait]
impl SummarySource for RecordsApi {
    #[instrument(skip(self))]
    async fn fetch_summary(&self, filter: &SummaryFilter) -> Result<Option<SummaryPayload>> {
        self.client
            .get("/sales/summary", &filter.query_pairs())
            .await
            .map_err(SalesDeskError::from)
    }
}
