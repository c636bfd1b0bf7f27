//! Shared test helpers for `salesdesk-core` integration tests.
//!
//! In-memory implementations of the core ports so tests can focus on
//! behaviour instead of plumbing.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use salesdesk_core::{AuthGateway, RecordSource, SummarySource};
use salesdesk_domain::{
    LoginResponse, Record, RecordId, Result as DomainResult, Role, SalesDeskError, SummaryFilter,
    SummaryPayload,
};
use tokio::sync::oneshot;

/// Build a record with the fields the history flow cares about.
pub fn record(id: RecordId, phone: &str, client: &str) -> Record {
    Record {
        id,
        client_name: Some(client.to_string()),
        phone: Some(phone.to_string()),
        delivery_date: Some("2024-05-01".to_string()),
        ..Default::default()
    }
}

/// A single `fetch_history` call as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCall {
    pub phone: String,
    pub exclude_id: RecordId,
    pub limit: usize,
}

/// In-memory `RecordSource`.
///
/// History is keyed by phone. A gate can hold the next history call until
/// the test releases it, which lets tests interleave a detail-view change.
#[derive(Default)]
pub struct MockRecordSource {
    history: Mutex<HashMap<String, Vec<Record>>>,
    records: Mutex<HashMap<RecordId, Record>>,
    history_error: Mutex<Option<SalesDeskError>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    record_gates: Mutex<HashMap<RecordId, oneshot::Receiver<()>>>,
    pub history_calls: Mutex<Vec<HistoryCall>>,
    pub record_calls: Mutex<Vec<RecordId>>,
}

impl MockRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(self, phone: &str, records: Vec<Record>) -> Self {
        self.history.lock().insert(phone.to_string(), records);
        self
    }

    pub fn with_record(self, record: Record) -> Self {
        self.records.lock().insert(record.id, record);
        self
    }

    pub fn fail_history_with(self, error: SalesDeskError) -> Self {
        *self.history_error.lock() = Some(error);
        self
    }

    /// Hold the next history call until the returned sender fires.
    pub fn hold_next_history(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock() = Some(rx);
        tx
    }

    /// Hold the next detail fetch of `id` until the returned sender fires.
    pub fn hold_record(&self, id: RecordId) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.record_gates.lock().insert(id, rx);
        tx
    }

    pub fn history_call_count(&self) -> usize {
        self.history_calls.lock().len()
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn fetch_history(
        &self,
        phone: &str,
        exclude_id: RecordId,
        limit: usize,
    ) -> DomainResult<Vec<Record>> {
        self.history_calls.lock().push(HistoryCall {
            phone: phone.to_string(),
            exclude_id,
            limit,
        });

        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if let Some(err) = self.history_error.lock().clone() {
            return Err(err);
        }
        Ok(self.history.lock().get(phone).cloned().unwrap_or_default())
    }

    async fn fetch_record(&self, id: RecordId) -> DomainResult<Record> {
        self.record_calls.lock().push(id);

        let gate = self.record_gates.lock().remove(&id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.records
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| SalesDeskError::NotFound(format!("record {id}")))
    }
}

/// `SummarySource` returning a canned payload (or nothing).
pub struct StaticSummarySource {
    payload: Option<SummaryPayload>,
    pub filters: Mutex<Vec<SummaryFilter>>,
}

impl StaticSummarySource {
    pub fn new(payload: Option<SummaryPayload>) -> Arc<Self> {
        Arc::new(Self { payload, filters: Mutex::new(Vec::new()) })
    }
}

#[async_trait]
impl SummarySource for StaticSummarySource {
    async fn fetch_summary(&self, filter: &SummaryFilter) -> DomainResult<Option<SummaryPayload>> {
        self.filters.lock().push(filter.clone());
        Ok(self.payload.clone())
    }
}

/// `AuthGateway` accepting exactly one passcode.
pub struct FixedPasscodeGateway {
    passcode: String,
    role: Role,
    pub attempts: Mutex<usize>,
}

impl FixedPasscodeGateway {
    pub fn new(passcode: &str, role: Role) -> Arc<Self> {
        Arc::new(Self { passcode: passcode.to_string(), role, attempts: Mutex::new(0) })
    }
}

#[async_trait]
impl AuthGateway for FixedPasscodeGateway {
    async fn exchange_passcode(&self, passcode: &str) -> DomainResult<LoginResponse> {
        *self.attempts.lock() += 1;
        if passcode == self.passcode {
            Ok(LoginResponse { access_token: format!("token-for-{passcode}"), role: self.role.clone() })
        } else {
            Err(SalesDeskError::AuthRejected("HTTP 401".into()))
        }
    }
}
