//! Record history resolver
//!
//! Owns the record currently shown in the detail view and the purchase
//! history listed under it. Every change of the displayed record bumps a
//! generation counter; a history response that comes back for an older
//! generation is discarded instead of applied.

use std::sync::Arc;

use parking_lot::Mutex;
use salesdesk_domain::constants::HISTORY_PAGE_SIZE;
use salesdesk_domain::{Record, RecordId, SalesDeskError};
use tracing::{debug, info, instrument, warn};

use super::ports::RecordSource;

/// Outcome of a history lookup
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryOutcome {
    /// No client identifier; nothing was requested
    Skipped,
    Loaded(Vec<Record>),
    /// The lookup failed; the view shows "no history"
    Failed(SalesDeskError),
    /// The displayed record changed while the lookup was in flight
    Stale,
}

impl HistoryOutcome {
    /// Records to display; empty for every outcome but `Loaded`.
    pub fn records(&self) -> &[Record] {
        match self {
            Self::Loaded(records) => records,
            Self::Skipped | Self::Failed(_) | Self::Stale => &[],
        }
    }

    pub fn error(&self) -> Option<&SalesDeskError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Outcome of switching the detail view to a related record
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchOutcome {
    Switched(Record),
    /// Detail fetch failed; the caller should open the edit flow for the id
    /// that was clicked
    OpenEditor { record_id: RecordId, reason: SalesDeskError },
    /// The detail view changed before the fetch finished; nothing applied
    Superseded { record_id: RecordId },
}

#[derive(Debug, Default)]
struct DetailState {
    generation: u64,
    current: Option<Record>,
    history: Vec<Record>,
}

/// Resolves and tracks client purchase history for the detail view
pub struct HistoryResolver {
    source: Arc<dyn RecordSource>,
    page_size: usize,
    state: Mutex<DetailState>,
}

impl HistoryResolver {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source, page_size: HISTORY_PAGE_SIZE, state: Mutex::new(DetailState::default()) }
    }

    /// Override the history page size (minimum 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch prior records for a client.
    ///
    /// A missing or blank phone short-circuits to `Skipped` without a network
    /// call. Failures are logged and returned as `Failed`, never propagated.
    /// If the displayed record changes while the request is in flight the
    /// response is dropped and `Stale` is returned.
    #[instrument(skip(self, phone))]
    pub async fn fetch_history(&self, phone: Option<&str>, exclude_id: RecordId) -> HistoryOutcome {
        let generation = self.generation();
        let outcome = self.lookup(phone, exclude_id).await;

        if self.generation() != generation {
            debug!(exclude_id, "discarding history response for a record no longer displayed");
            return HistoryOutcome::Stale;
        }
        outcome
    }

    async fn lookup(&self, phone: Option<&str>, exclude_id: RecordId) -> HistoryOutcome {
        let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) else {
            debug!("no client identifier; skipping history lookup");
            return HistoryOutcome::Skipped;
        };

        match self.source.fetch_history(phone, exclude_id, self.page_size).await {
            Ok(records) => {
                let records: Vec<Record> = records
                    .into_iter()
                    .filter(|record| record.id != exclude_id)
                    .take(self.page_size)
                    .collect();
                debug!(count = records.len(), "client history loaded");
                HistoryOutcome::Loaded(records)
            }
            Err(err) => {
                warn!(error = %err, kind = err.label(), "client history lookup failed");
                HistoryOutcome::Failed(err)
            }
        }
    }

    /// Show `record` in the detail view. Clears the history list and
    /// invalidates any lookup still in flight. Returns the new generation.
    pub fn open(&self, record: Record) -> u64 {
        let mut state = self.state.lock();
        state.generation += 1;
        state.current = Some(record);
        state.history.clear();
        state.generation
    }

    /// Close the detail view.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.generation += 1;
        state.current = None;
        state.history.clear();
    }

    /// Load history for the displayed record and apply it if that record is
    /// still displayed when the response arrives.
    pub async fn load_history(&self) -> HistoryOutcome {
        let (generation, phone, record_id) = {
            let state = self.state.lock();
            match &state.current {
                Some(record) => (
                    state.generation,
                    record.client_identifier().map(str::to_string),
                    record.id,
                ),
                None => return HistoryOutcome::Skipped,
            }
        };

        let outcome = self.lookup(phone.as_deref(), record_id).await;

        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(record_id, "discarding history response for a record no longer displayed");
            return HistoryOutcome::Stale;
        }
        state.history = outcome.records().to_vec();
        outcome
    }

    /// Replace the displayed record with the full detail of `id`.
    ///
    /// On success the history list is cleared. On failure the displayed
    /// record is left alone and the caller is told to open the edit flow.
    /// When the detail view changed while the fetch was in flight (a later
    /// switch, `open` or `close`) the result is `Superseded` and nothing is
    /// applied.
    #[instrument(skip(self))]
    pub async fn switch_record(&self, id: RecordId) -> SwitchOutcome {
        let generation = self.generation();
        let fetched = self.source.fetch_record(id).await;

        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(record_id = id, "detail view moved on; dropping record switch");
            return SwitchOutcome::Superseded { record_id: id };
        }

        match fetched {
            Ok(record) => {
                state.generation += 1;
                state.current = Some(record.clone());
                state.history.clear();
                info!(record_id = id, "switched detail view to related record");
                SwitchOutcome::Switched(record)
            }
            Err(err) => {
                warn!(record_id = id, error = %err, "record detail fetch failed; falling back to editor");
                SwitchOutcome::OpenEditor { record_id: id, reason: err }
            }
        }
    }

    /// Record currently displayed, if any.
    pub fn current(&self) -> Option<Record> {
        self.state.lock().current.clone()
    }

    /// History currently displayed.
    pub fn history(&self) -> Vec<Record> {
        self.state.lock().history.clone()
    }

    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }
}
