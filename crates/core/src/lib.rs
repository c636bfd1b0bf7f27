//! # SalesDesk Core
//!
//! Pure business logic for the sales dashboard - no HTTP, keychain or
//! filesystem code.
//!
//! This crate contains:
//! - Warranty evaluation
//! - Summary view-model building
//! - Client history resolution for the record detail view
//! - The authentication session state machine
//!
//! ## Architecture Principles
//! - Only depends on `salesdesk-domain`
//! - All external dependencies via traits (ports)
//! - Pure, testable business logic

pub mod clock;
pub mod history;
pub mod session;
pub mod summary;
pub mod warranty;

pub use clock::{Clock, FixedClock, SystemClock};
pub use history::{HistoryOutcome, HistoryResolver, RecordSource, SwitchOutcome};
pub use session::{AuthGateway, CredentialStore, MemoryCredentialStore, SessionManager};
pub use summary::{
    build_summary_view, category_breakdown, merge_monthly_series, SummaryService, SummarySource,
    SummaryViewBuilder,
};
pub use warranty::{
    evaluate_from_date, evaluate_warranty, evaluate_warranty_for_record, warranty_or_none,
};
