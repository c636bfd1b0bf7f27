//! Record history resolver
//!
//! Client purchase history for the record detail view, plus switching the
//! view to one of the related records.

pub mod ports;
pub mod resolver;

pub use ports::RecordSource;
pub use resolver::{HistoryOutcome, HistoryResolver, SwitchOutcome};
