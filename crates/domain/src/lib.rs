//! # SalesDesk Domain
//!
//! Business domain types for the SalesDesk dashboard.
//!
//! This crate contains:
//! - Wire types returned by the REST backend (records, summaries, login)
//! - Derived view types (warranty status, chart rows, monthly series)
//! - Error types and the `Result` alias
//! - Configuration structures and domain constants
//!
//! ## Architecture
//! - No dependencies on other SalesDesk crates
//! - No I/O; pure data structures and small helpers

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::dates::{month_label, parse_calendar_date};
