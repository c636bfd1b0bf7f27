//! Domain types and models
//!
//! Wire types mirror the REST backend; view types are what the dashboard
//! renders after derivation.

pub mod record;
pub mod session;
pub mod summary;
pub mod view;
pub mod warranty;

pub use record::{HistoryResponse, Record, RecordId};
pub use session::{LoginRequest, LoginResponse, Role, SessionState, StoredCredentials};
pub use summary::{CategoryTotals, MonthlyPoint, OrderDetails, SummaryFilter, SummaryPayload};
pub use view::{ChartRow, MonthlySeriesPoint, SummaryKpis, SummaryViewModel};
pub use warranty::{WarrantyState, WarrantyStatus};
