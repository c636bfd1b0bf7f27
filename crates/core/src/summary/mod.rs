//! Summary view-model builder and the service that feeds it

pub mod builder;
pub mod ports;
pub mod service;

pub use builder::{build_summary_view, category_breakdown, merge_monthly_series, SummaryViewBuilder};
pub use ports::SummarySource;
pub use service::SummaryService;
