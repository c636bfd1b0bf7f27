//! Chart-ready view-model types produced from a [`SummaryPayload`]
//!
//! [`SummaryPayload`]: super::summary::SummaryPayload

use serde::{Deserialize, Serialize};

/// Per-category row: counts and revenue joined on the category name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub key: String,
    pub count: u64,
    pub revenue: f64,
}

/// One month of the merged actual-vs-projected series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySeriesPoint {
    /// Display label, e.g. `Jan 2025`
    pub month_label: String,
    /// Sortable key, `YYYY-MM`
    pub month_key: String,
    pub actual_count: u64,
    pub projected_count: u64,
    pub actual_revenue: f64,
    pub projected_revenue: f64,
    /// True iff the month appears in the projection series
    pub is_projected: bool,
}

/// Headline figures shown above the charts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryKpis {
    pub total_records: u64,
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub highest_order_value: f64,
    pub lowest_order_value: f64,
    pub orders_with_price: u64,
}

/// Every derived series for the sales summary view
///
/// `has_data == false` means "no data" (absent payload), not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryViewModel {
    pub has_data: bool,
    pub kpis: SummaryKpis,
    pub monthly: Vec<MonthlySeriesPoint>,
    pub zones: Vec<ChartRow>,
    pub lead_sources: Vec<ChartRow>,
    pub sold_by: Vec<ChartRow>,
}

impl SummaryViewModel {
    /// Result for an absent payload.
    pub fn empty() -> Self {
        Self::default()
    }
}
