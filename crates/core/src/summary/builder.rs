//! Summary view-model builder
//!
//! Turns a [`SummaryPayload`] into independent, chart-ready series. The
//! payload is only borrowed; building twice from the same payload yields the
//! same view-model.

use std::collections::HashMap;

use salesdesk_domain::constants::{LEAD_SOURCE_BREAKDOWN_LIMIT, ZONE_BREAKDOWN_LIMIT};
use salesdesk_domain::{
    month_label, CategoryTotals, ChartRow, MonthlyPoint, MonthlySeriesPoint, SummaryKpis,
    SummaryPayload, SummaryViewModel,
};

/// Per-breakdown truncation limits (`None` shows every row)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryViewBuilder {
    pub zone_limit: Option<usize>,
    pub lead_source_limit: Option<usize>,
    pub sold_by_limit: Option<usize>,
}

impl Default for SummaryViewBuilder {
    fn default() -> Self {
        Self {
            zone_limit: Some(ZONE_BREAKDOWN_LIMIT),
            lead_source_limit: Some(LEAD_SOURCE_BREAKDOWN_LIMIT),
            sold_by_limit: None,
        }
    }
}

impl SummaryViewBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every derived series. An absent payload yields an empty
    /// view-model with `has_data == false`.
    pub fn build(&self, payload: Option<&SummaryPayload>) -> SummaryViewModel {
        let Some(payload) = payload else {
            return SummaryViewModel::empty();
        };

        SummaryViewModel {
            has_data: true,
            kpis: kpis(payload),
            monthly: merge_monthly_series(&payload.monthly_trend, &payload.monthly_projection),
            zones: category_breakdown(&payload.by_zone, &payload.revenue_by_zone, self.zone_limit),
            lead_sources: category_breakdown(
                &payload.by_lead_source,
                &payload.revenue_by_lead_source,
                self.lead_source_limit,
            ),
            sold_by: category_breakdown(
                &payload.by_sold_by,
                &payload.revenue_by_sold_by,
                self.sold_by_limit,
            ),
        }
    }
}

/// Build the view-model with the default limits (zones 10, lead sources 8,
/// salespeople unlimited).
pub fn build_summary_view(payload: Option<&SummaryPayload>) -> SummaryViewModel {
    SummaryViewBuilder::default().build(payload)
}

/// Merge actual and projected monthly series on the month key.
///
/// Output order is first appearance across `actual` then `projected`; the
/// months are not re-sorted. A month present in both series (the adjoining
/// boundary month) appears once, carrying both figures, with
/// `is_projected == true`.
pub fn merge_monthly_series(
    actual: &[MonthlyPoint],
    projected: &[MonthlyPoint],
) -> Vec<MonthlySeriesPoint> {
    let mut merged: Vec<MonthlySeriesPoint> = Vec::with_capacity(actual.len() + projected.len());
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (point, is_projection) in
        actual.iter().map(|p| (p, false)).chain(projected.iter().map(|p| (p, true)))
    {
        let position = *index.entry(point.month.as_str()).or_insert_with(|| {
            merged.push(MonthlySeriesPoint {
                month_label: month_label(&point.month),
                month_key: point.month.clone(),
                actual_count: 0,
                projected_count: 0,
                actual_revenue: 0.0,
                projected_revenue: 0.0,
                is_projected: false,
            });
            merged.len() - 1
        });

        let entry = &mut merged[position];
        if is_projection {
            entry.projected_count = point.count;
            entry.projected_revenue = point.revenue;
            entry.is_projected = true;
        } else {
            entry.actual_count = point.count;
            entry.actual_revenue = point.revenue;
        }
    }

    merged
}

/// Join a counts mapping with its revenue mapping into rows sorted by
/// revenue, highest first.
///
/// Keys missing from `revenue` get revenue 0. Keys only present in `revenue`
/// are kept with count 0 after the count keys. Equal revenues keep
/// encounter order. `limit` truncates after sorting.
pub fn category_breakdown(
    counts: &CategoryTotals<u64>,
    revenue: &CategoryTotals<f64>,
    limit: Option<usize>,
) -> Vec<ChartRow> {
    let mut rows: Vec<ChartRow> = counts
        .iter()
        .map(|(key, &count)| ChartRow {
            key: key.to_string(),
            count,
            revenue: revenue.get(key).copied().unwrap_or(0.0),
        })
        .collect();

    rows.extend(revenue.iter().filter(|(key, _)| !counts.contains_key(key)).map(
        |(key, &amount)| ChartRow { key: key.to_string(), count: 0, revenue: amount },
    ));

    // sort_by is stable
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));

    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

fn kpis(payload: &SummaryPayload) -> SummaryKpis {
    SummaryKpis {
        total_records: payload.total_records,
        total_revenue: payload.total_revenue,
        average_order_value: payload.average_order_value,
        highest_order_value: payload.order_details.highest_order_value,
        lowest_order_value: payload.order_details.lowest_order_value,
        orders_with_price: payload.order_details.orders_with_price,
    }
}
