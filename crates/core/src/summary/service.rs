//! Sales summary service - fetch and derive in one call

use std::sync::Arc;

use salesdesk_domain::{Result, SummaryFilter, SummaryViewModel};
use tracing::{debug, warn};

use super::builder::SummaryViewBuilder;
use super::ports::SummarySource;

/// Loads the summary payload and builds the chart view-model
pub struct SummaryService {
    source: Arc<dyn SummarySource>,
    builder: SummaryViewBuilder,
}

impl SummaryService {
    pub fn new(source: Arc<dyn SummarySource>) -> Self {
        Self { source, builder: SummaryViewBuilder::default() }
    }

    /// Override the breakdown limits.
    pub fn with_builder(mut self, builder: SummaryViewBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Fetch and derive the summary view.
    ///
    /// # Errors
    /// Propagates the source error so the view can show a retry message;
    /// an empty backend response is `Ok` with `has_data == false`.
    pub async fn load(&self, filter: &SummaryFilter) -> Result<SummaryViewModel> {
        let payload = self.source.fetch_summary(filter).await.map_err(|err| {
            warn!(error = %err, kind = err.label(), "failed to load sales summary");
            err
        })?;

        let view = self.builder.build(payload.as_ref());
        debug!(
            has_data = view.has_data,
            months = view.monthly.len(),
            zones = view.zones.len(),
            "sales summary derived"
        );
        Ok(view)
    }
}
