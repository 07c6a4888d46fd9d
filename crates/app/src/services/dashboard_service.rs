//! Dashboard service: the `/api/data` use-case.

use casestats_domain::dashboard::DashboardData;
use casestats_domain::error::CaseStatsError;
use casestats_domain::filter::CaseFilter;

use crate::ports::CaseSource;
use crate::summary::summarize;

/// Application service producing dashboard records from a [`CaseSource`].
pub struct DashboardService<S> {
    source: S,
}

impl<S: CaseSource> DashboardService<S> {
    /// Create a new service backed by the given source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch all rows and aggregate them under `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`CaseStatsError::Source`] when the source cannot deliver rows.
    pub async fn dashboard(&self, filter: &CaseFilter) -> Result<DashboardData, CaseStatsError> {
        let records = self.source.fetch_cases().await?;
        tracing::debug!(rows = records.len(), ?filter, "aggregating dashboard");
        Ok(summarize(&records, filter))
    }
}
