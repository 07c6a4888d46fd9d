//! Case source port: where individual case rows come from.

use std::future::Future;
use std::sync::Arc;

use casestats_domain::case::CaseRecord;
use casestats_domain::error::CaseStatsError;

/// Supplier of the full, unfiltered set of case rows.
///
/// Implementations live in adapter crates (HTTP portal, JSON file, …).
/// Rows are shared behind an [`Arc`] so caching layers can hand out the
/// same snapshot without copying it.
pub trait CaseSource {
    /// Fetch every available case row.
    fn fetch_cases(&self) -> impl Future<Output = Result<Arc<[CaseRecord]>, CaseStatsError>> + Send;
}

impl<S: CaseSource + Send + Sync> CaseSource for Arc<S> {
    fn fetch_cases(&self) -> impl Future<Output = Result<Arc<[CaseRecord]>, CaseStatsError>> + Send {
        self.as_ref().fetch_cases()
    }
}
