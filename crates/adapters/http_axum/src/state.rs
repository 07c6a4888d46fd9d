//! Shared application state for axum handlers.

use std::sync::Arc;

use casestats_app::ports::CaseSource;
use casestats_app::services::dashboard_service::DashboardService;

/// Application state shared across all axum handlers.
///
/// Generic over the case source to avoid dynamic dispatch. `Clone` is
/// implemented manually so `S` itself does not need to be `Clone`.
pub struct AppState<S> {
    /// Dashboard aggregation service.
    pub dashboard_service: Arc<DashboardService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            dashboard_service: Arc::clone(&self.dashboard_service),
        }
    }
}

impl<S> AppState<S>
where
    S: CaseSource + Send + Sync + 'static,
{
    pub fn new(dashboard_service: DashboardService<S>) -> Self {
        Self {
            dashboard_service: Arc::new(dashboard_service),
        }
    }
}
