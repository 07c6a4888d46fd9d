//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod data;

use axum::Router;
use axum::routing::get;

use casestats_app::ports::CaseSource;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: CaseSource + Send + Sync + 'static,
{
    Router::new().route("/data", get(data::get::<S>))
}
