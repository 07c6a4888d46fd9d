//! `GET /api/data`: the aggregated dashboard record.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

use casestats_app::ports::CaseSource;
use casestats_domain::dashboard::DashboardData;
use casestats_domain::filter::CaseFilter;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the data endpoint.
pub enum DataResponse {
    Ok(Json<DashboardData>),
}

impl IntoResponse for DataResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/data?gender=&department=&city=`
///
/// Blank parameters are ignored.
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Query(filter): Query<CaseFilter>,
) -> Result<DataResponse, ApiError>
where
    S: CaseSource + Send + Sync + 'static,
{
    let data = state.dashboard_service.dashboard(&filter).await?;
    Ok(DataResponse::Ok(Json(data)))
}
