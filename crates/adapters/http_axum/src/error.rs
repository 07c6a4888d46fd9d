//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use casestats_domain::error::CaseStatsError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`CaseStatsError`] to an HTTP response with appropriate status code.
pub struct ApiError(CaseStatsError);

impl From<CaseStatsError> for ApiError {
    fn from(err: CaseStatsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CaseStatsError::Source(err) => {
                tracing::error!(error = %err, "case source unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    "case data source unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
