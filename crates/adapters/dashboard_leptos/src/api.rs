//! HTTP API client wrapping `gloo-net` for calls to `/api/*`.

use gloo_net::http::{Request, Response};
use serde::Deserialize;

use casestats_domain::dashboard::DashboardData;
use casestats_view::fetcher::DashboardApi;

/// Error returned by API client methods.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// JSON error body returned by the server on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Check the HTTP response status and extract an error if non-2xx.
async fn check_response(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {}", resp.status()),
    };
    Err(ApiError { message })
}

/// The backend reached through the browser's `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooApi;

impl DashboardApi for GlooApi {
    type Error = ApiError;

    async fn fetch_dashboard(&self, path: &str) -> Result<DashboardData, ApiError> {
        let resp = check_response(Request::get(path).send().await?).await?;
        let data: DashboardData = resp.json().await?;
        Ok(data)
    }
}
