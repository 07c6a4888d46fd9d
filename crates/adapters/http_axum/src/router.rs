//! Axum router assembly.

use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use casestats_app::ports::CaseSource;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api`. When `static_dir` is given, any other
/// path is served from it, falling back to its `index.html`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<S>(state: AppState<S>, static_dir: Option<&Path>) -> Router
where
    S: CaseSource + Send + Sync + 'static,
{
    let mut router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes());

    if let Some(dir) = static_dir {
        let assets = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        router = router.fallback_service(assets);
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use casestats_app::services::dashboard_service::DashboardService;
    use casestats_domain::case::CaseRecord;
    use casestats_domain::error::CaseStatsError;
    use http_body_util::BodyExt;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubSource(Vec<CaseRecord>);

    impl CaseSource for StubSource {
        async fn fetch_cases(&self) -> Result<Arc<[CaseRecord]>, CaseStatsError> {
            Ok(self.0.clone().into())
        }
    }

    struct FailingSource;

    impl CaseSource for FailingSource {
        async fn fetch_cases(&self) -> Result<Arc<[CaseRecord]>, CaseStatsError> {
            Err(CaseStatsError::Source(
                std::io::Error::new(std::io::ErrorKind::TimedOut, "portal timed out").into(),
            ))
        }
    }

    fn case(department: &str, city: &str, gender: &str, status: &str) -> CaseRecord {
        CaseRecord {
            departamento_nom: Some(department.to_string()),
            ciudad_municipio_nom: Some(city.to_string()),
            sexo: Some(gender.to_string()),
            edad: Some(30.0),
            estado: Some(status.to_string()),
            fecha_muerte: None,
        }
    }

    fn test_state() -> AppState<StubSource> {
        AppState::new(DashboardService::new(StubSource(vec![
            case("ANTIOQUIA", "MEDELLIN", "F", "Leve"),
            case("ANTIOQUIA", "ENVIGADO", "M", "Fallecido"),
            case("BOGOTA", "BOGOTA", "F", "Moderado"),
        ])))
    }

    async fn call(app: Router, uri: &str) -> Response<Body> {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json(response: Response<Body>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = call(build(test_state(), None), "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_unfiltered_dashboard() {
        let response = call(build(test_state(), None), "/api/data").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["total_cases"], 3);
        assert_eq!(body["total_deaths"], 1);
        assert_eq!(body["gender_distribution"]["F"], 2);
        assert_eq!(
            body["available_departments"],
            serde_json::json!(["ANTIOQUIA", "BOGOTA"])
        );
    }

    #[tokio::test]
    async fn should_apply_query_filters() {
        let response = call(
            build(test_state(), None),
            "/api/data?gender=F&department=ANTIOQUIA",
        )
        .await;

        let body = json(response).await;
        assert_eq!(body["total_cases"], 1);
        assert_eq!(body["top_cities"], serde_json::json!({ "MEDELLIN": 1 }));
    }

    #[tokio::test]
    async fn should_trim_padded_query_parameters() {
        let response = call(
            build(test_state(), None),
            "/api/data?gender=%20F&department=%20ANTIOQUIA%20",
        )
        .await;

        assert_eq!(json(response).await["total_cases"], 1);
    }

    #[tokio::test]
    async fn should_ignore_blank_query_parameters() {
        let response = call(build(test_state(), None), "/api/data?gender=&department=").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["total_cases"], 3);
    }

    #[tokio::test]
    async fn should_return_bad_gateway_when_source_fails() {
        let state = AppState::new(DashboardService::new(FailingSource));

        let response = call(build(state, None), "/api/data").await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json(response).await;
        assert_eq!(body["error"], "case data source unavailable");
    }

    fn static_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("casestats-static-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<canvas id=\"statusChart\"></canvas>").unwrap();
        std::fs::write(dir.join("style.css"), "body{}").unwrap();
        dir
    }

    #[tokio::test]
    async fn should_serve_static_assets_with_index_fallback() {
        let dir = static_dir();

        let asset = call(build(test_state(), Some(&dir)), "/style.css").await;
        assert_eq!(asset.status(), StatusCode::OK);

        let page = call(build(test_state(), Some(&dir)), "/some/client/route").await;
        let bytes = page.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&bytes).contains("statusChart"));

        let api = call(build(test_state(), Some(&dir)), "/api/data").await;
        assert_eq!(api.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_not_found_without_static_dir() {
        let response = call(build(test_state(), None), "/index.html").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
