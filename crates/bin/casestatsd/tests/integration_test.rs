//! End-to-end smoke tests for the full casestatsd stack.
//!
//! Each test wires the real file source, cache, dashboard service and axum
//! router over a JSON fixture and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`; no TCP port is bound.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use casestats_adapter_http_axum::router;
use casestats_adapter_http_axum::state::AppState;
use casestats_adapter_open_data::FileCaseSource;
use casestats_app::cache::CachedCaseSource;
use casestats_app::services::dashboard_service::DashboardService;
use casestats_domain::dashboard::DashboardData;
use http_body_util::BodyExt;
use tower::ServiceExt;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cases.json");

/// Build a fully-wired router backed by the given case file.
fn app_for(path: &str) -> axum::Router {
    let source = CachedCaseSource::new(FileCaseSource::new(path), Duration::from_secs(60));
    router::build(AppState::new(DashboardService::new(source)), None)
}

fn app() -> axum::Router {
    app_for(FIXTURE)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, body)
}

async fn dashboard(uri: &str) -> DashboardData {
    let (status, body) = get(app(), uri).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let (status, body) = get(app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

// ---------------------------------------------------------------------------
// Dashboard data
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_aggregate_all_cases_without_filters() {
    let data = dashboard("/api/data").await;

    assert_eq!(data.total_cases, 6);
    assert_eq!(data.total_deaths, 2);
    assert_eq!(
        data.cases_by_status.labels().collect::<Vec<_>>(),
        vec!["fallecido", "leve", "moderado", "recuperado"]
    );
    assert_eq!(
        data.top_cities.labels().collect::<Vec<_>>(),
        vec!["BOGOTA", "MEDELLIN", "CALI", "ENVIGADO"]
    );
    assert_eq!(data.gender_distribution.get("F"), Some(3));
    assert_eq!(data.gender_distribution.get("M"), Some(3));
    assert_eq!(
        data.departments(),
        ["ANTIOQUIA", "BOGOTA", "VALLE"].map(String::from)
    );
}

#[tokio::test]
async fn should_keep_every_age_bracket_in_order() {
    let data = dashboard("/api/data").await;

    assert_eq!(data.age_distribution.len(), 11);
    assert_eq!(data.age_distribution.labels().next(), Some("0-10"));
    assert_eq!(data.age_distribution.labels().last(), Some("100+"));
    assert_eq!(data.age_distribution.get("0-10"), Some(1));
    assert_eq!(data.age_distribution.get("11-20"), Some(0));
    assert_eq!(data.age_distribution.get("81-90"), Some(1));
    assert_eq!(data.age_distribution.total(), 6);
}

#[tokio::test]
async fn should_order_deaths_chronologically() {
    let data = dashboard("/api/data").await;

    assert_eq!(
        data.deaths_over_time.iter().collect::<Vec<_>>(),
        vec![("2020-04-01", 1), ("2020-04-02", 1)]
    );
}

#[tokio::test]
async fn should_filter_by_department_and_gender() {
    let data = dashboard("/api/data?department=ANTIOQUIA&gender=m").await;

    assert_eq!(data.total_cases, 2);
    assert_eq!(data.total_deaths, 1);
    assert_eq!(
        data.available_cities,
        Some(vec!["ENVIGADO".to_string(), "MEDELLIN".to_string()])
    );
    assert_eq!(data.departments().len(), 3);
}

#[tokio::test]
async fn should_return_zero_totals_when_nothing_matches() {
    let data = dashboard("/api/data?department=AMAZONAS").await;

    assert_eq!(data.total_cases, 0);
    assert_eq!(data.total_deaths, 0);
    assert!(data.top_cities.is_empty());
    assert_eq!(data.departments().len(), 3);
}

#[tokio::test]
async fn should_return_bad_gateway_when_case_file_is_missing() {
    let (status, body) = get(app_for("/nonexistent/casestats/cases.json"), "/api/data").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].is_string());
}
