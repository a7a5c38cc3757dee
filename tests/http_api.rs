//! Router-level tests: requests are driven through the router in memory via
//! `tower::ServiceExt::oneshot`, no listener bound.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

use pschart::config::AppConfig;
use pschart::web::{create_router, AppState};
use pschart::{ingest, store};

fn app_for(profile_path: &Path) -> Router {
    let state = Arc::new(AppState {
        config: Arc::new(AppConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            log_path: "ps.log".to_string(),
            profile_path: profile_path.to_string_lossy().into_owned(),
        }),
    });
    create_router(state)
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn data_on_a_missing_profile_is_a_plain_500() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(&dir.path().join("absent.csv"));

    let response = get(app, "/data").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "can't fetch data");
}

#[tokio::test]
async fn data_returns_the_chart_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.csv");
    std::fs::write(
        &path,
        "time,cpu,mem,proc\n10:00:00,5.0,2.0,myproc\n11:00:00,3.0,1.0,other proc\n",
    )
    .unwrap();

    let response = get(app_for(&path), "/data").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let value: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(value["data"][0]["x"], json!(["10:00:00", "11:00:00"]));
    assert_eq!(value["data"][0]["y"], json!([5.0, 3.0]));
    assert_eq!(value["layout"]["yaxis"]["range"], json!([0, 500]));
}

#[tokio::test]
async fn symbol_query_parameter_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.csv");
    std::fs::write(&path, "time,cpu,mem,proc\n10:00:00,5.0,2.0,myproc\n").unwrap();

    let plain = body_string(get(app_for(&path), "/data").await).await;
    let with_symbol = body_string(get(app_for(&path), "/data?symbol=GME").await).await;
    assert_eq!(plain, with_symbol);
}

#[tokio::test]
async fn malformed_rows_are_omitted_from_the_response() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.csv");
    std::fs::write(
        &path,
        "time,cpu,mem,proc\n\
         10:00:00,5.0,2.0,good\n\
         10:00:05,junk,2.0,bad cpu\n\
         10:00:10,4.0,1.5,also good\n",
    )
    .unwrap();

    let response = get(app_for(&path), "/data").await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(value["data"][0]["x"], json!(["10:00:00", "10:00:10"]));
    assert_eq!(value["data"][0]["y"], json!([5.0, 4.0]));
}

#[tokio::test]
async fn header_only_profile_yields_empty_series() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.csv");
    std::fs::write(&path, "time,cpu,mem,proc\n").unwrap();

    let response = get(app_for(&path), "/data").await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(value["data"][0]["x"], json!([]));
    assert_eq!(value["data"][0]["y"], json!([]));
}

#[tokio::test]
async fn generated_profile_round_trips_through_the_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.csv");

    let raw = "01 Jan. 2024 10:00:00 UTC\n5.0 2.0 myproc\n\
               %CPU %MEM ARGS mer.02 Jan. 2024 11:00:00 UTC\n3.0 1.0 other proc\n";
    let samples = ingest::parse_monitor_log(raw).unwrap();
    store::save_profile(&path, &samples).unwrap();

    let response = get(app_for(&path), "/data").await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(value["data"][0]["x"], json!(["10:00:00", "11:00:00"]));
    assert_eq!(value["data"][0]["y"], json!([5.0, 3.0]));
}

#[tokio::test]
async fn root_serves_the_embedded_chart_page() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(&dir.path().join("unused.csv"));

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"), "got {content_type}");
    let body = body_string(response).await;
    assert!(body.contains("chart.js"));
}

#[tokio::test]
async fn chart_script_is_served_with_a_javascript_content_type() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(&dir.path().join("unused.csv"));

    let response = get(app, "/chart.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("javascript"), "got {content_type}");
}

#[tokio::test]
async fn unknown_asset_paths_are_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(&dir.path().join("unused.csv"));

    let response = get(app, "/no-such-file.js").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_probe_responds_ok() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(&dir.path().join("unused.csv"));

    let response = get(app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}
