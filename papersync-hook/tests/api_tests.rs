//! HTTP routing integration tests
//!
//! Tests cover:
//! - `GET /` banner
//! - `GET|POST /health` diagnostics, including last error
//! - `POST /webhook` success and error status mapping

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use helpers::{fetched_paper, webhook_payload, FakeCatalog, RecordingStore};
use http_body_util::BodyExt;
use papersync_hook::types::CatalogError;
use papersync_hook::workflow::PaperSync;
use papersync_hook::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

fn test_state(catalog: FakeCatalog, store: Arc<RecordingStore>) -> AppState {
    AppState::new(PaperSync::new(Arc::new(catalog), store))
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = body.collect().await.expect("Should read body").to_bytes();
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn test_index_banner() {
    let app = build_router(test_state(FakeCatalog::default(), Arc::default()));

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "ArXiv Webhook Service");
}

#[tokio::test]
async fn test_health_get_and_post() {
    for method in ["GET", "POST"] {
        let app = build_router(test_state(FakeCatalog::default(), Arc::default()));
        let response = app.oneshot(empty_request(method, "/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = extract_json(response.into_body()).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["module"], "papersync-hook");
        assert!(body["version"].is_string());
        assert!(body["uptime_seconds"].is_number());
        assert!(body.get("last_error").is_none());
    }
}

#[tokio::test]
async fn test_webhook_success() {
    let store = Arc::new(RecordingStore::default());
    let app = build_router(test_state(
        FakeCatalog::with_paper("2505.22618", fetched_paper()),
        store.clone(),
    ));

    let payload = webhook_payload("abc123", "https://arxiv.org/abs/2505.22618");
    let response = app
        .oneshot(json_request("POST", "/webhook", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "Webhook received");
    assert_eq!(body["page_id"], "abc123");
    assert_eq!(body["arxiv_id"], "2505.22618");

    assert_eq!(store.updates().len(), 1);
}

#[tokio::test]
async fn test_webhook_invalid_link_is_bad_request() {
    let store = Arc::new(RecordingStore::default());
    let state = test_state(FakeCatalog::default(), store.clone());
    let app = build_router(state.clone());

    let payload = webhook_payload("abc123", "https://example.com/not-arxiv");
    let response = app
        .oneshot(json_request("POST", "/webhook", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("example.com"));
    assert!(store.updates().is_empty());

    // Failure is surfaced on /health
    let response = build_router(state)
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body["last_error"].as_str().unwrap().contains("Invalid arXiv URL"));
}

#[tokio::test]
async fn test_webhook_missing_data_is_bad_request() {
    let app = build_router(test_state(FakeCatalog::default(), Arc::default()));

    let response = app
        .oneshot(json_request("POST", "/webhook", &serde_json::json!({"source": {}})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_webhook_unknown_paper_is_not_found() {
    let app = build_router(test_state(FakeCatalog::default(), Arc::default()));

    let payload = webhook_payload("abc123", "https://arxiv.org/abs/2505.22618");
    let response = app
        .oneshot(json_request("POST", "/webhook", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_webhook_catalog_outage_is_bad_gateway() {
    let app = build_router(test_state(
        FakeCatalog::failing(CatalogError::Api {
            status: 503,
            body: "Service Unavailable".to_string(),
        }),
        Arc::default(),
    ));

    let payload = webhook_payload("abc123", "https://arxiv.org/abs/2505.22618");
    let response = app
        .oneshot(json_request("POST", "/webhook", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_webhook_rejects_get() {
    let app = build_router(test_state(FakeCatalog::default(), Arc::default()));

    let response = app.oneshot(empty_request("GET", "/webhook")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
