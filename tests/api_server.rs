//! JSON API behavior tests.

mod helpers;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{http_comparator, legacy_page, new_page, LEGACY_PATH, NEW_PATH};
use hostdiff::server::{router, AppState};
use hostdiff::storage::run_migrations;

async fn test_router(server: &MockServer) -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    router(AppState {
        comparator: Arc::new(http_comparator(server)),
        pool: Arc::new(pool),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn mount_backends(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(LEGACY_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(legacy_page(&["1.1.1.1", "2.2.2.2"], 2, "")),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(NEW_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(new_page(&["2.2.2.2"], 1, None)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let app = test_router(&server).await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_compare_returns_result_document() {
    let server = MockServer::start().await;
    mount_backends(&server).await;
    let app = test_router(&server).await;

    let (status, body) = send(
        &app,
        "POST",
        "/compare",
        Some(json!({
            "legacy_query": "\"services.port: 22\"",
            "new_query": "host.services.port: 22",
            "virtual_hosts": "INCLUDE"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "warning");
    assert_eq!(body["legacy"]["fetched"], 2);
    assert_eq!(body["legacy"]["error"], Value::Null);
    assert_eq!(body["new"]["ips"], json!(["2.2.2.2"]));
    assert_eq!(body["comparison"]["common"], 1);
    assert_eq!(body["comparison"]["missing_in_new"], json!(["1.1.1.1"]));
    assert_eq!(body["comparison"]["only_in_new"], json!([]));
}

#[tokio::test]
async fn test_compare_rejects_missing_query() {
    let server = MockServer::start().await;
    let app = test_router(&server).await;

    let (status, body) = send(
        &app,
        "POST",
        "/compare",
        Some(json!({ "legacy_query": "services.port: 22", "new_query": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Both queries are required");
    assert!(server
        .received_requests()
        .await
        .unwrap_or_default()
        .is_empty());
}

#[tokio::test]
async fn test_compare_rejects_malformed_body() {
    let server = MockServer::start().await;
    let app = test_router(&server).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/compare")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_saved_search_lifecycle() {
    let server = MockServer::start().await;
    let app = test_router(&server).await;

    let save = json!({
        "name": "ssh",
        "legacy_query": "services.port: 22",
        "new_query": "host.services.port: 22",
        "virtual_hosts": "EXCLUDE",
        "results": { "status": "success" }
    });

    let (status, body) = send(&app, "POST", "/save-search", Some(save.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["outcome"], "created");
    let id = body["id"].as_i64().expect("id");

    // Same name without overwrite conflicts
    let (status, body) = send(&app, "POST", "/save-search", Some(save.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A saved search named 'ssh' already exists");

    // With overwrite the record is replaced in place
    let mut overwrite = save.clone();
    overwrite["overwrite"] = json!(true);
    overwrite["results"] = json!({ "status": "warning" });
    let (status, body) = send(&app, "POST", "/save-search", Some(overwrite)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "updated");
    assert_eq!(body["id"], id);

    let (status, body) = send(&app, "GET", "/load-searches", None).await;
    assert_eq!(status, StatusCode::OK);
    let searches = body.as_array().expect("array");
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0]["name"], "ssh");
    assert_eq!(searches[0]["virtual_hosts"], "EXCLUDE");
    assert_eq!(searches[0]["results"]["status"], "warning");
    assert!(searches[0]["timestamp"].as_i64().unwrap() > 0);

    let (status, body) = send(&app, "DELETE", &format!("/delete-search/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 1);

    // Deleting again is not an error
    let (status, body) = send(&app, "DELETE", &format!("/delete-search/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 0);

    let (_, body) = send(&app, "GET", "/load-searches", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_save_search_requires_name() {
    let server = MockServer::start().await;
    let app = test_router(&server).await;

    let (status, body) = send(
        &app,
        "POST",
        "/save-search",
        Some(json!({ "name": "   ", "legacy_query": "a", "new_query": "b" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");
}

#[tokio::test]
async fn test_delete_search_rejects_non_integer_id_as_json() {
    let server = MockServer::start().await;
    let app = test_router(&server).await;

    let (status, body) = send(&app, "DELETE", "/delete-search/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "unexpected body: {body}");
}
