//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each admin endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use healthyme_cache::{api::create_router, AppState, CacheManager};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    let cache = CacheManager::new(100, Duration::from_secs(300));
    create_router(AppState::new(cache))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn put_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == SET / GET ==

#[tokio::test]
async fn test_set_then_get_json_value() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(put_json(
            "/set",
            r#"{"key":"doc:meals:1","value":{"name":"oats","kcal":389}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("doc:meals:1"));

    let response = app.oneshot(get("/get/doc:meals:1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"], "doc:meals:1");
    assert_eq!(json["value"]["kcal"], 389);
}

#[tokio::test]
async fn test_set_with_zero_ttl_is_never_served() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(put_json("/set", r#"{"key":"k","value":1,"ttl_ms":0}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/get/k")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_set_empty_key_rejected() {
    let response = create_test_app()
        .oneshot(put_json("/set", r#"{"key":"","value":1}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_get_missing_key_returns_error_body() {
    let response = create_test_app()
        .oneshot(get("/get/nonexistent_key"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("nonexistent_key"));
}

// == DELETE ==

#[tokio::test]
async fn test_delete_existing_then_missing() {
    let app = create_test_app();
    app.clone()
        .oneshot(put_json("/set", r#"{"key":"delete_key","value":"v"}"#))
        .await
        .unwrap();

    let response = app.clone().oneshot(delete("/del/delete_key")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(delete("/del/delete_key")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == INVALIDATE / CLEAR ==

#[tokio::test]
async fn test_invalidate_by_pattern() {
    let app = create_test_app();
    for key in ["collection:foo:a", "collection:foo:b", "collection:bar:c"] {
        let body = format!(r#"{{"key":"{}","value":true}}"#, key);
        app.clone().oneshot(put_json("/set", &body)).await.unwrap();
    }

    let response = app
        .clone()
        .oneshot(post_json("/invalidate", r#"{"pattern":"^collection:foo:"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["removed"], 2);

    let response = app.oneshot(get("/get/collection:bar:c")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalidate_by_prefix() {
    let app = create_test_app();
    for key in ["doc:meals:1", "doc:mealsArchive:1"] {
        let body = format!(r#"{{"key":"{}","value":true}}"#, key);
        app.clone().oneshot(put_json("/set", &body)).await.unwrap();
    }

    let response = app
        .oneshot(post_json("/invalidate", r#"{"prefix":"doc:meals"}"#))
        .await
        .unwrap();
    assert_eq!(body_to_json(response.into_body()).await["removed"], 1);
}

#[tokio::test]
async fn test_invalidate_bad_pattern_is_400() {
    let response = create_test_app()
        .oneshot(post_json("/invalidate", r#"{"pattern":"(unclosed"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("Invalid pattern"));
}

#[tokio::test]
async fn test_invalidate_without_target_is_400() {
    let response = create_test_app()
        .oneshot(post_json("/invalidate", "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clear_resets_stats() {
    let app = create_test_app();
    app.clone()
        .oneshot(put_json("/set", r#"{"key":"a","value":1}"#))
        .await
        .unwrap();
    app.clone().oneshot(get("/get/a")).await.unwrap();

    let response = app
        .clone()
        .oneshot(post_json("/clear", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(app.oneshot(get("/stats")).await.unwrap().into_body()).await;
    assert_eq!(json["hits"], 0);
    assert_eq!(json["total_entries"], 0);
}

// == STATS / ENTRIES / HEALTH ==

#[tokio::test]
async fn test_stats_track_hits_and_misses() {
    let app = create_test_app();
    app.clone()
        .oneshot(put_json("/set", r#"{"key":"a","value":1}"#))
        .await
        .unwrap();
    app.clone().oneshot(get("/get/a")).await.unwrap();
    app.clone().oneshot(get("/get/missing")).await.unwrap();

    let response = app.oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["hit_rate"], 0.5);
    assert!(json["oldest_entry"].is_string());
}

#[tokio::test]
async fn test_entries_lists_metadata_without_values() {
    let app = create_test_app();
    app.clone()
        .oneshot(put_json(
            "/set",
            r#"{"key":"api:analyze:{}","value":"private","ttl_ms":60000}"#,
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/entries")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["key"], "api:analyze:{}");
    assert_eq!(entries[0]["ttl_ms"], 60000);
    assert_eq!(entries[0]["hits"], 0);
    assert!(!json.to_string().contains("private"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = create_test_app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
