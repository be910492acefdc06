//! Integration tests for Slice 5 - HTTP API
//!
//! Tests API endpoints with per-session engines

use fasmeter::core::{create_router, AppState, Dictionary, HourSource};
use fasmeter::types::{LexicalCluster, Settings};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use serde_json::Value;

fn create_test_router() -> Router {
    let dict = Dictionary::compile(vec![LexicalCluster::new(
        "希死",
        Some(0.9),
        vec!["消えたい".to_string()],
    )]);
    create_router(AppState::new(Some(dict), Settings::default(), HourSource::Fixed(12)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn new_session(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(Request::builder().method("POST").uri("/session/new").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["session_id"].as_str().unwrap().to_string()
}

async fn post_compute(app: &Router, id: &str, text: &str) -> axum::response::Response {
    let body = serde_json::json!({ "text": text }).to_string();
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/session/{}/compute", id))
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["dictionary_clusters"], 1);
}

#[tokio::test]
async fn test_config_endpoint() {
    let app = create_test_router();
    let response = app
        .oneshot(Request::builder().uri("/config").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["engine"]["alpha"], 0.7);
    assert_eq!(json["weights"]["EmotionDensity"], 0.2);
}

#[tokio::test]
async fn test_session_not_found() {
    let app = create_test_router();
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/session/nonexistent").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_compute(&app, "nonexistent", "hello").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_session_flow() {
    let app = create_test_router();
    let id = new_session(&app).await;

    let response = post_compute(&app, &id, "消えたい").await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert!(first["FAS"].as_f64().unwrap() > 0.0);
    assert_eq!(first["debounced"], false);
    assert_eq!(first["NEG"]["hits"].as_array().unwrap().len(), 1);

    let second = body_json(post_compute(&app, &id, "消えたい").await).await;
    assert_eq!(second["debounced"], true);

    let response = app
        .clone()
        .oneshot(Request::builder().uri(format!("/session/{}", id)).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = body_json(response).await;
    assert_eq!(status["update_count"], 2);
    assert_eq!(status["state"]["lastFAS"], second["FAS"]);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let app = create_test_router();
    let a = new_session(&app).await;
    let b = new_session(&app).await;

    body_json(post_compute(&app, &a, "消えたい").await).await;
    let other = body_json(post_compute(&app, &b, "消えたい").await).await;
    // b has no history, so the same text is not a repeat there
    assert_eq!(other["debounced"], false);
}

#[tokio::test]
async fn test_reset_session() {
    let app = create_test_router();
    let id = new_session(&app).await;
    body_json(post_compute(&app, &id, "hello").await).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/session/{}/reset", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["state"]["lastFAS"], 0.5);
    assert!(json["state"]["lastHash"].is_null());
}
