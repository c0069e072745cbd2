//! Webhook Service Tests
//!
//! Exercises the call-setup router in-process with `oneshot`.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use ivr_relay::{config::WebhookConfig, routes, state::AppState};

fn test_router() -> Router {
    let webhook = WebhookConfig {
        enabled: true,
        audio_stream_host: Some("relay.example.com:50051".to_string()),
        webhook_host: Some("https://hooks.example.com".to_string()),
        ..WebhookConfig::default()
    };
    let state = AppState::new(&webhook).expect("State should build");
    routes::webhook::create_webhook_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "OK" }));
}

#[tokio::test]
async fn test_inbound_returns_audio_stream_percl() {
    let request = Request::builder()
        .method("POST")
        .uri("/inbound")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"callId":"CA0001"}"#))
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(
        body_json(response).await,
        json!([{
            "AudioStream": {
                "location": { "uri": "relay.example.com:50051" },
                "contentType": "audio/mulaw;rate=8000",
                "actionUrl": "https://hooks.example.com/callback",
                "metadata": ["testing"]
            }
        }])
    );
}

#[tokio::test]
async fn test_callback_accepts_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/callback")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"callId":"CA0001","status":"completed"}"#))
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(body_json(response).await, json!({}));
}

#[tokio::test]
async fn test_callback_rejects_invalid_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/callback")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Invalid JSON");
}

#[tokio::test]
async fn test_callback_rejects_non_object_json() {
    for body in ["[1,2]", "42", "\"x\""] {
        let request = Request::builder()
            .method("POST")
            .uri("/callback")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Invalid JSON");
    }
}

#[tokio::test]
async fn test_callback_accepts_null() {
    let request = Request::builder()
        .method("POST")
        .uri("/callback")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("null"))
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_inbound_rejects_get() {
    let request = Request::builder()
        .uri("/inbound")
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
