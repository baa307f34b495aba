//! Tests for `AppError` → HTTP response mapping.
//!
//! Most of these call `IntoResponse` directly; the last one goes through the
//! full middleware stack.

mod common;

use std::any::Any;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use jsonquery_api::error::{panic_response, AppError};
use jsonquery_api::router::with_middleware;
use jsonquery_api::state::AppState;

/// Helper: convert a response into its status code and parsed JSON body.
async fn into_parts(
    response: axum::response::Response,
) -> (axum::http::StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: AppError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::NotFound("No route for /missing".into());

    let (status, json) = into_parts(err.into_response()).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "No route for /missing");
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret listener details".into());

    let (status, json) = into_parts(err.into_response()).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: panic payloads become a sanitized 500 envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn panic_payload_returns_500_envelope() {
    let payloads: Vec<Box<dyn Any + Send>> = vec![
        Box::new("static str panic") as Box<dyn Any + Send>,
        Box::new(String::from("owned string panic")) as Box<dyn Any + Send>,
        Box::new(42_u32) as Box<dyn Any + Send>,
    ];

    for payload in payloads {
        let (status, json) = into_parts(panic_response(payload)).await;

        assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}

// ---------------------------------------------------------------------------
// Test: a panicking handler behind the middleware stack answers 500 JSON
// ---------------------------------------------------------------------------

async fn explode() -> &'static str {
    panic!("handler blew up with secret state");
}

#[tokio::test]
async fn panicking_route_returns_500_envelope() {
    let config = common::test_config();
    let routes = Router::new().route("/explode", get(explode));
    let app = with_middleware(routes, &config).with_state(AppState::new(config.clone()));

    let response = common::get(app, "/explode").await;

    assert!(response.headers().get("x-request-id").is_some());
    let (status, json) = into_parts(response).await;
    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
    assert!(!json.to_string().contains("secret"));
}
