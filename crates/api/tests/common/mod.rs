#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use jsonquery_api::config::{ServerConfig, DEFAULT_MAX_BODY_BYTES};
use jsonquery_api::router::build_app_router;
use jsonquery_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Allows any CORS origin and uses a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
    }
}

/// Build the full application router from [`test_config`].
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

/// Build the full application router, with the same middleware stack the
/// binary uses, from the given config.
pub fn build_test_app_with(config: ServerConfig) -> Router {
    let state = AppState::new(config.clone());
    build_app_router(state, &config)
}

/// Send a GET request without a body.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty()).await
}

/// Send a POST request with the given raw body.
pub async fn post(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    send(app, Method::POST, uri, body.into()).await
}

/// Send a request with an arbitrary method and body.
pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();

    app.oneshot(request).await.unwrap()
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
