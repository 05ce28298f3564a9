//! Test harness for driving the router without a socket.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::time::Duration;
use tower::ServiceExt;

use server_core::kernel::TestDependencies;
use server_core::server::build_app;

/// Initialize tracing once, respecting RUST_LOG.
/// Run tests with: RUST_LOG=debug cargo test -- --nocapture
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn test_app(deps: &TestDependencies) -> Router {
    test_app_with_timeout(deps, Duration::from_secs(60))
}

pub fn test_app_with_timeout(deps: &TestDependencies, request_timeout: Duration) -> Router {
    init_tracing();
    build_app(deps.server_deps(), request_timeout)
}

/// Send a request and return status plus body text
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    post_json_text(uri, &body.to_string())
}

/// JSON request with a verbatim body, for malformed payloads
pub fn post_json_text(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}
