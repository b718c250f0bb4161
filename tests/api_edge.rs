//! Edge middleware integration tests
//!
//! Health check, fallback, security headers, CORS and rate limiting.

mod common;

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use common::*;
use serde_json::Value;

#[tokio::test]
async fn test_health() {
    let app = spawn_app();
    let response = app.server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = spawn_app();
    let response = app.server.get("/nope").await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers() {
    let app = spawn_app();
    let response = app.server.get("/health").await;

    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("x-frame-options"), "SAMEORIGIN");
    assert_eq!(response.header("referrer-policy"), "no-referrer");
    assert_eq!(response.header("x-dns-prefetch-control"), "off");
}

#[tokio::test]
async fn test_security_headers_on_errors() {
    let app = spawn_app();
    let response = app.server.get("/auth/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("x-content-type-options"), "nosniff");
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = spawn_app();
    let response = app
        .server
        .method(Method::OPTIONS, "/articles")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://localhost:3000"),
        )
        .add_header(
            HeaderName::from_static("access-control-request-method"),
            HeaderValue::from_static("PATCH"),
        )
        .await;

    assert_eq!(
        response.header("access-control-allow-origin"),
        "http://localhost:3000"
    );
    assert_eq!(response.header("access-control-allow-credentials"), "true");
    assert_eq!(response.header("access-control-max-age"), "3600");
    let methods = response.header("access-control-allow-methods");
    assert!(methods.to_str().unwrap().contains("PATCH"));
}

#[tokio::test]
async fn test_rate_limit() {
    let app = spawn_app_with(test_config().with_rate_limit(3, Duration::from_secs(60)));

    for _ in 0..3 {
        app.server.get("/health").await.assert_status_ok();
    }

    let response = app.server.get("/health").await;
    let message = assert_error(&response, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(message, "Too many requests from this IP, please try again later");
}

#[tokio::test]
async fn test_rate_limit_is_per_forwarded_client() {
    let app = spawn_app_with(test_config().with_rate_limit(1, Duration::from_secs(60)));
    let forwarded = HeaderName::from_static("x-forwarded-for");

    app.server
        .get("/health")
        .add_header(forwarded.clone(), HeaderValue::from_static("10.0.0.1"))
        .await
        .assert_status_ok();
    app.server
        .get("/health")
        .add_header(forwarded.clone(), HeaderValue::from_static("10.0.0.2"))
        .await
        .assert_status_ok();

    let response = app
        .server
        .get("/health")
        .add_header(forwarded, HeaderValue::from_static("10.0.0.1"))
        .await;
    assert_error(&response, StatusCode::TOO_MANY_REQUESTS);
}
