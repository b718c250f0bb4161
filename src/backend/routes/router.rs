/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router and wraps it in the
 * edge middleware.
 *
 * # Middleware Order
 *
 * Outermost first:
 * 1. Request tracing
 * 2. Rate limiting (429 before any other work)
 * 3. CORS
 * 4. Security headers
 * 5. Optional bearer-token authentication
 */

use std::time::Duration;

use axum::{
    extract::State,
    http::{
        header::{
            AUTHORIZATION, CONTENT_TYPE, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_DNS_PREFETCH_CONTROL, X_FRAME_OPTIONS,
        },
        HeaderValue, Method,
    },
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::middleware::{auth_middleware, rate_limit_middleware};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "store": state.store_kind }))
}

async fn not_found() -> BackendError {
    BackendError::not_found("Route not found")
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// - `GET /health` - liveness check
/// - `/auth/*`, `/articles*`, `/tags`, `/user/{id}` - see [`configure_api_routes`]
///
/// Unknown routes get a JSON 404.
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    // Add API routes
    let router = configure_api_routes(router);

    let router = router
        .fallback(not_found)
        .layer(from_fn_with_state(app_state.keys.clone(), auth_middleware));

    let edge = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(
            app_state.rate_limiter.clone(),
            rate_limit_middleware,
        ))
        .layer(cors_layer(config))
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_DNS_PREFETCH_CONTROL,
            HeaderValue::from_static("off"),
        ));

    router.layer(edge).with_state(app_state)
}
