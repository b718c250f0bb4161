/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct holds the services built over the selected store,
 * the JWT keys used by the auth middleware, and the rate limiter. Every
 * field is cheap to clone: services hold `Arc`ed repositories.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers take only the service they
 * need, e.g. `State(articles): State<ArticleService>`.
 */

use axum::extract::FromRef;

use crate::backend::articles::ArticleService;
use crate::backend::auth::{AuthService, JwtKeys};
use crate::backend::middleware::RateLimiter;
use crate::backend::users::UserService;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: UserService,
    pub articles: ArticleService,
    /// Verifies bearer tokens in the auth middleware
    pub keys: JwtKeys,
    pub rate_limiter: RateLimiter,
    /// `"memory"` or `"postgres"`, reported by `/health`
    pub store_kind: &'static str,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for UserService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for ArticleService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.articles.clone()
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.keys.clone()
    }
}

impl FromRef<AppState> for RateLimiter {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.rate_limiter.clone()
    }
}
