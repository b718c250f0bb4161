/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /auth/login.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Invalid credentials return 401 Unauthorized (no information leakage)
 * - User passwords are never returned in responses
 */

use axum::extract::State;

use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - user not found or password incorrect
/// * `500 Internal Server Error` - storage or token generation failed
pub async fn login(
    State(auth): State<AuthService>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<ApiJson<TokenResponse>, BackendError> {
    tracing::info!("Login request for: {}", request.email);
    Ok(ApiJson(auth.login(request).await?))
}
