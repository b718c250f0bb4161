/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /auth/register.
 *
 * # Registration Process
 *
 * 1. Validate email format and password length
 * 2. Check if user already exists
 * 3. Hash password using bcrypt
 * 4. Create user with the USER role
 * 5. Return a JWT token
 */

use axum::{extract::State, http::StatusCode};

use crate::backend::auth::handlers::types::{RegisterRequest, TokenResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid email, short password, or unknown fields
/// * `409 Conflict` - a user with this email already exists
/// * `500 Internal Server Error` - hashing, storage or token generation failed
///
/// # Example Request
///
/// ```http
/// POST /auth/register HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "secret1" }
/// ```
///
/// # Example Response
///
/// ```json
/// { "accessToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
/// ```
pub async fn register(
    State(auth): State<AuthService>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, ApiJson<TokenResponse>), BackendError> {
    tracing::info!("Register request for email: {}", request.email);
    let token = auth.register(request).await?;
    Ok((StatusCode::CREATED, ApiJson(token)))
}
