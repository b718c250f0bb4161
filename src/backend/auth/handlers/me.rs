//! Handler for GET /auth/me, returning the caller's public profile.

use axum::extract::State;

use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::models::PublicUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - missing or invalid token
/// * `404 Not Found` - the token outlived its user
pub async fn get_me(
    State(auth): State<AuthService>,
    AuthUser(user): AuthUser,
) -> Result<ApiJson<PublicUser>, BackendError> {
    Ok(ApiJson(auth.me(user.user_id).await?))
}
