//! Handlers for `/user/{id}`.

use axum::{extract::State, http::StatusCode};

use crate::backend::error::BackendError;
use crate::backend::extract::{ApiJson, ApiPath};
use crate::backend::middleware::auth::AuthUser;
use crate::backend::users::service::UserService;
use crate::backend::users::types::UpdateUserRequest;
use crate::shared::models::PublicUser;

pub async fn update_user(
    State(users): State<UserService>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<ApiJson<PublicUser>, BackendError> {
    Ok(ApiJson(users.update(id, &caller, request).await?))
}

/// `require_admin` on the route rejects by token role; the service
/// re-checks the stored role
pub async fn delete_user(
    State(users): State<UserService>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, BackendError> {
    users.remove(id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
