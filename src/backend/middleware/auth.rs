/**
 * Authentication Middleware
 *
 * This module reads the bearer token from the `Authorization` header and
 * exposes the caller to handlers. Authentication is optional at this layer:
 * a missing or invalid token leaves the request anonymous instead of
 * rejecting it. Handlers then choose what they need:
 *
 * - [`AuthUser`] rejects anonymous requests with 401
 * - [`MaybeAuthUser`] yields `None` for anonymous requests
 * - [`require_admin`] is layered on routes that need the ADMIN role
 */

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::guards::ensure_role;
use crate::backend::auth::sessions::JwtKeys;
use crate::backend::error::BackendError;
use crate::shared::models::Role;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

/// Resolve the caller from the `Authorization: Bearer <token>` header
///
/// Returns `None` when the header is absent, malformed, or the token does
/// not verify.
pub fn authenticate(headers: &HeaderMap, keys: &JwtKeys) -> Option<AuthenticatedUser> {
    let auth_header = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        tracing::warn!("Invalid Authorization header format");
        return None;
    };

    let claims = match keys.verify_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Invalid token: {:?}", e);
            return None;
        }
    };

    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Invalid user ID in token: {:?}", e);
            return None;
        }
    };

    Some(AuthenticatedUser {
        user_id,
        email: claims.email,
        role: claims.role,
    })
}

/// Optional-auth middleware
///
/// Attaches an [`AuthenticatedUser`] to the request extensions when the
/// request carries a valid token, and passes every request through.
pub async fn auth_middleware(
    State(keys): State<JwtKeys>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(user) = authenticate(request.headers(), &keys) {
        tracing::debug!("Authenticated request from user {}", user.user_id);
        request.extensions_mut().insert(user);
    }
    next.run(request).await
}

/// Route-level guard requiring an authenticated ADMIN
///
/// Checks the role claimed by the token only. A token issued before a
/// demotion still passes here until it expires, so handlers behind this
/// guard must re-check the stored role.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, BackendError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| BackendError::unauthorized("Authentication required"))?;

    ensure_role(user, Role::Admin)?;
    Ok(next.run(request).await)
}

/// Axum extractor for a required authenticated user
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("Rejected unauthenticated request to {}", parts.uri.path());
                BackendError::unauthorized("Authentication required")
            })?;

        Ok(AuthUser(user))
    }
}

/// Axum extractor for optional auth; `None` when the request is anonymous
#[derive(Clone, Debug)]
pub struct MaybeAuthUser(pub Option<AuthenticatedUser>);

impl MaybeAuthUser {
    pub fn user_id(&self) -> Option<i64> {
        self.0.as_ref().map(|user| user.user_id)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::User;
    use axum::http::HeaderValue;
    use chrono::Utc;

    fn keys() -> JwtKeys {
        JwtKeys::new("middleware-secret", 3600)
    }

    fn token_for(role: Role) -> String {
        let user = User {
            id: 9,
            email: "nine@example.com".to_string(),
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
        };
        keys().create_token(&user).unwrap()
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_authenticate_valid_bearer() {
        let header = format!("Bearer {}", token_for(Role::User));
        let user = authenticate(&headers(&header), &keys()).unwrap();

        assert_eq!(
            user,
            AuthenticatedUser {
                user_id: 9,
                email: "nine@example.com".to_string(),
                role: Role::User,
            }
        );
    }

    #[test]
    fn test_authenticate_missing_header() {
        assert!(authenticate(&HeaderMap::new(), &keys()).is_none());
    }

    #[test]
    fn test_authenticate_wrong_scheme() {
        let header = format!("Basic {}", token_for(Role::User));
        assert!(authenticate(&headers(&header), &keys()).is_none());
    }

    #[test]
    fn test_authenticate_garbage_token() {
        assert!(authenticate(&headers("Bearer not-a-jwt"), &keys()).is_none());
    }

    #[tokio::test]
    async fn test_auth_user_extractor_requires_user() {
        let request = axum::http::Request::builder()
            .uri("/articles")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(BackendError::Unauthorized { .. })));

        let maybe = MaybeAuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(maybe.user_id(), None);
    }

    #[tokio::test]
    async fn test_extractors_read_extension() {
        let mut request = axum::http::Request::builder()
            .uri("/articles")
            .body(())
            .unwrap();
        request.extensions_mut().insert(AuthenticatedUser {
            user_id: 3,
            email: "three@example.com".to_string(),
            role: Role::User,
        });
        let (mut parts, _) = request.into_parts();

        let AuthUser(user) = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.user_id, 3);

        let maybe = MaybeAuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(maybe.user_id(), Some(3));
    }
}
