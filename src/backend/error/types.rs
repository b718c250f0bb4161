/**
 * Backend Error Types
 *
 * This module defines the error type returned by services and handlers.
 * Every variant maps to exactly one HTTP status, and none of them is retried
 * or swallowed: they travel back to the caller as a JSON error body.
 *
 * # Error Categories
 *
 * - `Validation` - malformed input (400)
 * - `Unauthorized` - bad credentials or missing token (401)
 * - `Forbidden` - ownership or role check failed (403)
 * - `NotFound` - missing resource, or one the caller may not see (404)
 * - `Conflict` - duplicate unique value such as an email (409)
 * - `TooManyRequests` - rate limit exceeded (429)
 * - `Internal` - storage or infrastructure failure (500)
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use quillpost::backend::error::BackendError;
///
/// let err = BackendError::not_found("Article with id 3 not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed or invalid request input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Missing token, invalid token, or bad credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The caller is authenticated but not allowed to act on the resource
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// The resource does not exist or is hidden from the caller
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A unique value is already taken
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The client exceeded the request budget for the current window
    #[error("Too many requests: {message}")]
    TooManyRequests { message: String },

    /// Storage or infrastructure failure; details are logged, not returned
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Payload validation error raised by shared request checks
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::TooManyRequests {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the message returned to the caller
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::TooManyRequests { message }
            | Self::Internal { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { message } => Self::Conflict { message },
            StoreError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                Self::internal("Database error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BackendError::unauthorized("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BackendError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BackendError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            BackendError::too_many_requests("x").status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            BackendError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_shared_error() {
        let shared_error = SharedError::validation("title", "must not be empty");
        let backend_error: BackendError = shared_error.into();

        assert_eq!(backend_error.status_code(), StatusCode::BAD_REQUEST);
        assert!(backend_error.message().contains("title"));
    }

    #[test]
    fn test_store_conflict_becomes_conflict() {
        let err: BackendError = StoreError::conflict("Email already registered").into();
        match err {
            BackendError::Conflict { message } => assert_eq!(message, "Email already registered"),
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_database_error_hides_details() {
        let err: BackendError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Database error");
    }
}
