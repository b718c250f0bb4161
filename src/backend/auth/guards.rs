//! Ownership and role checks shared by the article and user services.

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthenticatedUser;
use crate::shared::models::Role;

/// Fail with Forbidden unless `actor_id` owns the resource
pub fn ensure_owner(actor_id: i64, owner_id: i64, message: &str) -> Result<(), BackendError> {
    if actor_id != owner_id {
        tracing::warn!(
            "User {} denied access to resource owned by {}",
            actor_id,
            owner_id
        );
        return Err(BackendError::forbidden(message));
    }
    Ok(())
}

/// Fail with Forbidden unless the caller holds `required`
pub fn ensure_role(user: &AuthenticatedUser, required: Role) -> Result<(), BackendError> {
    if user.role != required {
        tracing::warn!(
            "User {} with role {} denied, {} required",
            user.user_id,
            user.role,
            required
        );
        return Err(BackendError::forbidden(format!(
            "Access denied: {} role required",
            required
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn caller(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            email: "caller@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_owner_passes() {
        assert!(ensure_owner(5, 5, "nope").is_ok());
    }

    #[test]
    fn test_non_owner_forbidden() {
        let err = ensure_owner(5, 6, "nope").unwrap_err();
        assert_matches!(err, BackendError::Forbidden { message } if message == "nope");
    }

    #[test]
    fn test_role_check() {
        assert!(ensure_role(&caller(Role::Admin), Role::Admin).is_ok());
        assert_matches!(
            ensure_role(&caller(Role::User), Role::Admin),
            Err(BackendError::Forbidden { .. })
        );
    }
}
