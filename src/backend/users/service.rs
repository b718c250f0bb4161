/**
 * User Service
 *
 * Self-service profile updates and admin deletion.
 *
 * # Rules
 *
 * - a user may only update their own record (checked before lookup)
 * - changing `role` additionally requires the caller to be ADMIN
 * - a new password is re-hashed before storage
 * - deleting a user requires the caller to be ADMIN in the store, not just
 *   in their token, so a demoted admin loses the right immediately
 * - deleting a user removes their articles
 */

use std::sync::Arc;

use crate::backend::auth::guards::{ensure_owner, ensure_role};
use crate::backend::auth::password::hash_password;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthenticatedUser;
use crate::backend::store::{UserChanges, UserRepository};
use crate::backend::users::types::UpdateUserRequest;
use crate::shared::models::{PublicUser, Role};

const FOREIGN_UPDATE: &str = "Unauthorized action. You do not have permission to update another user's data. Ensure the user ID matches your authenticated account.";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    pub async fn update(
        &self,
        target_id: i64,
        caller: &AuthenticatedUser,
        request: UpdateUserRequest,
    ) -> Result<PublicUser, BackendError> {
        ensure_owner(caller.user_id, target_id, FOREIGN_UPDATE)?;
        request.validate()?;
        if request.role.is_some() {
            ensure_role(caller, Role::Admin)?;
        }

        if self.users.find_by_id(target_id).await?.is_none() {
            return Err(BackendError::not_found("User not found"));
        }

        let password_hash = match request.password {
            Some(password) => Some(hash_password(password, self.bcrypt_cost).await?),
            None => None,
        };

        let user = self
            .users
            .update(
                target_id,
                UserChanges {
                    email: request.email,
                    password_hash,
                    role: request.role,
                },
            )
            .await?
            .ok_or_else(|| BackendError::not_found("User not found"))?;

        tracing::info!("User {} updated", target_id);
        Ok(user.to_public())
    }

    pub async fn remove(&self, id: i64, caller: &AuthenticatedUser) -> Result<(), BackendError> {
        let stored_role = self
            .users
            .find_by_id(caller.user_id)
            .await?
            .map_or(Role::User, |user| user.role);
        ensure_role(
            &AuthenticatedUser {
                role: stored_role,
                ..caller.clone()
            },
            Role::Admin,
        )?;

        if !self.users.delete(id).await? {
            return Err(BackendError::not_found(format!("User with id - {} not found", id)));
        }
        tracing::info!("User {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::password::verify_password;
    use crate::backend::store::memory::MemoryStore;
    use crate::backend::store::NewUser;
    use crate::shared::models::User;
    use assert_matches::assert_matches;

    async fn seed(store: &MemoryStore, email: &str) -> User {
        UserRepository::create(
            store,
            NewUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
                role: Role::User,
            },
        )
        .await
        .unwrap()
    }

    fn caller(user: &User) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }

    #[tokio::test]
    async fn test_update_other_user_forbidden() {
        let store = MemoryStore::default();
        let me = seed(&store, "me@example.com").await;
        let service = UserService::new(Arc::new(store), 4);

        let err = service
            .update(me.id + 1, &caller(&me), UpdateUserRequest::default())
            .await
            .unwrap_err();
        assert_matches!(err, BackendError::Forbidden { .. });
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let store = MemoryStore::default();
        let me = seed(&store, "me@example.com").await;
        let service = UserService::new(Arc::new(store.clone()), 4);

        service
            .update(
                me.id,
                &caller(&me),
                UpdateUserRequest {
                    password: Some("new-secret".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = UserRepository::find_by_id(&store, me.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "new-secret");
        assert!(verify_password("new-secret".to_string(), stored.password_hash)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_role_change_requires_admin() {
        let store = MemoryStore::default();
        let me = seed(&store, "me@example.com").await;
        let service = UserService::new(Arc::new(store), 4);

        let escalate = UpdateUserRequest {
            role: Some(Role::Admin),
            ..Default::default()
        };
        assert_matches!(
            service.update(me.id, &caller(&me), escalate.clone()).await,
            Err(BackendError::Forbidden { .. })
        );

        let admin = AuthenticatedUser { role: Role::Admin, ..caller(&me) };
        let updated = service.update(me.id, &admin, escalate).await.unwrap();
        assert_eq!(updated.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_remove_missing_user() {
        let store = MemoryStore::default();
        let admin = seed(&store, "admin@example.com").await;
        UserRepository::update(
            &store,
            admin.id,
            UserChanges {
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let service = UserService::new(Arc::new(store), 4);

        let as_admin = AuthenticatedUser { role: Role::Admin, ..caller(&admin) };
        let err = service.remove(77, &as_admin).await.unwrap_err();
        assert_eq!(err.message(), "User with id - 77 not found");
    }

    #[tokio::test]
    async fn test_remove_checks_stored_role_over_token() {
        let store = MemoryStore::default();
        let demoted = seed(&store, "demoted@example.com").await;
        let target = seed(&store, "target@example.com").await;
        let service = UserService::new(Arc::new(store.clone()), 4);

        // token still claims ADMIN, the stored role is USER
        let stale = AuthenticatedUser { role: Role::Admin, ..caller(&demoted) };
        assert_matches!(
            service.remove(target.id, &stale).await,
            Err(BackendError::Forbidden { .. })
        );
        assert!(UserRepository::find_by_id(&store, target.id).await.unwrap().is_some());
    }
}
