/**
 * Authentication Service
 *
 * Registration, login and current-user lookup on top of the user repository.
 * Handlers stay thin and delegate here, so the rules can be tested without
 * an HTTP round trip.
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt at the configured cost
 * - Unknown email and wrong password produce the same 401 message
 * - New accounts always start with the USER role
 */

use std::sync::Arc;

use crate::backend::auth::handlers::types::{LoginRequest, RegisterRequest, TokenResponse};
use crate::backend::auth::password::{hash_password, verify_password};
use crate::backend::auth::sessions::JwtKeys;
use crate::backend::error::BackendError;
use crate::backend::store::{NewUser, UserRepository};
use crate::shared::models::{PublicUser, Role, User};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    keys: JwtKeys,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, keys: JwtKeys, bcrypt_cost: u32) -> Self {
        Self {
            users,
            keys,
            bcrypt_cost,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<TokenResponse, BackendError> {
        request.validate()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            tracing::warn!("Email already registered: {}", request.email);
            return Err(BackendError::conflict("User with this email already exists"));
        }

        let password_hash = hash_password(request.password, self.bcrypt_cost).await?;
        let user = self
            .users
            .create(NewUser {
                email: request.email,
                password_hash,
                role: Role::User,
            })
            .await?;

        tracing::info!("User registered: {} ({})", user.id, user.email);
        self.issue_token(&user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, BackendError> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Login for unknown email: {}", request.email);
                BackendError::unauthorized(INVALID_CREDENTIALS)
            })?;

        let valid = verify_password(request.password, user.password_hash.clone()).await?;
        if !valid {
            tracing::warn!("Invalid password for user: {}", user.id);
            return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
        }

        tracing::info!("User logged in: {} ({})", user.id, user.email);
        self.issue_token(&user)
    }

    pub async fn me(&self, user_id: i64) -> Result<PublicUser, BackendError> {
        let user = self.users.find_by_id(user_id).await?.ok_or_else(|| {
            tracing::warn!("Token refers to missing user: {}", user_id);
            BackendError::not_found("User not found")
        })?;
        Ok(user.to_public())
    }

    fn issue_token(&self, user: &User) -> Result<TokenResponse, BackendError> {
        let access_token = self.keys.create_token(user).map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            BackendError::internal("Server error")
        })?;
        Ok(TokenResponse { access_token })
    }
}
