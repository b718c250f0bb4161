//! Authentication test helpers
//!
//! Provides utilities for creating test users and obtaining tokens through
//! the public API.

use axum::http::StatusCode;
use axum_test::TestServer;
use quillpost::backend::store::{NewUser, Store};
use quillpost::shared::models::{PublicUser, Role};
use serde_json::{json, Value};

pub const TEST_PASSWORD: &str = "password123";

/// Test user credentials
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub token: String,
}

/// Register through `POST /auth/register` and return the access token
pub async fn register(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/auth/register")
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    body["accessToken"]
        .as_str()
        .expect("accessToken missing")
        .to_string()
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["accessToken"]
        .as_str()
        .expect("accessToken missing")
        .to_string()
}

pub async fn me(server: &TestServer, token: &str) -> PublicUser {
    let response = server.get("/auth/me").authorization_bearer(token).await;
    response.assert_status_ok();
    response.json()
}

/// Register a user and resolve their id
pub async fn create_test_user(server: &TestServer, email: &str) -> TestUser {
    let token = register(server, email).await;
    let user = me(server, &token).await;
    TestUser {
        id: user.id,
        email: user.email,
        token,
    }
}

/// Insert an ADMIN directly into the store, then log in through the API
///
/// Registration always grants USER, so admins cannot be created over HTTP.
pub async fn create_admin(server: &TestServer, store: &Store, email: &str) -> TestUser {
    let password_hash = bcrypt::hash(TEST_PASSWORD, 4).expect("Failed to hash password");
    let user = store
        .users
        .create(NewUser {
            email: email.to_string(),
            password_hash,
            role: Role::Admin,
        })
        .await
        .expect("Failed to seed admin");

    let token = login(server, email, TEST_PASSWORD).await;
    TestUser {
        id: user.id,
        email: user.email,
        token,
    }
}
