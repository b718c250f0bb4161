//! Test server construction
//!
//! Every test gets its own app over a fresh in-memory store, so tests do not
//! share users, articles or rate-limit windows.

use axum_test::TestServer;
use quillpost::backend::build_app;
use quillpost::backend::server::ServerConfig;
use quillpost::backend::store::Store;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Defaults with the cheapest bcrypt cost
pub fn test_config() -> ServerConfig {
    ServerConfig::default()
        .with_bcrypt_cost(4)
        .with_jwt_secret(TEST_JWT_SECRET)
}

pub struct TestApp {
    pub server: TestServer,
    /// Direct access to the repositories behind the server
    pub store: Store,
}

pub fn spawn_app_with(config: ServerConfig) -> TestApp {
    let store = Store::memory();
    let app = build_app(&config, store.clone());
    let server = TestServer::new(app).expect("Failed to create test server");
    TestApp { server, store }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_config())
}
