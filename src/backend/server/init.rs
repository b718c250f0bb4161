/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, state creation, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Open the PostgreSQL pool and run migrations, or fall back to the
 *    in-memory store when no database is configured
 * 2. Build the services and `AppState`
 * 3. Create and configure the router
 * 4. Start the periodic rate-limiter cleanup task
 */

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;

use crate::backend::articles::ArticleService;
use crate::backend::auth::{AuthService, JwtKeys};
use crate::backend::middleware::RateLimiter;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::Store;
use crate::backend::users::UserService;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database startup failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the application state over an already selected store
pub fn build_state(config: &ServerConfig, store: Store) -> AppState {
    let keys = JwtKeys::new(&config.jwt_secret, config.jwt_ttl_secs);

    AppState {
        auth: AuthService::new(Arc::clone(&store.users), keys.clone(), config.bcrypt_cost),
        users: UserService::new(Arc::clone(&store.users), config.bcrypt_cost),
        articles: ArticleService::new(&store),
        keys,
        rate_limiter: RateLimiter::new(config.rate_limit_max, config.rate_limit_window),
        store_kind: store.kind(),
    }
}

/// Assemble the router over a given store, without background tasks
pub fn build_app(config: &ServerConfig, store: Store) -> Router {
    create_router(build_state(config, store), config)
}

/// Create and configure the Axum application
///
/// # Error Handling
///
/// - Missing database settings: the in-memory store is used and a warning logged
/// - Connection or migration failure: startup fails
pub async fn create_app(config: &ServerConfig) -> Result<Router, StartupError> {
    tracing::info!("Initializing quillpost backend server");

    // Step 1: Select the store
    let store = match &config.database {
        Some(settings) => Store::postgres(connect_database(settings).await?),
        None => {
            tracing::warn!("No database configured. Data is kept in memory and lost on restart.");
            Store::memory()
        }
    };
    tracing::info!("Using {} store", store.kind());

    // Step 2: Create app state
    let app_state = build_state(config, store);

    // Step 3: Create router with all routes
    let app = create_router(app_state.clone(), config);

    // Step 4: Start periodic cleanup task for rate-limit windows
    let limiter = app_state.rate_limiter.clone();
    tokio::spawn(async move {
        // interval panics on a zero period
        let period = limiter.window().max(Duration::from_secs(1));
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let purged = limiter.purge_expired();
            tracing::debug!("Purged {} expired rate-limit windows", purged);
        }
    });

    tracing::info!("Router configured with periodic cleanup task");

    Ok(app)
}
