/**
 * Quillpost Server Entry Point
 *
 * Loads configuration, initializes tracing, and serves the blog API.
 */

use std::net::SocketAddr;

use quillpost::backend::server::{config::load_env_files, create_app, ServerConfig, StartupError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Initialize tracing with INFO level unless RUST_LOG says otherwise
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    load_env_files();
    let config = ServerConfig::from_env()?;

    tracing::info!("[STARTUP] Server initialization started");
    let app = create_app(&config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
