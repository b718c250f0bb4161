/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration from
 * the environment, and opening the optional PostgreSQL connection.
 *
 * # Configuration Sources
 *
 * `dotenv` first loads `config/env/.env.<APP_ENV>` (`APP_ENV` defaults to
 * `dev`) and then `.env`. Variables already set in the process environment
 * win over both files.
 *
 * | Variable | Default |
 * |---|---|
 * | `SERVER_PORT` | `3000` |
 * | `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASS`/`DB_NAME` | in-memory store |
 * | `DB_MAX_CONNECTIONS` | `10` |
 * | `JWT_SECRET` | development secret, required with a database |
 * | `JWT_TTL_SECS` | `2592000` (30 days) |
 * | `SALT` | `10` |
 * | `CORS_ORIGIN` | `http://localhost:3000` |
 * | `RATE_LIMIT_MAX` | `100` |
 * | `RATE_LIMIT_WINDOW_SECS` | `900` |
 *
 * # Error Handling
 *
 * Malformed values fail startup with a [`ConfigError`]. When a database is
 * configured, connection and migration failures also fail startup.
 */

use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use thiserror::Error;

const DEV_JWT_SECRET: &str = "quillpost-dev-secret-change-me";
const DB_PARTS: [&str; 5] = ["DB_HOST", "DB_PORT", "DB_USER", "DB_PASS", "DB_NAME"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Incomplete database settings, missing {0}")]
    IncompleteDatabase(&'static str),

    #[error("JWT_SECRET must be set when a database is configured")]
    MissingJwtSecret,
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Connection options are kept structured so `DB_*` parts never pass
/// through URL syntax
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub options: PgConnectOptions,
    pub max_connections: u32,
}

/// Runtime settings for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// `None` runs on the in-memory store
    pub database: Option<DatabaseSettings>,
    pub jwt_secret: String,
    pub jwt_ttl_secs: u64,
    pub bcrypt_cost: u32,
    pub cors_origin: HeaderValue,
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_ttl_secs: 30 * 24 * 60 * 60,
            bcrypt_cost: 10,
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            rate_limit_max: 100,
            rate_limit_window: Duration::from_secs(15 * 60),
        }
    }
}

fn parse<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| ConfigError::invalid(key, &value, e)),
        None => Ok(default),
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup, used by tests
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = parse("SERVER_PORT", get("SERVER_PORT"), defaults.port)?;
        let max_connections = parse("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 10u32)?;

        let database = match get("DATABASE_URL") {
            Some(url) => {
                // the URL carries the password, keep it out of the error
                let options = PgConnectOptions::from_str(url.trim())
                    .map_err(|e| ConfigError::invalid("DATABASE_URL", "<redacted>", e))?;
                Some(DatabaseSettings { options, max_connections })
            }
            None if DB_PARTS.iter().any(|key| get(*key).is_some()) => {
                let mut parts = Vec::with_capacity(DB_PARTS.len());
                for key in DB_PARTS {
                    parts.push(get(key).ok_or(ConfigError::IncompleteDatabase(key))?);
                }
                let db_port: u16 = parse("DB_PORT", Some(parts[1].clone()), 5432)?;
                let options = PgConnectOptions::new()
                    .host(parts[0].trim())
                    .port(db_port)
                    .username(&parts[2])
                    .password(&parts[3])
                    .database(&parts[4]);
                Some(DatabaseSettings { options, max_connections })
            }
            None => None,
        };

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            // the fallback secret is only for the in-memory store
            None if database.is_some() => return Err(ConfigError::MissingJwtSecret),
            None => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                defaults.jwt_secret
            }
        };

        let jwt_ttl_secs = parse("JWT_TTL_SECS", get("JWT_TTL_SECS"), defaults.jwt_ttl_secs)?;

        let bcrypt_cost = parse("SALT", get("SALT"), defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::invalid(
                "SALT",
                &bcrypt_cost.to_string(),
                "bcrypt cost must be between 4 and 31",
            ));
        }

        let cors_origin = match get("CORS_ORIGIN") {
            // credentials are allowed, which rules out a wildcard origin
            Some(origin) if origin.trim() == "*" => {
                return Err(ConfigError::invalid(
                    "CORS_ORIGIN",
                    &origin,
                    "wildcard origin cannot be used with credentials",
                ));
            }
            Some(origin) => HeaderValue::from_str(origin.trim())
                .map_err(|e| ConfigError::invalid("CORS_ORIGIN", &origin, e))?,
            None => defaults.cors_origin,
        };

        let rate_limit_max = parse("RATE_LIMIT_MAX", get("RATE_LIMIT_MAX"), defaults.rate_limit_max)?;
        if rate_limit_max == 0 {
            return Err(ConfigError::invalid(
                "RATE_LIMIT_MAX",
                "0",
                "at least one request per window must be allowed",
            ));
        }
        let window_secs = parse(
            "RATE_LIMIT_WINDOW_SECS",
            get("RATE_LIMIT_WINDOW_SECS"),
            defaults.rate_limit_window.as_secs(),
        )?;
        if window_secs == 0 {
            return Err(ConfigError::invalid(
                "RATE_LIMIT_WINDOW_SECS",
                "0",
                "window must be at least one second",
            ));
        }

        Ok(Self {
            port,
            database,
            jwt_secret,
            jwt_ttl_secs,
            bcrypt_cost,
            cors_origin,
            rate_limit_max,
            rate_limit_window: Duration::from_secs(window_secs),
        })
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn with_rate_limit(mut self, max: u32, window: Duration) -> Self {
        self.rate_limit_max = max;
        self.rate_limit_window = window;
        self
    }

    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }
}

/// Load `config/env/.env.<APP_ENV>` and then `.env`, if present
pub fn load_env_files() {
    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
    let env_file = format!("config/env/.env.{}", app_env);

    match dotenv::from_filename(&env_file) {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(_) => tracing::debug!("No environment file at {}", env_file),
    }
    dotenv::dotenv().ok();
}

/// Open the connection pool and bring the schema up to date
pub async fn connect_database(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(settings.options.clone())
        .await?;

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
