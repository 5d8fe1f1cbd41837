//! # MicroTrack DB
//!
//! PostgreSQL connection pool initialization using SQLx.
//!
//! # Example
//!
//! ```ignore
//! use microtrack_config::DatabaseConfig;
//! use microtrack_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sqlx::Error> {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//!     Ok(())
//! }
//! ```

use microtrack_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

/// Connects a pool sized and timed by `config`.
///
/// The returned pool is cheaply cloneable and should be created once at
/// startup, then shared through the application state.
///
/// # Errors
///
/// Returns the underlying [`sqlx::Error`] when the database cannot be reached
/// within `config.acquire_timeout`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.max_connections,
        timeout_secs = config.acquire_timeout.as_secs(),
        "Connecting to PostgreSQL"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
