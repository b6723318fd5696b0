//! Pool setup
//!
//! A process runs exactly one command, so the pool never holds more than one
//! connection and gets no retry or timeout tuning beyond sqlx defaults.

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Options for the single-connection pool.
pub fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new().max_connections(1)
}

/// Connect to `database_url`. Failures come back as the raw `sqlx::Error`.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    pool_options().connect(database_url).await
}
