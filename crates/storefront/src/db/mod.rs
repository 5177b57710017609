//! Optional `PostgreSQL` connection for durable session storage.
//!
//! The storefront keeps no data of its own: the only table is the
//! tower-sessions `session` table, created by
//! [`PostgresStore::migrate`](tower_sessions_sqlx_store::PostgresStore::migrate)
//! at startup. Without a database URL, sessions live in memory and are lost
//! on restart.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
