// src/database.rs
use std::time::Duration;

use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the shared pool without connecting; an unreachable server shows up on first use.
pub fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_timeout(database_url, ACQUIRE_TIMEOUT)
}

pub fn create_pool_with_timeout(database_url: &str, acquire_timeout: Duration) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)
}

/// Enables PostGIS and creates the `shops` table with its geography index.
pub async fn migrate(db_pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(db_pool).await
}
