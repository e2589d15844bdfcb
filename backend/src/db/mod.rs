//! Postgres pool behind the sqlx-backed stores
//!
//! Only built when `database.backend = "postgres"`; the memory backend never
//! touches this module.

use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const MIN_CONNECTIONS: u32 = 1;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(MIN_CONNECTIONS.min(max_connections))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .test_before_acquire(true)
}

/// Connect the pool shared by the user, cat and breed repositories
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(database_url)?.application_name("cattery");
    let pool = pool_options(max_connections)
        .connect_with(connect_options)
        .await?;

    info!(max_connections, "Connected to credential database");
    Ok(pool)
}

/// Apply `backend/migrations` (users, breeds, cats)
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Schema up to date");
    Ok(())
}

/// Round-trip used by `UserStore::ping` and the readiness probe
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
        warn!(error = %e, "Credential database unreachable");
        e
    })?;
    Ok(())
}
