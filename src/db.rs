//! Database pool configuration and migrations

use anyhow::Result;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create the SQLite connection pool for a file-backed database
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| anyhow::anyhow!("Invalid database URL {}: {}", database_url, e))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        // SQLite is single-writer, but can have multiple readers
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .connect_with(options)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))
}

/// Create a pool over a private in-memory database.
///
/// Every SQLite connection to `:memory:` opens its own database, so the pool
/// is pinned to a single connection that is never recycled.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open in-memory database: {}", e))
}

/// Apply the embedded migrations.
///
/// Uses SQLite's `_sqlx_migrations` table to track applied migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let pending = MIGRATOR
        .migrations
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .count();
    info!("Checking {} migrations", pending);

    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    info!("Migrations complete");
    Ok(())
}
