//! Aria Storage
//!
//! Durable key-value storage for Aria.
//!
//! The playback core only needs opaque string blobs (the serialized queue and
//! the last played track), so storage is a single `key_value` table behind the
//! [`aria_core::KeyValueStore`] trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use aria_storage::{create_pool, run_migrations, SqliteKeyValueStore};
//! use aria_core::KeyValueStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://aria.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteKeyValueStore::new(pool);
//! store.set("player.queue", "[]").await?;
//! assert_eq!(store.get("player.queue").await?.as_deref(), Some("[]"));
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod memory;

pub mod key_value;

pub use context::SqliteKeyValueStore;
pub use error::StorageError;
pub use memory::MemoryKeyValueStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://aria.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    debug!("SQLite pool ready");

    Ok(pool)
}

/// Create a pool and bring its schema up to date
///
/// # Errors
///
/// Returns an error if the connection or a migration fails
pub async fn open_database(database_url: &str) -> Result<SqlitePool, StorageError> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
