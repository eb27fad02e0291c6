//! Key-value blob queries
//!
//! Values are stored verbatim; callers own the encoding (JSON for the player
//! queue and last played track).

use sqlx::SqlitePool;

use crate::error::Result;

/// Get a single value
///
/// Returns `Ok(None)` if the key was never written
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value = sqlx::query_scalar::<_, String>("SELECT value FROM key_value WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(value)
}

/// Insert or overwrite a value
pub async fn set_value(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO key_value (key, value, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(value)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a value
///
/// Returns whether a row was removed
pub async fn delete_value(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM key_value WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// List every stored key, sorted
pub async fn list_keys(pool: &SqlitePool) -> Result<Vec<String>> {
    let keys = sqlx::query_scalar::<_, String>("SELECT key FROM key_value ORDER BY key")
        .fetch_all(pool)
        .await?;

    Ok(keys)
}
