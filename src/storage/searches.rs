//! Saved-search persistence.
//!
//! Name uniqueness is checked here before writing (reject, or overwrite when
//! asked); the table's UNIQUE constraint only backs that check up when two
//! writers race.

use log::{info, warn};
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use super::models::{NewSavedSearch, SaveOutcome, SavedSearch};
use crate::config::VirtualHosts;
use crate::error_handling::StoreError;

/// Saves a search under its (trimmed) name.
///
/// # Errors
///
/// - `StoreError::Validation` if the name is empty after trimming
/// - `StoreError::DuplicateName` if the name exists and `overwrite` is false
/// - `StoreError::Database` / `StoreError::Serialization` on storage failures
pub async fn save_search(
    pool: &SqlitePool,
    search: &NewSavedSearch,
    overwrite: bool,
) -> Result<SaveOutcome, StoreError> {
    let name = search.name.trim();
    if name.is_empty() {
        return Err(StoreError::Validation("Name is required".to_string()));
    }

    let results = serde_json::to_string(&search.results)?;
    let now_ms = chrono::Utc::now().timestamp_millis();

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM saved_searches WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    match existing {
        Some(_) if !overwrite => Err(StoreError::DuplicateName(name.to_string())),
        Some(id) => {
            // Strictly later than the previous save even within the same millisecond
            sqlx::query(
                "UPDATE saved_searches
                 SET legacy_query = ?, new_query = ?, virtual_hosts = ?, results = ?,
                     timestamp = MAX(?, timestamp + 1)
                 WHERE id = ?",
            )
            .bind(&search.legacy_query)
            .bind(&search.new_query)
            .bind(search.virtual_hosts.as_ref())
            .bind(&results)
            .bind(now_ms)
            .bind(id)
            .execute(pool)
            .await?;

            info!("Updated saved search '{name}' (id {id})");
            Ok(SaveOutcome::Updated(id))
        }
        None => {
            let inserted = sqlx::query(
                "INSERT INTO saved_searches
                     (name, legacy_query, new_query, virtual_hosts, results, timestamp)
                 VALUES (?, ?, ?, ?, ?, ?)
                 RETURNING id",
            )
            .bind(name)
            .bind(&search.legacy_query)
            .bind(&search.new_query)
            .bind(search.virtual_hosts.as_ref())
            .bind(&results)
            .bind(now_ms)
            .fetch_one(pool)
            .await;

            let row = match inserted {
                Ok(row) => row,
                Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                    return Err(StoreError::DuplicateName(name.to_string()));
                }
                Err(e) => return Err(StoreError::Database(e)),
            };
            let id: i64 = row.try_get("id")?;

            info!("Saved search '{name}' (id {id})");
            Ok(SaveOutcome::Created(id))
        }
    }
}

/// Lists saved searches, newest first.
pub async fn list_searches(pool: &SqlitePool) -> Result<Vec<SavedSearch>, StoreError> {
    let rows = sqlx::query(
        "SELECT id, name, legacy_query, new_query, virtual_hosts, results, timestamp
         FROM saved_searches
         ORDER BY timestamp DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let id: i64 = row.try_get("id")?;
            let virtual_hosts: String = row.try_get("virtual_hosts")?;
            let raw_results: String = row.try_get("results")?;

            Ok(SavedSearch {
                id,
                name: row.try_get("name")?,
                legacy_query: row.try_get("legacy_query")?,
                new_query: row.try_get("new_query")?,
                virtual_hosts: virtual_hosts.parse().unwrap_or(VirtualHosts::Include),
                results: parse_snapshot(id, raw_results),
                timestamp: row.try_get("timestamp")?,
            })
        })
        .collect()
}

// An unreadable snapshot is returned verbatim rather than failing the whole list.
fn parse_snapshot(id: i64, raw: String) -> Value {
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Saved search {id} has an unreadable result snapshot: {e}");
            Value::String(raw)
        }
    }
}

/// Deletes a saved search. Deleting an id that does not exist is not an
/// error; the number of removed rows is returned.
pub async fn delete_search(pool: &SqlitePool, id: i64) -> Result<u64, StoreError> {
    let result = sqlx::query("DELETE FROM saved_searches WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        info!("Deleted saved search {id}");
    }
    Ok(result.rows_affected())
}
