// storage/migrations.rs
// Database migration management

use sqlx::{Pool, Sqlite};

use crate::error_handling::DatabaseError;

/// Runs the SQLx migrations from `migrations/`, embedded in the binary at
/// build time.
///
/// Migrations are additive: columns added after the first release carry a
/// default so rows written by older versions still load.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
