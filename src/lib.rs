//! hostdiff library: compare host search results between two search APIs
//!
//! This library runs the same logical query against a legacy host search API
//! and its replacement, normalizes every record to its IP address, and
//! reports which hosts each side returned that the other did not. Query
//! pairs and their results can be saved to a local SQLite database.
//!
//! # Example
//!
//! ```no_run
//! use hostdiff::{run_comparison, ApiCredentials, CompareRequest, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     credentials: ApiCredentials::from_env()?,
//!     ..Default::default()
//! };
//! let request = CompareRequest {
//!     legacy_query: "services.port: 22".into(),
//!     new_query: "host.services.port: 22".into(),
//!     fetch_all: true,
//!     ..Default::default()
//! };
//!
//! let result = run_comparison(&config, &request).await?;
//! println!("{} hosts missing in the new API", result.comparison.missing_in_new.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod compare;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod models;
pub mod normalize;
pub mod paginate;
pub mod server;
pub mod storage;
pub mod transport;

// Re-export public API
pub use compare::{CompareRequest, Comparator};
pub use config::{ApiCredentials, Config, LogFormat, LogLevel, VirtualHosts};
pub use models::{ComparisonResult, ComparisonStatus};
pub use run::{open_store, run_comparison, save_comparison};
pub use server::run_server;

// Entry points shared by the CLI and library users
mod run {
    use std::path::Path;
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use sqlx::SqlitePool;

    use crate::compare::{CompareRequest, Comparator};
    use crate::config::Config;
    use crate::error_handling::StoreError;
    use crate::initialization::init_client;
    use crate::models::ComparisonResult;
    use crate::storage::{
        init_db_pool_with_path, run_migrations, save_search, NewSavedSearch, SaveOutcome,
    };
    use crate::transport::HttpTransport;

    /// Opens (creating if needed) and migrates the saved-search database.
    pub async fn open_store(db_path: &Path) -> Result<Arc<SqlitePool>> {
        let pool = init_db_pool_with_path(db_path)
            .await
            .context("Failed to initialize database")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(pool)
    }

    /// Runs one comparison over HTTP with the endpoints and credentials in
    /// `config`.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built or a query is empty. API
    /// failures are reported inside the returned result instead.
    pub async fn run_comparison(
        config: &Config,
        request: &CompareRequest,
    ) -> Result<ComparisonResult> {
        let client = init_client(config).context("Failed to initialize HTTP client")?;
        let comparator = Comparator::from_config(config, Arc::new(HttpTransport::new(client)));
        Ok(comparator.compare(request).await?)
    }

    /// Saves `request`'s query pair with `result` as the snapshot.
    pub async fn save_comparison(
        pool: &SqlitePool,
        name: &str,
        request: &CompareRequest,
        result: &ComparisonResult,
        overwrite: bool,
    ) -> Result<SaveOutcome, StoreError> {
        let search = NewSavedSearch {
            name: name.to_string(),
            legacy_query: request.legacy_query.clone(),
            new_query: request.new_query.clone(),
            virtual_hosts: request.virtual_hosts,
            results: serde_json::to_value(result)?,
        };
        save_search(pool, &search, overwrite).await
    }
}
