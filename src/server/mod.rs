//! JSON API for running comparisons and managing saved searches.
//!
//! Provides these endpoints:
//! - `POST /compare` - run one comparison
//! - `POST /save-search` - save (or overwrite) a named query pair and result
//! - `GET /load-searches` - saved searches, newest first
//! - `DELETE /delete-search/:id` - delete a saved search
//! - `GET /health` - liveness probe

mod handlers;
mod types;

use std::sync::Arc;

use anyhow::Context;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::compare::Comparator;
use crate::config::Config;
use crate::initialization::init_client;
use crate::storage::{init_db_pool_with_path, run_migrations};
use crate::transport::HttpTransport;
use handlers::{
    compare_handler, delete_search_handler, health_handler, load_searches_handler,
    save_search_handler,
};
pub use types::{ApiError, AppState, DeleteSearchResponse, SaveSearchRequest, SaveSearchResponse};

/// Builds the API router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/compare", post(compare_handler))
        .route("/save-search", post(save_search_handler))
        .route("/load-searches", get(load_searches_handler))
        .route("/delete-search/:id", delete(delete_search_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Opens the database, builds the comparator and serves the API on
/// `config.listen_addr` until the process is stopped.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = init_db_pool_with_path(&config.db_path)
        .await
        .context("Failed to initialize database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let client = init_client(config).context("Failed to initialize HTTP client")?;
    let transport = Arc::new(HttpTransport::new(client));
    let comparator = Comparator::from_config(config, transport);

    let state = AppState {
        comparator: Arc::new(comparator),
        pool,
    };

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind API server to {}", config.listen_addr))?;

    log::info!("API server listening on http://{}/", config.listen_addr);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    Ok(())
}
