//! Comparison handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::super::types::{ApiError, AppState};
use crate::compare::CompareRequest;
use crate::models::ComparisonResult;

/// Runs one comparison.
///
/// Fetch failures on either side still answer 200; they are reported in the
/// result's `status` and per-side `error`.
pub async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<ComparisonResult>, ApiError> {
    let Json(request) = payload?;
    let result = state.comparator.compare(&request).await?;
    Ok(Json(result))
}

/// Liveness probe
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
