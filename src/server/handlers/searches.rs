//! Saved-search handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;

use super::super::types::{
    ApiError, AppState, DeleteSearchResponse, SaveSearchRequest, SaveSearchResponse,
};
use crate::storage::{delete_search, list_searches, save_search, SavedSearch};

pub async fn save_search_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveSearchRequest>, JsonRejection>,
) -> Result<Json<SaveSearchResponse>, ApiError> {
    let Json(request) = payload?;
    let outcome = save_search(&state.pool, &request.search, request.overwrite).await?;
    Ok(Json(outcome.into()))
}

pub async fn load_searches_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<SavedSearch>>, ApiError> {
    Ok(Json(list_searches(&state.pool).await?))
}

/// Deleting an unknown id succeeds with `deleted: 0`.
pub async fn delete_search_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteSearchResponse>, ApiError> {
    let Path(id) = id?;
    let deleted = delete_search(&state.pool, id).await?;
    Ok(Json(DeleteSearchResponse {
        success: true,
        deleted,
        message: "Search deleted successfully",
    }))
}
