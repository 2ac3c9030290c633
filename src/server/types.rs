//! API server state, payloads and error responses.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;

use crate::compare::Comparator;
use crate::error_handling::{CompareError, StoreError};
use crate::storage::{NewSavedSearch, SaveOutcome};

/// Shared state for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub comparator: Arc<Comparator>,
    pub pool: Arc<SqlitePool>,
}

/// Body of `POST /save-search`
#[derive(Debug, Deserialize)]
pub struct SaveSearchRequest {
    #[serde(flatten)]
    pub search: NewSavedSearch,
    /// Replace an existing search with the same name
    #[serde(default)]
    pub overwrite: bool,
}

/// Body returned by `POST /save-search`
#[derive(Debug, Serialize)]
pub struct SaveSearchResponse {
    pub success: bool,
    pub outcome: &'static str,
    pub id: i64,
    pub message: &'static str,
}

impl From<SaveOutcome> for SaveSearchResponse {
    fn from(outcome: SaveOutcome) -> Self {
        let (label, message) = match outcome {
            SaveOutcome::Created(_) => ("created", "Search saved successfully"),
            SaveOutcome::Updated(_) => ("updated", "Search updated successfully"),
        };
        Self {
            success: true,
            outcome: label,
            id: outcome.id(),
            message,
        }
    }
}

/// Body returned by `DELETE /delete-search/:id`
#[derive(Debug, Serialize)]
pub struct DeleteSearchResponse {
    pub success: bool,
    pub deleted: u64,
    pub message: &'static str,
}

/// Errors surfaced to API clients as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Request conflicts with stored state (409)
    #[error("{0}")]
    Conflict(String),

    /// Anything else (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<CompareError> for ApiError {
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::Validation(message) => ApiError::BadRequest(message),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(message) => ApiError::BadRequest(message),
            StoreError::DuplicateName(_) => ApiError::Conflict(err.to_string()),
            StoreError::Database(_) | StoreError::Serialization(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
