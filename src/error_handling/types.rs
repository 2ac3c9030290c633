use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::config::MAX_ERROR_BODY_LENGTH;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Configuration errors detected at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required credential environment variable is unset or blank.
    #[error("Missing API credential: set {0} (environment or .env file)")]
    MissingCredential(&'static str),
}

/// Failure reported by the transport collaborator for a single request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Non-2xx response. `body` holds the raw response text when it could be read.
    #[error("HTTP status {status} for url ({url})")]
    Status {
        status: u16,
        url: String,
        body: Option<String>,
    },

    /// The request did not complete within its time bound.
    #[error("Request timed out for url ({url})")]
    Timeout { url: String },

    /// Connection or protocol failure before a response arrived.
    #[error("Network error: {message}")]
    Network { message: String },

    /// A 2xx response whose body was not valid JSON.
    #[error("Invalid JSON response: {message}")]
    Decode { message: String },
}

impl TransportError {
    /// Renders the error for display, appending the response body when one was
    /// recovered.
    ///
    /// Bodies longer than `MAX_ERROR_BODY_LENGTH` characters are truncated.
    pub fn describe(&self) -> String {
        match self {
            TransportError::Status {
                body: Some(body), ..
            } if !body.trim().is_empty() => {
                format!("{} - {}", self, truncate_body(body.trim()))
            }
            _ => self.to_string(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    let char_count = body.chars().count();
    if char_count <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let truncated: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
    format!("{truncated}... (truncated, {char_count} chars total)")
}

/// Failure of one side's pagination loop.
///
/// The paginator never returns this to its caller; it is rendered into
/// `FetchOutcome::error` so partial results travel with it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The first page could not be fetched; nothing was accumulated.
    #[error("{}", .0.describe())]
    Transport(TransportError),

    /// A continuation page failed; earlier pages were kept.
    #[error("Pagination error on page {page}: {}", .source.describe())]
    Pagination { page: usize, source: TransportError },
}

/// Rejected comparison requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    /// A required query is empty after normalization.
    #[error("{0}")]
    Validation(String),
}

/// Error types for saved-search storage.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required field is empty.
    #[error("{0}")]
    Validation(String),

    /// A search with this name exists and overwrite was not requested.
    #[error("A saved search named '{0}' already exists")]
    DuplicateName(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    Database(#[from] sqlx::Error),

    /// The result snapshot could not be (de)serialized.
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error types for database set-up.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_appends_body() {
        let err = TransportError::Status {
            status: 401,
            url: "https://api.example/search".into(),
            body: Some("{\"error\":\"unauthorized\"}".into()),
        };
        let described = err.describe();
        assert!(described.starts_with("HTTP status 401"));
        assert!(described.ends_with(" - {\"error\":\"unauthorized\"}"));
    }

    #[test]
    fn test_describe_without_body() {
        let err = TransportError::Status {
            status: 500,
            url: "https://api.example/search".into(),
            body: Some("   ".into()),
        };
        assert_eq!(err.describe(), err.to_string());

        let err = TransportError::Network {
            message: "connection refused".into(),
        };
        assert_eq!(err.describe(), "Network error: connection refused");
    }

    #[test]
    fn test_describe_truncates_long_body() {
        let err = TransportError::Status {
            status: 502,
            url: "u".into(),
            body: Some("x".repeat(MAX_ERROR_BODY_LENGTH + 10)),
        };
        let described = err.describe();
        assert!(described.contains("truncated"));
        assert!(described.contains(&format!("{} chars total", MAX_ERROR_BODY_LENGTH + 10)));
    }

    #[test]
    fn test_fetch_error_qualifiers() {
        let transport = TransportError::Timeout {
            url: "https://api.example/search".into(),
        };
        let first = FetchError::Transport(transport.clone());
        assert!(!first.to_string().contains("Pagination error"));

        let later = FetchError::Pagination {
            page: 3,
            source: transport,
        };
        let rendered = later.to_string();
        assert!(rendered.starts_with("Pagination error on page 3:"));
        assert!(rendered.contains("timed out"));
    }

    #[test]
    fn test_store_error_messages() {
        let err = StoreError::DuplicateName("x".into());
        assert_eq!(err.to_string(), "A saved search named 'x' already exists");
        let err = StoreError::Validation("Name is required".into());
        assert_eq!(err.to_string(), "Name is required");
    }
}
