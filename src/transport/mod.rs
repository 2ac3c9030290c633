//! Transport boundary.
//!
//! The paginator talks to the search APIs only through [`Transport`]. A
//! request names its method, URL, credentials, headers, parameters and an
//! optional per-request time bound; a successful call yields the HTTP status
//! and the decoded JSON body. Non-2xx responses and network failures come
//! back as [`TransportError`] with the raw body kept for diagnostics.
//!
//! Continuation tokens travel inside the JSON body for both APIs, so the
//! response carries no separate link list; the per-API profile reads them.

mod http;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error_handling::TransportError;

pub use http::HttpTransport;

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Credentials attached to a request.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    None,
    Basic { username: String, password: String },
    Bearer { token: String },
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::None => write!(f, "None"),
            Auth::Basic { username, .. } => write!(f, "Basic({username}:<redacted>)"),
            Auth::Bearer { .. } => write!(f, "Bearer(<redacted>)"),
        }
    }
}

/// Request parameters: URL query pairs or a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Query(Vec<(String, String)>),
    Json(Value),
}

/// One API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub auth: Auth,
    pub headers: Vec<(String, String)>,
    pub payload: Payload,
    /// Per-request time bound; `None` uses the client default
    pub timeout: Option<Duration>,
}

/// A successful (2xx) API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// Performs API calls for the paginator.
///
/// Implementations must not retry; a failed call is reported once and the
/// paginator decides what to keep.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and decodes the JSON body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on a non-2xx status (with the response
    /// body when readable), a timeout, a network failure, or an undecodable
    /// body.
    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}
