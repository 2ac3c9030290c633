//! Per-API request construction and page parsing.
//!
//! The legacy API is queried with `GET` and query parameters and pages with
//! a `cursor` taken from `result.links.next`. The new API is queried with a
//! JSON `POST` and pages with a `page_token` taken from
//! `result.next_page_token`. Both return hits under `result.hits`.

use serde_json::{json, Value};

use super::FetchOptions;
use crate::config::{ApiCredentials, ORGANIZATION_HEADER};
use crate::models::SourceApi;
use crate::transport::{ApiRequest, Auth, HttpMethod, Payload};

/// Total-count field names for legacy responses, in lookup order.
const LEGACY_TOTAL_FIELDS: &[&str] = &["total"];
/// Total-count field names for new responses, in lookup order. The new API
/// has renamed this field between versions; the first one present wins.
const NEW_TOTAL_FIELDS: &[&str] = &["total_results", "total_count", "total"];

/// One parsed page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    /// Raw hits, not yet normalized
    pub records: Vec<Value>,
    /// Token for the next page; `None` when this is the last page
    pub next_token: Option<String>,
    /// Total result count reported by the API, if any known field is present
    pub total_hint: Option<u64>,
}

/// Endpoint, credentials and wire format for one search API.
#[derive(Debug, Clone)]
pub struct SourceProfile {
    api: SourceApi,
    url: String,
    auth: Auth,
    headers: Vec<(String, String)>,
}

impl SourceProfile {
    /// Profile for the legacy host search API (basic auth).
    pub fn legacy(url: impl Into<String>, credentials: &ApiCredentials) -> Self {
        Self {
            api: SourceApi::Legacy,
            url: url.into(),
            auth: Auth::Basic {
                username: credentials.legacy_api_id.clone(),
                password: credentials.legacy_api_secret.clone(),
            },
            headers: Vec::new(),
        }
    }

    /// Profile for the new platform search API (bearer token).
    pub fn new_platform(url: impl Into<String>, credentials: &ApiCredentials) -> Self {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(org) = &credentials.organization_id {
            headers.push((ORGANIZATION_HEADER.to_string(), org.clone()));
        }
        Self {
            api: SourceApi::New,
            url: url.into(),
            auth: Auth::Bearer {
                token: credentials.new_api_key.clone(),
            },
            headers,
        }
    }

    pub fn api(&self) -> SourceApi {
        self.api
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Builds the request for the first page (`token == None`) or a
    /// continuation page. Continuation requests carry the continuation
    /// timeout; first-page requests use the client default.
    pub fn build_request(
        &self,
        query: &str,
        options: &FetchOptions,
        token: Option<&str>,
    ) -> ApiRequest {
        let payload = match self.api {
            SourceApi::Legacy => {
                let mut pairs = vec![
                    ("q".to_string(), query.to_string()),
                    ("per_page".to_string(), options.page_size.to_string()),
                    (
                        "virtual_hosts".to_string(),
                        options.virtual_hosts.to_string(),
                    ),
                    ("fields".to_string(), "ip".to_string()),
                ];
                if let Some(cursor) = token {
                    pairs.push(("cursor".to_string(), cursor.to_string()));
                }
                Payload::Query(pairs)
            }
            SourceApi::New => {
                let mut body = json!({
                    "query": query,
                    "page_size": options.page_size,
                });
                if let Some(page_token) = token {
                    body["page_token"] = Value::String(page_token.to_string());
                }
                Payload::Json(body)
            }
        };

        ApiRequest {
            method: match self.api {
                SourceApi::Legacy => HttpMethod::Get,
                SourceApi::New => HttpMethod::Post,
            },
            url: self.url.clone(),
            auth: self.auth.clone(),
            headers: self.headers.clone(),
            payload,
            timeout: token.map(|_| options.continuation_timeout),
        }
    }

    /// Splits a response body into hits, continuation token and total hint.
    ///
    /// A body without `result.hits` is an empty page, not an error.
    pub fn parse_page(&self, mut body: Value) -> PageResult {
        let mut result = body.get_mut("result").map(Value::take).unwrap_or_default();

        let records = match result.get_mut("hits").map(Value::take) {
            Some(Value::Array(hits)) => hits,
            _ => Vec::new(),
        };

        let token = match self.api {
            SourceApi::Legacy => result.pointer("/links/next"),
            SourceApi::New => result.get("next_page_token"),
        };
        let next_token = token
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let total_fields = match self.api {
            SourceApi::Legacy => LEGACY_TOTAL_FIELDS,
            SourceApi::New => NEW_TOTAL_FIELDS,
        };
        let total_hint = total_fields
            .iter()
            .find_map(|field| result.get(*field))
            .and_then(Value::as_u64);

        PageResult {
            records,
            next_token,
            total_hint,
        }
    }
}
