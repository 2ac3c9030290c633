// Shared test helpers for mock API bodies and comparator set-up.
//
// Each integration test file includes this with `mod helpers;`, so not every
// helper is used by every file.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::MockServer;

use hostdiff::initialization::init_client;
use hostdiff::transport::HttpTransport;
use hostdiff::{ApiCredentials, Comparator, Config};

pub const LEGACY_PATH: &str = "/api/v2/hosts/search";
pub const NEW_PATH: &str = "/v3/global/search/query";

/// Credentials the mocks expect.
pub fn test_credentials() -> ApiCredentials {
    ApiCredentials {
        legacy_api_id: "legacy-id".into(),
        legacy_api_secret: "legacy-secret".into(),
        new_api_key: "new-key".into(),
        organization_id: Some("org-123".into()),
    }
}

/// Config pointing both APIs at `server`.
pub fn test_config(server: &MockServer) -> Config {
    Config {
        legacy_url: format!("{}{}", server.uri(), LEGACY_PATH),
        new_url: format!("{}{}", server.uri(), NEW_PATH),
        timeout_seconds: 5,
        continuation_timeout_seconds: 5,
        credentials: test_credentials(),
        ..Config::default()
    }
}

/// Comparator sending real HTTP requests to `server`.
pub fn http_comparator(server: &MockServer) -> Comparator {
    let config = test_config(server);
    let client = init_client(&config).expect("Failed to build HTTP client");
    Comparator::from_config(&config, Arc::new(HttpTransport::new(client)))
}

/// One legacy search page. An empty `next` ends pagination.
pub fn legacy_page(ips: &[&str], total: u64, next: &str) -> Value {
    let hits: Vec<Value> = ips.iter().map(|ip| json!({ "ip": ip })).collect();
    json!({
        "code": 200,
        "status": "OK",
        "result": {
            "query": "services.port: 22",
            "total": total,
            "hits": hits,
            "links": { "prev": "", "next": next }
        }
    })
}

/// One new-API search page with host records.
pub fn new_page(ips: &[&str], total: u64, next: Option<&str>) -> Value {
    let hits: Vec<Value> = ips
        .iter()
        .map(|ip| json!({ "host_v1": { "resource": { "ip": ip } } }))
        .collect();
    let mut body = json!({ "result": { "hits": hits, "total_results": total } });
    if let Some(token) = next {
        body["result"]["next_page_token"] = Value::String(token.to_string());
    }
    body
}
