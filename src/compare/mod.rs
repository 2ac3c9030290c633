//! Dual fetch orchestration and reconciliation.
//!
//! A [`Comparator`] owns the transport and both API profiles. Each
//! comparison validates the two queries, paginates both APIs concurrently
//! (the loops share nothing) and reconciles the two outcomes. A failure on
//! one side never stops or hides the other side.

mod query;
mod reconcile;

use std::sync::Arc;
use std::time::Duration;

use log::info;
use serde::Deserialize;

use crate::config::{Config, VirtualHosts};
use crate::error_handling::CompareError;
use crate::models::{ComparisonResult, FetchOutcome};
use crate::paginate::{paginate, FetchOptions, SourceProfile};
use crate::transport::Transport;

pub use query::normalize_query;
pub use reconcile::reconcile;

/// One comparison request: a query per API plus shared options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub legacy_query: String,
    #[serde(default)]
    pub new_query: String,
    #[serde(default)]
    pub virtual_hosts: VirtualHosts,
    #[serde(default)]
    pub fetch_all: bool,
}

/// Runs comparisons against both search APIs.
#[derive(Clone)]
pub struct Comparator {
    transport: Arc<dyn Transport>,
    legacy: SourceProfile,
    new: SourceProfile,
    page_size: u32,
    max_pages: Option<usize>,
    continuation_timeout: Duration,
}

impl Comparator {
    /// Builds a comparator from explicit profiles.
    pub fn new(transport: Arc<dyn Transport>, legacy: SourceProfile, new: SourceProfile) -> Self {
        let defaults = FetchOptions::default();
        Self {
            transport,
            legacy,
            new,
            page_size: defaults.page_size,
            max_pages: defaults.max_pages,
            continuation_timeout: defaults.continuation_timeout,
        }
    }

    /// Builds a comparator for the endpoints, credentials and paging settings
    /// in `config`.
    pub fn from_config(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let legacy = SourceProfile::legacy(config.legacy_url.clone(), &config.credentials);
        let new = SourceProfile::new_platform(config.new_url.clone(), &config.credentials);
        Self::new(transport, legacy, new)
            .with_page_size(config.page_size)
            .with_max_pages(config.max_pages)
            .with_continuation_timeout(config.continuation_timeout())
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_continuation_timeout(mut self, timeout: Duration) -> Self {
        self.continuation_timeout = timeout;
        self
    }

    fn fetch_options(&self, request: &CompareRequest) -> FetchOptions {
        FetchOptions {
            page_size: self.page_size,
            fetch_all: request.fetch_all,
            max_pages: self.max_pages,
            virtual_hosts: request.virtual_hosts,
            continuation_timeout: self.continuation_timeout,
        }
    }

    /// Paginates both APIs concurrently and returns `(legacy, new)`.
    ///
    /// Queries are used as given.
    pub async fn fetch_both(
        &self,
        legacy_query: &str,
        new_query: &str,
        options: &FetchOptions,
    ) -> (FetchOutcome, FetchOutcome) {
        let transport = self.transport.as_ref();
        tokio::join!(
            paginate(transport, &self.legacy, legacy_query, options),
            paginate(transport, &self.new, new_query, options),
        )
    }

    /// Validates and normalizes the queries, fetches both sides and
    /// reconciles them.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::Validation` without issuing any request when
    /// either query is empty after normalization. Fetch failures are not
    /// errors here; they are reported inside the result.
    pub async fn compare(&self, request: &CompareRequest) -> Result<ComparisonResult, CompareError> {
        let legacy_query = normalize_query(&request.legacy_query);
        let new_query = normalize_query(&request.new_query);
        if legacy_query.is_empty() || new_query.is_empty() {
            return Err(CompareError::Validation(
                "Both queries are required".to_string(),
            ));
        }

        let options = self.fetch_options(request);
        let (legacy, new) = self.fetch_both(legacy_query, new_query, &options).await;
        let result = reconcile(&legacy, &new);

        info!(
            "Comparison {}: {} common, {} missing in new, {} only in new",
            result.status,
            result.comparison.common,
            result.comparison.missing_in_new.len(),
            result.comparison.only_in_new.len()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiCredentials;
    use crate::error_handling::TransportError;
    use crate::models::ComparisonStatus;
    use crate::transport::scripted::ScriptedTransport;
    use crate::transport::Payload;
    use serde_json::{json, Value};

    const LEGACY: &str = "http://legacy.test/search";
    const NEW: &str = "http://new.test/query";

    fn comparator(transport: Arc<ScriptedTransport>) -> Comparator {
        let credentials = ApiCredentials::default();
        Comparator::new(
            transport,
            SourceProfile::legacy(LEGACY, &credentials),
            SourceProfile::new_platform(NEW, &credentials),
        )
    }

    fn legacy_body(ips: &[&str]) -> Value {
        let hits: Vec<Value> = ips.iter().map(|ip| json!({"ip": ip})).collect();
        json!({"result": {"total": ips.len(), "hits": hits, "links": {"next": ""}}})
    }

    fn new_body(ips: &[&str]) -> Value {
        let hits: Vec<Value> = ips
            .iter()
            .map(|ip| json!({"host_v1": {"resource": {"ip": ip}}}))
            .collect();
        json!({"result": {"hits": hits}})
    }

    fn request(legacy: &str, new: &str) -> CompareRequest {
        CompareRequest {
            legacy_query: legacy.into(),
            new_query: new.into(),
            ..CompareRequest::default()
        }
    }

    #[tokio::test]
    async fn test_compare_overlapping_results() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push(LEGACY, Ok(legacy_body(&["1.1.1.1", "2.2.2.2"])))
            .push(NEW, Ok(new_body(&["2.2.2.2", "3.3.3.3"])));

        let result = comparator(transport.clone())
            .compare(&request("services.port: 22", "host.services.port: 22"))
            .await
            .expect("comparison should run");

        assert_eq!(result.status, ComparisonStatus::Warning);
        assert_eq!(result.comparison.common, 1);
        assert_eq!(result.comparison.missing_in_new, vec!["1.1.1.1"]);
        assert_eq!(result.comparison.only_in_new, vec!["3.3.3.3"]);
    }

    #[tokio::test]
    async fn test_one_side_failure_does_not_suppress_other() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push(
                LEGACY,
                Err(TransportError::Network {
                    message: "connection refused".into(),
                }),
            )
            .push(NEW, Ok(new_body(&["9.9.9.9"])));

        let result = comparator(transport.clone())
            .compare(&request("a", "b"))
            .await
            .expect("comparison should run");

        assert_eq!(result.status, ComparisonStatus::Error);
        assert!(result.legacy.ips.is_empty());
        assert_eq!(
            result.legacy.error.as_deref(),
            Some("Network error: connection refused")
        );
        assert_eq!(result.new.ips, vec!["9.9.9.9"]);
        assert!(result.new.error.is_none());
        assert_eq!(result.comparison.only_in_new, vec!["9.9.9.9"]);
        assert!(result.comparison.missing_in_new.is_empty());
        assert_eq!(transport.requests_to(NEW).len(), 1);
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_without_requests() {
        let transport = Arc::new(ScriptedTransport::new());
        let comparator = comparator(transport.clone());

        for (legacy, new) in [("", "b"), ("a", "   "), ("\"\"", "b")] {
            let err = comparator
                .compare(&request(legacy, new))
                .await
                .unwrap_err();
            assert_eq!(
                err,
                CompareError::Validation("Both queries are required".into())
            );
        }
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_queries_are_normalized_and_options_passed() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push(LEGACY, Ok(legacy_body(&[])))
            .push(NEW, Ok(new_body(&[])));

        let comparator = comparator(transport.clone()).with_page_size(25);
        let result = comparator
            .compare(&CompareRequest {
                legacy_query: "  \"services.port: 443\" ".into(),
                new_query: "host.services.port: 443".into(),
                virtual_hosts: VirtualHosts::Include,
                fetch_all: false,
            })
            .await
            .unwrap();
        assert_eq!(result.status, ComparisonStatus::Success);

        let legacy_request = &transport.requests_to(LEGACY)[0];
        let Payload::Query(pairs) = &legacy_request.payload else {
            panic!("legacy requests use query parameters");
        };
        assert!(pairs.contains(&("q".into(), "services.port: 443".into())));
        assert!(pairs.contains(&("per_page".into(), "25".into())));
        assert!(pairs.contains(&("virtual_hosts".into(), "INCLUDE".into())));

        let new_request = &transport.requests_to(NEW)[0];
        assert_eq!(
            new_request.payload,
            Payload::Json(json!({"query": "host.services.port: 443", "page_size": 25}))
        );
    }

    #[test]
    fn test_compare_request_defaults() {
        let request: CompareRequest =
            serde_json::from_value(json!({"legacy_query": "a", "new_query": "b"})).unwrap();
        assert_eq!(request.virtual_hosts, VirtualHosts::Exclude);
        assert!(!request.fetch_all);

        let request: CompareRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.legacy_query.is_empty());
    }

    #[test]
    fn test_from_config_uses_configured_endpoints() {
        let config = Config {
            legacy_url: "http://legacy.example/v2".into(),
            new_url: "http://new.example/v3".into(),
            page_size: 10,
            max_pages: Some(4),
            ..Config::default()
        };
        let comparator =
            Comparator::from_config(&config, Arc::new(ScriptedTransport::new()));
        assert_eq!(comparator.legacy.url(), "http://legacy.example/v2");
        assert_eq!(comparator.new.url(), "http://new.example/v3");

        let options = comparator.fetch_options(&CompareRequest::default());
        assert_eq!(options.page_size, 10);
        assert_eq!(options.max_pages, Some(4));
        assert_eq!(options.continuation_timeout, config.continuation_timeout());
    }
}
