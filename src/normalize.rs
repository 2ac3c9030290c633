//! Schema normalization.
//!
//! Reduces one raw search hit to the IP address strings it carries. Legacy
//! hits are flat. New-API hits arrive wrapped in a self-describing envelope
//! whose key names the resource kind; [`RecordKind::classify`] picks the
//! first matching kind in priority order and only that kind's handler runs,
//! so a hit that looks like several kinds is never counted twice.

use serde_json::{Map, Value};

use crate::models::SourceApi;

/// Envelope key for web-property hits.
const WEB_PROPERTY_ENVELOPE: &str = "webproperty_v1";
/// Envelope key for host hits.
const HOST_ENVELOPE: &str = "host_v1";
/// Direct IP keys for flat hits, in lookup order.
const FLAT_IP_KEYS: [&str; 2] = ["ip", "ip_address"];

/// Resource kind of a new-API hit, borrowed from the raw record.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RecordKind<'a> {
    /// `{"webproperty_v1": {"resource": {...}}}`
    WebProperty(Option<&'a Map<String, Value>>),
    /// `{"host_v1": {"resource": {...}}}`
    Host(Option<&'a Map<String, Value>>),
    /// No envelope; IP keys sit on the hit itself.
    Flat(&'a Map<String, Value>),
}

impl<'a> RecordKind<'a> {
    /// Picks the record kind. Envelopes are checked in fixed priority order.
    fn classify(record: &'a Value) -> Option<Self> {
        let hit = record.as_object()?;
        if let Some(envelope) = hit.get(WEB_PROPERTY_ENVELOPE) {
            return Some(RecordKind::WebProperty(resource_of(envelope)));
        }
        if let Some(envelope) = hit.get(HOST_ENVELOPE) {
            return Some(RecordKind::Host(resource_of(envelope)));
        }
        Some(RecordKind::Flat(hit))
    }

    fn extract(self, out: &mut Vec<String>) {
        match self {
            RecordKind::WebProperty(resource) => {
                let Some(resource) = resource else { return };
                if let Some(hostname) = resource.get("hostname").and_then(Value::as_str) {
                    if is_numeric_hostname(hostname) {
                        out.push(hostname.to_string());
                    }
                }
                if let Some(endpoints) = resource.get("endpoints").and_then(Value::as_array) {
                    out.extend(
                        endpoints
                            .iter()
                            .filter_map(|endpoint| endpoint.get("ip"))
                            .filter_map(Value::as_str)
                            .map(str::to_string),
                    );
                }
            }
            RecordKind::Host(resource) => {
                if let Some(ip) = resource
                    .and_then(|r| r.get("ip"))
                    .and_then(Value::as_str)
                {
                    out.push(ip.to_string());
                }
            }
            RecordKind::Flat(hit) => {
                // First key present wins, even if its value is not a string
                if let Some(ip) = FLAT_IP_KEYS
                    .iter()
                    .find_map(|key| hit.get(*key))
                    .and_then(Value::as_str)
                {
                    out.push(ip.to_string());
                }
            }
        }
    }
}

fn resource_of(envelope: &Value) -> Option<&Map<String, Value>> {
    envelope.get("resource").and_then(Value::as_object)
}

/// True when the hostname, with dots removed, is a non-empty run of ASCII
/// digits (an IPv4 address used as a hostname).
fn is_numeric_hostname(hostname: &str) -> bool {
    let mut digits = hostname.chars().filter(|c| *c != '.').peekable();
    digits.peek().is_some() && digits.all(|c| c.is_ascii_digit())
}

/// Extracts the IP address strings carried by one raw hit.
///
/// Returns an empty vector when no IP-bearing field is recognized; that is
/// not an error. The function is pure: the same record always yields the
/// same addresses.
pub fn extract_ips(api: SourceApi, record: &Value) -> Vec<String> {
    let mut ips = Vec::new();
    match api {
        SourceApi::Legacy => {
            if let Some(ip) = record.get("ip").and_then(Value::as_str) {
                ips.push(ip.to_string());
            }
        }
        SourceApi::New => {
            if let Some(kind) = RecordKind::classify(record) {
                kind.extract(&mut ips);
            }
        }
    }
    ips
}
