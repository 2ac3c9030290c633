// storage/models.rs
// Saved-search records

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::VirtualHosts;

/// A stored query pair with its last comparison snapshot.
///
/// `timestamp` is milliseconds since the Unix epoch and is refreshed when the
/// search is overwritten.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedSearch {
    pub id: i64,
    pub name: String,
    pub legacy_query: String,
    pub new_query: String,
    pub virtual_hosts: VirtualHosts,
    /// Serialized `ComparisonResult` as the caller supplied it
    pub results: Value,
    pub timestamp: i64,
}

/// Input for saving a search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewSavedSearch {
    pub name: String,
    #[serde(default)]
    pub legacy_query: String,
    #[serde(default)]
    pub new_query: String,
    #[serde(default = "default_virtual_hosts")]
    pub virtual_hosts: VirtualHosts,
    #[serde(default)]
    pub results: Value,
}

// Column default, not the comparison default
fn default_virtual_hosts() -> VirtualHosts {
    VirtualHosts::Include
}

/// What a save did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "id", rename_all = "lowercase")]
pub enum SaveOutcome {
    /// A new record was inserted
    Created(i64),
    /// An existing record with the same name was replaced
    Updated(i64),
}

impl SaveOutcome {
    pub fn id(&self) -> i64 {
        match self {
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => *id,
        }
    }
}
