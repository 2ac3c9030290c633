//! Comparison data model.
//!
//! Identifier sets, per-API fetch outcomes, and the comparison result handed
//! to callers. The JSON shape of [`ComparisonResult`] is what the HTTP API
//! returns and what saved searches store as their snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// The search API a record, request, or outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SourceApi {
    /// The older host-search service
    Legacy,
    /// The replacement platform search service
    New,
}

/// Set of discovered IP address strings.
///
/// String equality is the comparison key; no address parsing or canonical
/// binary form is applied. Iteration is always in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentifierSet(BTreeSet<String>);

impl IdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an identifier. Returns `false` if it was already present.
    pub fn insert(&mut self, ip: impl Into<String>) -> bool {
        self.0.insert(ip.into())
    }

    pub fn contains(&self, ip: &str) -> bool {
        self.0.contains(ip)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    /// Number of identifiers present in both sets.
    pub fn intersection_count(&self, other: &IdentifierSet) -> usize {
        self.0.intersection(&other.0).count()
    }

    /// Identifiers in `self` but not in `other`, sorted.
    pub fn difference(&self, other: &IdentifierSet) -> Vec<String> {
        self.0.difference(&other.0).cloned().collect()
    }

    /// All identifiers, sorted.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl Extend<String> for IdentifierSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<String> for IdentifierSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for IdentifierSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

/// Result of paginating one API.
///
/// When `error` is set, `identifiers` still holds everything gathered from
/// the pages fetched before the failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    pub identifiers: IdentifierSet,
    /// Total result count reported by the API (or the IPs seen when it reports none)
    pub total_hint: u64,
    /// Rendered failure description, if pagination stopped on an error
    pub error: Option<String>,
    /// Pages successfully fetched
    pub pages: usize,
}

impl FetchOutcome {
    /// Outcome for a side whose first page failed.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Overall status of a comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComparisonStatus {
    /// Both fetches completed and nothing from legacy is missing in new
    Success,
    /// Both fetches completed but some legacy IPs are missing in new
    Warning,
    /// At least one fetch failed; the differences cover partial data
    Error,
}

/// Per-API section of a [`ComparisonResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideSummary {
    pub total: u64,
    pub fetched: usize,
    pub ips: Vec<String>,
    pub error: Option<String>,
    #[serde(default)]
    pub pages: usize,
}

impl From<&FetchOutcome> for SideSummary {
    fn from(outcome: &FetchOutcome) -> Self {
        Self {
            total: outcome.total_hint,
            fetched: outcome.identifiers.len(),
            ips: outcome.identifiers.to_sorted_vec(),
            error: outcome.error.clone(),
            pages: outcome.pages,
        }
    }
}

/// Set-difference section of a [`ComparisonResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub common: usize,
    pub missing_in_new: Vec<String>,
    pub only_in_new: Vec<String>,
}

/// Reconciled view of a legacy and a new fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub status: ComparisonStatus,
    pub legacy: SideSummary,
    pub new: SideSummary,
    pub comparison: ComparisonSummary,
}
