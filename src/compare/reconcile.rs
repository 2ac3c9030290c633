//! Three-way classification of two fetch outcomes.

use crate::models::{
    ComparisonResult, ComparisonStatus, ComparisonSummary, FetchOutcome, SideSummary,
};

/// Reconciles the legacy and new outcomes.
///
/// Status is `error` if either side failed, otherwise `warning` when some
/// legacy IP is missing from the new results, otherwise `success`. The
/// differences are computed from whatever each side gathered, errors or not.
pub fn reconcile(legacy: &FetchOutcome, new: &FetchOutcome) -> ComparisonResult {
    let missing_in_new = legacy.identifiers.difference(&new.identifiers);
    let only_in_new = new.identifiers.difference(&legacy.identifiers);
    let common = legacy.identifiers.intersection_count(&new.identifiers);

    let status = if legacy.is_error() || new.is_error() {
        ComparisonStatus::Error
    } else if !missing_in_new.is_empty() {
        ComparisonStatus::Warning
    } else {
        ComparisonStatus::Success
    };

    ComparisonResult {
        status,
        legacy: SideSummary::from(legacy),
        new: SideSummary::from(new),
        comparison: ComparisonSummary {
            common,
            missing_in_new,
            only_in_new,
        },
    }
}
