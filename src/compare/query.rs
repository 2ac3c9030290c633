//! Query clean-up before submission.

/// Trims surrounding whitespace and then one pair of matching surrounding
/// double quotes, so a query pasted as `"services.port: 22"` is sent as
/// `services.port: 22`. The query language itself is never inspected.
pub fn normalize_query(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}
