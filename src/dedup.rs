//! URL-based result deduplication.
//!
//! Two results are duplicates when their normalized URLs are equal strings.
//! No fuzzy matching. Applied per target scan, never across targets.

use std::collections::HashSet;

use url::Url;

use crate::models::RawResult;

/// Normalized form of a URL: scheme, host, port, path, and query, without the
/// fragment.
///
/// The `url` crate already lowercases scheme and host, drops default ports,
/// and resolves dot segments. Strings that do not parse as URLs are compared
/// as-is, minus any `#fragment`.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => trimmed.split('#').next().unwrap_or_default().to_string(),
    }
}

/// Keeps the first result for each normalized URL, in original order.
///
/// Idempotent: `dedupe(dedupe(xs)) == dedupe(xs)`.
pub fn dedupe(results: Vec<RawResult>) -> Vec<RawResult> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|result| seen.insert(normalize_url(&result.url)))
        .collect()
}
