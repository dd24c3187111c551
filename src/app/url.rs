//! Target normalization.

use log::warn;

/// Longest hostname accepted (RFC 1035 limit).
const MAX_HOSTNAME_LENGTH: usize = 253;

/// Reduces a user-supplied target to a bare hostname (optionally with port).
///
/// Strips an `http://`/`https://` prefix, a leading `www.`, and any path,
/// query, or trailing slash. Returns `None` (with a warning) for input that is
/// empty, contains whitespace, or is too long to be a hostname.
pub fn normalize_target(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();
    let without_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    let host = host.trim_end_matches('.');

    if host.is_empty() || host.contains(char::is_whitespace) || host.contains('@') {
        warn!("Skipping invalid target: {trimmed}");
        return None;
    }
    if host.len() > MAX_HOSTNAME_LENGTH {
        warn!(
            "Skipping target exceeding maximum length ({} > {})",
            host.len(),
            MAX_HOSTNAME_LENGTH
        );
        return None;
    }
    Some(host.to_string())
}
