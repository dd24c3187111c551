//! Failure categorization and retry strategy.
//!
//! Maps HTTP statuses, response bodies, and `reqwest` errors onto
//! [`FailureKind`], and configures the retry strategy used by the direct probe.

use std::time::Duration;

use reqwest::StatusCode;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::FailureKind;
use crate::config::{
    HTTP_STATUS_TOO_MANY_REQUESTS, PROBE_RETRY_FACTOR, PROBE_RETRY_INITIAL_DELAY_MS,
    PROBE_RETRY_MAX_DELAY_SECS, PROBE_RETRY_MAX_RETRIES,
};

/// Creates the exponential backoff strategy for direct-probe fetches.
///
/// Returns an iterator of delays: initial `PROBE_RETRY_INITIAL_DELAY_MS`,
/// multiplied by `PROBE_RETRY_FACTOR` each time, capped at
/// `PROBE_RETRY_MAX_DELAY_SECS`, and limited to `PROBE_RETRY_MAX_RETRIES`
/// retries after the first attempt.
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(PROBE_RETRY_INITIAL_DELAY_MS)
        .factor(PROBE_RETRY_FACTOR)
        .max_delay(Duration::from_secs(PROBE_RETRY_MAX_DELAY_SECS))
        .take(PROBE_RETRY_MAX_RETRIES)
}

/// Categorizes a non-success HTTP status.
///
/// Returns `None` for 2xx. 429 is rate limiting, 403 is treated as active
/// bot detection, anything else is a network-level failure.
pub fn categorize_status(status: StatusCode) -> Option<FailureKind> {
    if status.is_success() {
        return None;
    }
    match status.as_u16() {
        HTTP_STATUS_TOO_MANY_REQUESTS => Some(FailureKind::RateLimited),
        403 => Some(FailureKind::Blocked),
        _ => Some(FailureKind::NetworkError),
    }
}

/// Categorizes a `reqwest::Error` into a [`FailureKind`].
///
/// Status errors go through [`categorize_status`]. Decode failures mean the
/// provider answered with something unreadable; every other transport error
/// (timeout, connect, body, redirect loop) is a network error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FailureKind {
    if let Some(kind) = error.status().and_then(categorize_status) {
        return kind;
    }

    if error.is_decode() {
        FailureKind::ParseFailure
    } else {
        FailureKind::NetworkError
    }
}

/// Returns the first block marker found in `body`, case-insensitively.
pub fn find_block_marker<'a>(body: &str, markers: &[&'a str]) -> Option<&'a str> {
    let lowered = body.to_lowercase();
    markers
        .iter()
        .copied()
        .find(|marker| lowered.contains(&marker.to_lowercase()))
}
