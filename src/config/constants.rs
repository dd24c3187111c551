//! Configuration constants.
//!
//! This module defines the operational parameters used throughout the scanner:
//! request spacing, backoff limits, timeouts, result caps, and the request
//! fingerprint (User-Agent pool and browser-like headers).

use std::time::Duration;

// Worker pool
/// Default number of concurrent target scans.
pub const DEFAULT_WORKERS: usize = 4;
/// Upper bound on the worker pool; more workers only multiply block risk.
pub const MAX_WORKERS: usize = 32;
/// Interval between periodic progress log lines, in seconds.
pub const LOGGING_INTERVAL: u64 = 10;

// Request spacing
/// Default minimum spacing between two requests to the same backend, in seconds.
pub const DEFAULT_MIN_DELAY_SECS: f64 = 2.0;
/// Default upper end of the delay range; jitter is drawn from `[0, max - min]`.
pub const DEFAULT_MAX_DELAY_SECS: f64 = 5.0;
/// Base of the exponential backoff applied after rate limiting or a block.
/// The penalty after `n` consecutive failures is `BACKOFF_BASE * 2^n`.
pub const BACKOFF_BASE: Duration = Duration::from_secs(1);
/// Default ceiling for the backoff penalty, in seconds.
pub const DEFAULT_MAX_BACKOFF_SECS: u64 = 60;
/// Default number of attempts a single backend gets for one query
/// (initial attempt included).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

// Timeouts
/// Per-request timeout in seconds (search queries and probe fetches).
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Per-target timeout in seconds. Must stay well above the per-request timeout
/// so a single slow call never takes the whole job down.
pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 1800;

// Probe retry strategy
/// Initial delay in milliseconds before a probe fetch is retried.
pub const PROBE_RETRY_INITIAL_DELAY_MS: u64 = 250;
/// Factor by which the probe retry delay grows on each attempt.
pub const PROBE_RETRY_FACTOR: u64 = 2;
/// Maximum delay between probe retries in seconds.
pub const PROBE_RETRY_MAX_DELAY_SECS: u64 = 4;
/// Number of probe retries after the initial attempt.
pub const PROBE_RETRY_MAX_RETRIES: usize = 1;

// Result shaping
/// Default number of results kept per query.
pub const DEFAULT_RESULTS_PER_QUERY: usize = 10;
/// Search engines serve at most this many results per page.
pub const MAX_RESULTS_PER_REQUEST: usize = 10;
/// Result titles are truncated to this many characters.
pub const MAX_TITLE_CHARS: usize = 200;
/// Result snippets are truncated to this many characters.
pub const MAX_SNIPPET_CHARS: usize = 500;
/// Maximum error message length stored in a report.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 1000;
/// Maximum response body read from a search engine or probed page (2MB).
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

// HTTP status codes
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Default User-Agent string for HTTP requests.
///
/// Used for the client default. Individual requests rotate through
/// [`USER_AGENT_POOL`] unless the user pinned a value with `--user-agent`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Desktop browser User-Agents rotated across search requests.
pub const USER_AGENT_POOL: &[&str] = &[
    DEFAULT_USER_AGENT,
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_7_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Safari/605.1.15",
];

/// Browser-like headers sent with every search request.
pub const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Upgrade-Insecure-Requests", "1"),
    ("DNT", "1"),
];
