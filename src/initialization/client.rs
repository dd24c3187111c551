//! HTTP client initialization.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::ClientBuilder;

use crate::config::{Config, BROWSER_HEADERS};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client shared by every search backend and the direct
/// probe.
///
/// The client carries the per-request timeout, the default User-Agent, and the
/// browser-like default headers. Redirects are followed (reqwest's default of
/// 10 hops) so probe paths that bounce to a login page are still evaluated.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend or
/// header set cannot be built.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(config.request_timeout())
        .user_agent(config.client_user_agent())
        .default_headers(browser_headers())
        .build()?;
    Ok(Arc::new(client))
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in BROWSER_HEADERS {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }
    headers
}
