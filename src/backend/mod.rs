//! Search backends.
//!
//! This module provides:
//! - The [`SearchBackend`] trait implemented by every query provider
//! - [`HtmlSearchBackend`] for Google, Bing, and DuckDuckGo result pages
//! - Ordered [`ExtractionStrategy`] lists per engine
//! - [`RateLimitedBackend`], which adds spacing, backoff, and bounded retry

mod engines;
mod executor;
mod extract;
mod html;

use async_trait::async_trait;

use crate::error_handling::FailureKind;
use crate::models::RawResult;
use crate::query::Query;

pub use engines::{resolve_result_url, Engine};
pub use executor::{QueryOutcome, RateLimitedBackend};
pub use extract::{
    extract_with, ContainerStrategy, ExtractedItem, ExtractionStrategy, HeadingAnchorStrategy,
};
pub use html::HtmlSearchBackend;
pub(crate) use html::read_body_limited;

/// A query provider.
///
/// One call, no retries: `fetch` reports what a single request produced.
/// An `Ok` with an empty vector means the provider answered but nothing could
/// be extracted. Implementations must be safe to share across workers.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Stable identifier used in attempts, logs, and statistics.
    fn name(&self) -> &str;

    async fn fetch(
        &self,
        query: &Query,
        max_results: usize,
    ) -> Result<Vec<RawResult>, FailureKind>;
}
