//! Direct-probe analyzer.
//!
//! Finds login and admin surfaces by fetching the target itself: a homepage
//! pass for login links and a pass over well-known paths. No search engine is
//! involved, so this keeps producing results while every backend is blocked.

mod detect;

use std::sync::Arc;

use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::backend::read_body_limited;
use crate::config::{BackendConfig, MAX_RESPONSE_BODY_SIZE, MAX_SNIPPET_CHARS, MAX_TITLE_CHARS};
use crate::dedup::dedupe;
use crate::error_handling::{
    categorize_reqwest_error, get_retry_strategy, FailureKind, InfoType, ProcessingStats,
    ScanError,
};
use crate::models::RawResult;
use crate::query::Query;
use crate::rate_limiter::BackendLimiter;
use crate::utils::clean_field;

pub use detect::{
    find_login_links, inspect_path_response, throttle_signal, LoginLink, PathEvidence,
    BLOCK_PAGE_MARKERS, LOGIN_BODY_INDICATORS, LOGIN_LINK_KEYWORDS, LOGIN_PATHS,
};

/// `source_backend` of every probe result.
pub const PROBE_BACKEND_NAME: &str = "direct_probe";
/// `Query::category` of every probe result.
pub const PROBE_CATEGORY: &str = "direct_probe";

/// A fetched page: final URL after redirects, status, and (capped) body.
struct FetchedPage {
    url: Url,
    status: u16,
    body: String,
}

pub struct DirectProbe {
    client: Arc<reqwest::Client>,
    config: BackendConfig,
    scheme: String,
    paths: Vec<String>,
    stats: Arc<ProcessingStats>,
}

impl DirectProbe {
    /// A probe over HTTPS and the default path list.
    pub fn new(
        client: Arc<reqwest::Client>,
        config: BackendConfig,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            client,
            config,
            scheme: "https".to_string(),
            paths: LOGIN_PATHS.iter().map(|p| p.to_string()).collect(),
            stats,
        }
    }

    /// Overrides the scheme used to reach targets.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Overrides the well-known path list.
    pub fn with_paths(mut self, paths: Vec<String>) -> Self {
        self.paths = paths;
        self
    }

    /// Homepage URL for a target hostname (optionally with a port).
    pub fn base_url(&self, target: &str) -> Result<Url, ScanError> {
        let target = target.trim().trim_end_matches('/');
        if target.is_empty() || target.contains('/') || target.contains(char::is_whitespace) {
            return Err(ScanError::InvalidTarget(target.to_string()));
        }
        let url = Url::parse(&format!("{}://{}/", self.scheme, target))
            .map_err(|_| ScanError::InvalidTarget(target.to_string()))?;
        if url.host_str().is_none() {
            return Err(ScanError::InvalidTarget(target.to_string()));
        }
        Ok(url)
    }

    pub async fn probe(&self, target: &str) -> Result<Vec<RawResult>, ScanError> {
        self.probe_cancellable(target, &CancellationToken::new()).await
    }

    /// Runs both passes, checking `cancel` before every fetch.
    ///
    /// Every fetch goes through a limiter local to this call, spaced like a
    /// search backend. A 429, a block page, or a transport error escalates
    /// its backoff; a 2xx answer relaxes it. Results are deduplicated by
    /// resolved URL.
    pub async fn probe_cancellable(
        &self,
        target: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawResult>, ScanError> {
        let base = self.base_url(target)?;
        let limiter = BackendLimiter::new(format!("probe:{}", target), self.config.clone());
        let mut results = Vec::new();

        if cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }
        limiter.acquire().await;
        match self.fetch(&base).await {
            Ok(page) => {
                self.record_response(&limiter, target, &page);
                if (200..300).contains(&page.status) {
                    results.extend(self.homepage_results(target, &page));
                } else {
                    log::debug!("{}: homepage returned HTTP {}", target, page.status);
                }
            }
            Err(e) if e.is_connect() || e.is_timeout() => {
                log::warn!("{}: unreachable, skipping path checks: {}", target, e);
                return Ok(Vec::new());
            }
            Err(e) => {
                log::debug!("{}: homepage fetch failed: {}", target, e);
                limiter.record_failure(categorize_reqwest_error(&e));
            }
        }

        for path in &self.paths {
            if cancel.is_cancelled() {
                return Err(ScanError::Cancelled);
            }
            let Ok(url) = base.join(path) else {
                log::debug!("{}: skipping unjoinable path '{}'", target, path);
                continue;
            };

            limiter.acquire().await;
            let page = match self.fetch(&url).await {
                Ok(page) => page,
                Err(e) => {
                    log::debug!("{}: {} failed: {}", target, url, e);
                    limiter.record_failure(categorize_reqwest_error(&e));
                    continue;
                }
            };
            self.record_response(&limiter, target, &page);

            let evidence = inspect_path_response(page.status, &page.body);
            if !evidence.is_hit() {
                continue;
            }
            log::debug!("{}: login surface at {} ({})", target, page.url, page.status);
            let title = evidence
                .page_title
                .clone()
                .unwrap_or_else(|| format!("Login page - {}", target));
            results.push(RawResult {
                title: clean_field(&title, MAX_TITLE_CHARS),
                url: page.url.to_string(),
                snippet: clean_field(&evidence.describe(), MAX_SNIPPET_CHARS),
                source_backend: PROBE_BACKEND_NAME.to_string(),
                query: Query::new(format!("direct path check: {}", path), PROBE_CATEGORY, target),
            });
        }

        let results = dedupe(results);
        for _ in &results {
            self.stats.increment_info(InfoType::ProbeHit);
        }
        Ok(results)
    }

    /// Feeds one response into the limiter and the run counters.
    fn record_response(&self, limiter: &BackendLimiter, target: &str, page: &FetchedPage) {
        match throttle_signal(page.status, &page.body) {
            Some(kind) => {
                log::warn!("{}: {} at {}, backing off", target, kind, page.url);
                limiter.record_failure(kind);
                self.stats.increment_failure(kind);
                if kind == FailureKind::Blocked {
                    self.stats.increment_info(InfoType::BlockDetected);
                }
            }
            None if (200..300).contains(&page.status) => limiter.record_success(),
            None => {}
        }
    }

    fn homepage_results(&self, target: &str, page: &FetchedPage) -> Vec<RawResult> {
        let query = Query::new(
            format!("homepage link scan: {}", page.url),
            PROBE_CATEGORY,
            target,
        );
        find_login_links(&page.body, &page.url)
            .into_iter()
            .map(|link| {
                let title = if link.text.is_empty() {
                    format!("Login link ({})", link.keyword)
                } else {
                    link.text
                };
                RawResult {
                    title: clean_field(&title, MAX_TITLE_CHARS),
                    url: link.url.to_string(),
                    snippet: format!("Homepage link matching '{}'", link.keyword),
                    source_backend: PROBE_BACKEND_NAME.to_string(),
                    query: query.clone(),
                }
            })
            .collect()
    }

    /// GET with a short transport-level retry. HTTP statuses are returned,
    /// not retried.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, reqwest::Error> {
        let response = RetryIf::start(
            get_retry_strategy(),
            || self.client.get(url.clone()).send(),
            |e: &reqwest::Error| e.is_timeout() || e.is_connect(),
        )
        .await?;

        let final_url = response.url().clone();
        let status = response.status().as_u16();
        let body = read_body_limited(response, MAX_RESPONSE_BODY_SIZE).await?;
        Ok(FetchedPage {
            url: final_url,
            status,
            body,
        })
    }
}
