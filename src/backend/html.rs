//! HTML search engine backend.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::header::USER_AGENT;
use scraper::Html;
use url::Url;

use super::engines::{resolve_result_url, Engine};
use super::extract::{extract_with, ExtractedItem, ExtractionStrategy};
use super::SearchBackend;
use crate::config::{
    DEFAULT_USER_AGENT, MAX_RESPONSE_BODY_SIZE, MAX_SNIPPET_CHARS, MAX_TITLE_CHARS,
    USER_AGENT_POOL,
};
use crate::error_handling::{
    categorize_reqwest_error, categorize_status, find_block_marker, FailureKind,
};
use crate::models::RawResult;
use crate::query::Query;
use crate::utils::clean_field;

/// Reads a response body, keeping at most `limit` bytes.
pub(crate) async fn read_body_limited(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<String, reqwest::Error> {
    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let remaining = limit.saturating_sub(bytes.len());
        bytes.extend_from_slice(&chunk[..chunk.len().min(remaining)]);
        if bytes.len() >= limit {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// A search engine scraped over plain HTTP GET.
pub struct HtmlSearchBackend {
    engine: Engine,
    endpoint: Url,
    client: Arc<reqwest::Client>,
    /// Pinned User-Agent; `None` rotates through the pool per request.
    user_agent: Option<String>,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl HtmlSearchBackend {
    /// Backend for `engine` at its public endpoint.
    pub fn new(
        engine: Engine,
        client: Arc<reqwest::Client>,
        user_agent: Option<String>,
    ) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(engine.default_endpoint())?;
        Ok(Self::with_endpoint(engine, endpoint, client, user_agent))
    }

    /// Backend for `engine` at an explicit endpoint (mirrors, test servers).
    pub fn with_endpoint(
        engine: Engine,
        endpoint: Url,
        client: Arc<reqwest::Client>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            engine,
            endpoint,
            client,
            user_agent,
            strategies: engine.strategies(),
        }
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    fn pick_user_agent(&self) -> String {
        match &self.user_agent {
            Some(ua) => ua.clone(),
            None => USER_AGENT_POOL
                .choose(&mut rand::rng())
                .copied()
                .unwrap_or(DEFAULT_USER_AGENT)
                .to_string(),
        }
    }

    /// Extracts results from a results page. Links without a resolvable
    /// absolute destination are dropped, as are repeats within the page. A
    /// strategy left with nothing after that gives way to the next one.
    fn parse_results(&self, body: &str, query: &Query, max_results: usize) -> Vec<RawResult> {
        let document = Html::parse_document(body);
        extract_with(&self.strategies, &document, |items| {
            self.resolve_items(items, query, max_results)
        })
    }

    fn resolve_items(
        &self,
        items: Vec<ExtractedItem>,
        query: &Query,
        max_results: usize,
    ) -> Vec<RawResult> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut results = Vec::new();
        for item in items {
            let Some(url) = resolve_result_url(
                &item.href,
                &self.endpoint,
                self.engine.redirect_params(),
                self.engine.excluded_hosts(),
            ) else {
                continue;
            };
            let url = url.to_string();
            if !seen.insert(url.clone()) {
                continue;
            }

            let mut title = clean_field(&item.title, MAX_TITLE_CHARS);
            if title.is_empty() {
                title = clean_field(&url, MAX_TITLE_CHARS);
            }
            results.push(RawResult {
                title,
                url,
                snippet: clean_field(&item.snippet, MAX_SNIPPET_CHARS),
                source_backend: self.engine.name().to_string(),
                query: query.clone(),
            });
            if results.len() >= max_results {
                break;
            }
        }
        results
    }
}

#[async_trait]
impl SearchBackend for HtmlSearchBackend {
    fn name(&self) -> &str {
        self.engine.name()
    }

    async fn fetch(
        &self,
        query: &Query,
        max_results: usize,
    ) -> Result<Vec<RawResult>, FailureKind> {
        let user_agent = self.pick_user_agent();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&self.engine.params(&query.text, max_results))
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| {
                log::debug!("{}: request failed for '{}': {}", self.name(), query.text, e);
                categorize_reqwest_error(&e)
            })?;

        let status = response.status();
        if let Some(kind) = categorize_status(status) {
            log::debug!("{}: HTTP {} for '{}'", self.name(), status, query.text);
            return Err(kind);
        }

        let body = read_body_limited(response, MAX_RESPONSE_BODY_SIZE)
            .await
            .map_err(|e| categorize_reqwest_error(&e))?;
        if body.trim().is_empty() {
            return Err(FailureKind::ParseFailure);
        }
        if let Some(marker) = find_block_marker(&body, self.engine.block_markers()) {
            log::warn!(
                "{}: block signature '{}' in response to '{}'",
                self.name(),
                marker,
                query.text
            );
            return Err(FailureKind::Blocked);
        }

        Ok(self.parse_results(&body, query, max_results))
    }
}
