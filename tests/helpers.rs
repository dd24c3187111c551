// Shared test helpers: in-process search backends and a quiet config.
//
// This module is included with `mod helpers;` by the orchestration tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use dork_recon::query::Query;
use dork_recon::{Config, FailureKind, LogFormat, LogLevel, RawResult, SearchBackend};

/// Config with no request spacing, one attempt per backend, and a single
/// template per category.
#[allow(dead_code)]
pub fn test_config(workers: usize) -> Config {
    Config {
        categories: vec!["login_admin".to_string()],
        queries_per_category: Some(1),
        min_delay_secs: 0.0,
        max_delay_secs: 0.0,
        max_retries: 1,
        workers,
        no_probe: true,
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        ..Default::default()
    }
}

/// An admin login result on the query's own target.
#[allow(dead_code)]
pub fn login_result(query: &Query, backend: &str) -> RawResult {
    RawResult {
        title: "Admin login".to_string(),
        url: format!("https://{}/admin/login", query.target),
        snippet: "Enter your username and password".to_string(),
        source_backend: backend.to_string(),
        query: query.clone(),
    }
}

/// Answers every query with one login result after `latency`, tracking how
/// many fetches are in flight at once.
#[allow(dead_code)]
pub struct FakeBackend {
    pub name: &'static str,
    pub latency: Duration,
    /// Targets whose fetch panics.
    pub panic_on: HashSet<String>,
    /// Fixed failure instead of results.
    pub failure: Option<FailureKind>,
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

#[allow(dead_code)]
impl FakeBackend {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            latency: Duration::ZERO,
            panic_on: HashSet::new(),
            failure: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn panicking_on(mut self, target: &str) -> Self {
        self.panic_on.insert(target.to_string());
        self
    }

    pub fn failing_with(mut self, kind: FailureKind) -> Self {
        self.failure = Some(kind);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl SearchBackend for FakeBackend {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch(
        &self,
        query: &Query,
        _max_results: usize,
    ) -> Result<Vec<RawResult>, FailureKind> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panic_on.contains(&query.target) {
            panic!("backend exploded on {}", query.target);
        }
        match self.failure {
            Some(kind) => Err(kind),
            None => Ok(vec![login_result(query, self.name)]),
        }
    }
}
