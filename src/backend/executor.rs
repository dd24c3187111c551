//! Bounded retry around a single backend.

use std::sync::Arc;

use tokio::time::Instant;

use super::SearchBackend;
use crate::config::BackendConfig;
use crate::error_handling::{FailureKind, InfoType, ProcessingStats};
use crate::models::{AttemptOutcome, BackendAttempt, RawResult};
use crate::query::Query;
use crate::rate_limiter::BackendLimiter;

/// Result of running one query against one backend.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// At least one result.
    Success(Vec<RawResult>),
    /// The last failure seen once retries were exhausted, or a
    /// non-retryable failure.
    Failure(FailureKind),
}

/// A backend paired with its rate/backoff controller.
///
/// `execute` waits on the limiter before every call, records each call as a
/// [`BackendAttempt`], and retries `RateLimited`, `Blocked`, and
/// `NetworkError` up to `max_retries` calls in total. The backoff wait itself
/// comes from the limiter, whose spacing grows with each recorded failure.
pub struct RateLimitedBackend {
    backend: Arc<dyn SearchBackend>,
    limiter: BackendLimiter,
    max_retries: u32,
    stats: Arc<ProcessingStats>,
}

impl RateLimitedBackend {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        config: &BackendConfig,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        let limiter = BackendLimiter::new(backend.name(), config.clone());
        Self {
            backend,
            limiter,
            max_retries: config.max_retries.max(1),
            stats,
        }
    }

    pub fn name(&self) -> &str {
        self.backend.name()
    }

    pub fn limiter(&self) -> &BackendLimiter {
        &self.limiter
    }

    pub async fn execute(
        &self,
        query: &Query,
        max_results: usize,
    ) -> (QueryOutcome, Vec<BackendAttempt>) {
        let mut attempts = Vec::new();
        let mut last_failure = FailureKind::NetworkError;

        for attempt in 1..=self.max_retries {
            self.limiter.acquire().await;
            let started = Instant::now();
            let result = self.backend.fetch(query, max_results).await;
            let latency = started.elapsed();

            match result {
                Ok(results) if !results.is_empty() => {
                    self.limiter.record_success();
                    attempts.push(BackendAttempt {
                        backend: self.name().to_string(),
                        outcome: AttemptOutcome::Success,
                        latency,
                    });
                    return (QueryOutcome::Success(results), attempts);
                }
                Ok(_) => last_failure = FailureKind::Empty,
                Err(kind) => last_failure = kind,
            }

            self.limiter.record_failure(last_failure);
            self.stats.increment_failure(last_failure);
            if last_failure == FailureKind::Blocked {
                self.stats.increment_info(InfoType::BlockDetected);
            }
            attempts.push(BackendAttempt {
                backend: self.name().to_string(),
                outcome: AttemptOutcome::Failure(last_failure),
                latency,
            });

            if !last_failure.is_retryable() {
                break;
            }
            if attempt < self.max_retries {
                log::debug!(
                    "{}: {} on '{}' (attempt {}/{}), retrying after {:?}",
                    self.name(),
                    last_failure,
                    query.text,
                    attempt,
                    self.max_retries,
                    self.limiter.next_delay()
                );
            } else {
                log::warn!(
                    "{}: giving up on '{}' after {} attempts ({})",
                    self.name(),
                    query.text,
                    attempt,
                    last_failure
                );
            }
        }

        (QueryOutcome::Failure(last_failure), attempts)
    }
}
