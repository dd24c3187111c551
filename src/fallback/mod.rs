//! Fallback chain across search backends.

use std::sync::Arc;

use crate::backend::{QueryOutcome, RateLimitedBackend, SearchBackend};
use crate::config::BackendConfig;
use crate::error_handling::{InfoType, ProcessingStats};
use crate::models::{BackendAttempt, RawResult};
use crate::query::Query;

/// What the chain produced for one query.
#[derive(Debug, Clone, Default)]
pub struct ChainOutcome {
    /// Results from the satisfying backend; empty if the chain was exhausted.
    pub results: Vec<RawResult>,
    /// Every call made to every backend tried, in order.
    pub attempts: Vec<BackendAttempt>,
    /// Name of the backend that returned results.
    pub satisfied_by: Option<String>,
}

impl ChainOutcome {
    pub fn is_exhausted(&self) -> bool {
        self.satisfied_by.is_none()
    }
}

/// Backends in priority order, each with its own rate/backoff controller.
///
/// The chain is shared by every worker, so each backend's controller sees the
/// whole run's traffic.
pub struct FallbackChain {
    backends: Vec<RateLimitedBackend>,
    stats: Arc<ProcessingStats>,
}

impl FallbackChain {
    pub fn new(
        backends: Vec<Arc<dyn SearchBackend>>,
        config: &BackendConfig,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        let backends = backends
            .into_iter()
            .map(|backend| RateLimitedBackend::new(backend, config, Arc::clone(&stats)))
            .collect();
        Self { backends, stats }
    }

    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Tries each backend in order and stops at the first that returns at
    /// least one result. Exhaustion is a normal outcome, not an error.
    pub async fn search(&self, query: &Query, max_results: usize) -> ChainOutcome {
        let mut outcome = ChainOutcome::default();

        for (index, backend) in self.backends.iter().enumerate() {
            let (result, attempts) = backend.execute(query, max_results).await;
            outcome.attempts.extend(attempts);

            match result {
                QueryOutcome::Success(results) => {
                    let info = if index == 0 {
                        InfoType::PrimarySatisfied
                    } else {
                        InfoType::FallbackSatisfied
                    };
                    self.stats.increment_info(info);
                    log::debug!(
                        "'{}' satisfied by {} ({} results)",
                        query.text,
                        backend.name(),
                        results.len()
                    );
                    outcome.results = results;
                    outcome.satisfied_by = Some(backend.name().to_string());
                    return outcome;
                }
                QueryOutcome::Failure(kind) => {
                    log::debug!("{} failed '{}': {}", backend.name(), query.text, kind);
                }
            }
        }

        self.stats.increment_info(InfoType::ChainExhausted);
        log::debug!("all backends exhausted for '{}'", query.text);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FailureKind;
    use crate::models::AttemptOutcome;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        name: &'static str,
        response: Result<usize, FailureKind>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(name: &'static str, response: Result<usize, FailureKind>) -> Arc<Self> {
            Arc::new(Self {
                name,
                response,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SearchBackend for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch(&self, query: &Query, _max: usize) -> Result<Vec<RawResult>, FailureKind> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.map(|n| {
                (0..n)
                    .map(|i| RawResult {
                        title: format!("{} {}", self.name, i),
                        url: format!("https://{}.example/{}", self.name, i),
                        snippet: String::new(),
                        source_backend: self.name.to_string(),
                        query: query.clone(),
                    })
                    .collect()
            })
        }
    }

    fn chain(backends: Vec<Arc<dyn SearchBackend>>) -> (FallbackChain, Arc<ProcessingStats>) {
        let stats = Arc::new(ProcessingStats::new());
        let config = BackendConfig {
            max_retries: 2,
            ..BackendConfig::immediate()
        };
        (FallbackChain::new(backends, &config, Arc::clone(&stats)), stats)
    }

    fn query() -> Query {
        Query::new("site:example.com inurl:admin", "login_admin", "example.com")
    }

    #[tokio::test]
    async fn test_short_circuits_on_primary_success() {
        let a = Fixed::new("a", Ok(2));
        let b = Fixed::new("b", Ok(5));
        let c = Fixed::new("c", Ok(5));
        let (chain, stats) = chain(vec![a.clone(), b.clone(), c.clone()]);

        let outcome = chain.search(&query(), 10).await;
        assert_eq!(outcome.satisfied_by.as_deref(), Some("a"));
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(a.calls.load(Ordering::SeqCst), 1);
        assert_eq!(b.calls.load(Ordering::SeqCst), 0);
        assert_eq!(c.calls.load(Ordering::SeqCst), 0);
        assert_eq!(stats.get_info_count(InfoType::PrimarySatisfied), 1);
    }

    #[tokio::test]
    async fn test_falls_through_blocked_and_empty() {
        let a = Fixed::new("a", Err(FailureKind::Blocked));
        let b = Fixed::new("b", Ok(0));
        let c = Fixed::new("c", Ok(1));
        let (chain, stats) = chain(vec![a.clone(), b.clone(), c.clone()]);

        let outcome = chain.search(&query(), 10).await;
        assert_eq!(outcome.satisfied_by.as_deref(), Some("c"));
        // two bounded retries on a, one call on b, one on c
        let outcomes: Vec<(&str, AttemptOutcome)> = outcome
            .attempts
            .iter()
            .map(|a| (a.backend.as_str(), a.outcome))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                ("a", AttemptOutcome::Failure(FailureKind::Blocked)),
                ("a", AttemptOutcome::Failure(FailureKind::Blocked)),
                ("b", AttemptOutcome::Failure(FailureKind::Empty)),
                ("c", AttemptOutcome::Success),
            ]
        );
        assert_eq!(stats.get_info_count(InfoType::FallbackSatisfied), 1);
    }

    #[tokio::test]
    async fn test_exhausted_chain_returns_empty() {
        let a = Fixed::new("a", Err(FailureKind::NetworkError));
        let b = Fixed::new("b", Ok(0));
        let (chain, stats) = chain(vec![a, b]);

        let outcome = chain.search(&query(), 10).await;
        assert!(outcome.is_exhausted());
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.attempts.len(), 3);
        assert_eq!(stats.get_info_count(InfoType::ChainExhausted), 1);
    }

    #[tokio::test]
    async fn test_empty_chain_is_exhausted() {
        let (chain, _) = chain(Vec::new());
        assert!(chain.is_empty());
        assert!(chain.search(&query(), 10).await.is_exhausted());
    }
}
