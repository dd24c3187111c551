//! Bulk orchestration.
//!
//! `Scanner` owns the shared pieces of a run (fallback chain, direct probe,
//! classifier, counters) and fans targets out to a bounded worker pool:
//! - one spawned task per `TargetScanJob`, gated by a semaphore permit
//! - per-target timeout and cooperative cancellation
//! - completion-order collection with a progress callback and ETA logging
//!
//! `run_scan` is the file-driven entry point used by the binary.

mod finalize;
mod init;
mod task;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::info;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::analysis::{RiskClassifier, ScoringWeights};
use crate::app::{log_progress, log_target_completion, shutdown_gracefully};
use crate::backend::{Engine, HtmlSearchBackend, SearchBackend};
use crate::config::{Config, LOGGING_INTERVAL};
use crate::error_handling::{InitializationError, ProcessingStats, ScanError};
use crate::fallback::FallbackChain;
use crate::initialization::{init_client, init_semaphore};
use crate::models::{BulkSummary, ScanReport, TargetScanJob};
use crate::probe::DirectProbe;
use crate::query::resolve_categories;
use crate::utils::sanitize_and_truncate_error_message;

use task::{process_target_job, RunningGuard};

pub use init::read_targets;

/// Called once per finished target with `(completed, total, target, report)`.
///
/// Runs on the collecting task; it must return promptly.
pub type ProgressCallback = Arc<dyn Fn(usize, usize, &str, &ScanReport) + Send + Sync>;

/// Everything a worker reads while scanning a target. Shared, never mutated
/// except through the limiters and counters inside.
pub(crate) struct ScanContext {
    pub(crate) chain: FallbackChain,
    pub(crate) probe: Option<DirectProbe>,
    pub(crate) classifier: RiskClassifier,
    pub(crate) results_per_query: usize,
    pub(crate) queries_per_category: Option<usize>,
    pub(crate) search_enabled: bool,
    pub(crate) scan_timeout: Duration,
}

/// Bulk orchestrator over a fixed backend chain and optional direct probe.
pub struct Scanner {
    ctx: Arc<ScanContext>,
    workers: usize,
    stats: Arc<ProcessingStats>,
}

impl Scanner {
    /// Builds the default chain (Google, then Bing, then DuckDuckGo) and, unless
    /// disabled, a direct probe, all sharing one HTTP client.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        let stats = Arc::new(ProcessingStats::new());

        let mut backends: Vec<Arc<dyn SearchBackend>> = Vec::new();
        for engine in Engine::ALL {
            let backend =
                HtmlSearchBackend::new(engine, Arc::clone(&client), config.user_agent.clone())?;
            backends.push(Arc::new(backend));
        }

        let probe = (!config.no_probe).then(|| {
            DirectProbe::new(
                Arc::clone(&client),
                config.backend_config(),
                Arc::clone(&stats),
            )
        });

        Ok(Self::from_parts(config, backends, probe, stats))
    }

    /// Assembles a scanner from explicit backends and probe.
    ///
    /// `stats` should be the same counters the probe was built with so a
    /// run's totals cover both.
    pub fn from_parts(
        config: &Config,
        backends: Vec<Arc<dyn SearchBackend>>,
        probe: Option<DirectProbe>,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        let backend_config = config.backend_config();
        let chain = FallbackChain::new(backends, &backend_config, Arc::clone(&stats));
        let ctx = ScanContext {
            chain,
            probe,
            classifier: RiskClassifier::default(),
            results_per_query: config.results_per_query,
            queries_per_category: config.queries_per_category,
            search_enabled: !config.no_search,
            scan_timeout: config.scan_timeout(),
        };
        Self {
            ctx: Arc::new(ctx),
            workers: backend_config.worker_count,
            stats,
        }
    }

    /// Replaces the default scoring weights.
    ///
    /// Only takes effect before the first scan; afterwards the context is
    /// shared with workers and left untouched.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        if let Some(ctx) = Arc::get_mut(&mut self.ctx) {
            ctx.classifier = RiskClassifier::new(weights);
        }
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    pub fn backend_names(&self) -> Vec<&str> {
        self.ctx.chain.backend_names()
    }

    /// Scans every target with at most `workers` running at once.
    ///
    /// Always returns a summary: per-target failures become failed reports,
    /// and an unknown category fails every target rather than the call.
    /// Once `cancel` fires, running targets stop after their current query
    /// and targets not yet started are counted as not run.
    pub async fn bulk_scan(
        &self,
        targets: Vec<String>,
        categories: &[String],
        progress: Option<ProgressCallback>,
        cancel: CancellationToken,
    ) -> BulkSummary {
        let start = Instant::now();
        let total = targets.len();

        let categories = match resolve_categories(categories) {
            Ok(categories) => categories,
            Err(e) => return self.fail_all(targets, &e, start),
        };

        let semaphore = init_semaphore(self.workers);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let completed = Arc::new(AtomicUsize::new(0));
        let mut tasks = FuturesUnordered::new();

        for target in targets {
            let job = TargetScanJob::new(target.clone(), categories.clone());
            let ctx = Arc::clone(&self.ctx);
            let semaphore = Arc::clone(&semaphore);
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            let cancel = cancel.clone();

            let handle = tokio::spawn(async move {
                let _permit = tokio::select! {
                    permit = semaphore.acquire_owned() => permit.ok()?,
                    _ = cancel.cancelled() => return None,
                };
                if cancel.is_cancelled() {
                    return None;
                }
                let _running = RunningGuard::enter(running, &peak);
                Some(process_target_job(ctx, job, cancel).await)
            });
            tasks.push(async move { (target, handle.await) });
        }

        let cancel_logging = CancellationToken::new();
        let logging_task = {
            let completed = Arc::clone(&completed);
            let cancel_logging = cancel_logging.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL));
                interval.tick().await;
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            log_progress(start.elapsed(), completed.load(Ordering::SeqCst), total);
                        }
                        _ = cancel_logging.cancelled() => {
                            break;
                        }
                    }
                }
            })
        };

        let mut reports = Vec::with_capacity(total);
        while let Some((target, joined)) = tasks.next().await {
            let report = match joined {
                Ok(Some(report)) => report,
                Ok(None) => continue,
                Err(join_error) => {
                    log::warn!("Task panicked for {}: {:?}", target, join_error);
                    let error = ScanError::WorkerPanicked(join_error.to_string());
                    ScanReport::failed(
                        target,
                        sanitize_and_truncate_error_message(&error.to_string()),
                        Duration::ZERO,
                    )
                }
            };

            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            log_target_completion(&report, done, total, start.elapsed());
            if let Some(callback) = &progress {
                callback(done, total, &report.target, &report);
            }
            reports.push(report);
        }

        shutdown_gracefully(cancel_logging, Some(logging_task)).await;

        BulkSummary::from_reports(
            reports,
            total,
            start.elapsed(),
            peak.load(Ordering::SeqCst),
            cancel.is_cancelled(),
        )
    }

    fn fail_all(&self, targets: Vec<String>, error: &ScanError, start: Instant) -> BulkSummary {
        log::warn!("Scan aborted before start: {}", error);
        let total = targets.len();
        let message = error.to_string();
        let reports = targets
            .into_iter()
            .map(|target| ScanReport::failed(target, message.clone(), Duration::ZERO))
            .collect();
        BulkSummary::from_reports(reports, total, start.elapsed(), 0, false)
    }
}

/// Reads targets from the config, scans them, writes the requested exports,
/// and prints final statistics.
pub async fn run_scan(config: Config, cancel: CancellationToken) -> Result<BulkSummary> {
    let targets = read_targets(&config).await?;
    if targets.is_empty() {
        anyhow::bail!("No targets to scan: pass a FILE or --target");
    }
    let categories =
        resolve_categories(&config.categories).context("Invalid category selection")?;

    let scanner = Scanner::new(&config).context("Failed to initialize scanner")?;
    info!(
        "Scanning {} target{} across {} categor{} with {} worker{} (backends: {})",
        targets.len(),
        if targets.len() == 1 { "" } else { "s" },
        categories.len(),
        if categories.len() == 1 { "y" } else { "ies" },
        scanner.workers(),
        if scanner.workers() == 1 { "" } else { "s" },
        scanner.backend_names().join(" -> ")
    );

    let summary = scanner.bulk_scan(targets, &categories, None, cancel).await;

    finalize::write_outputs(&config, &summary)?;
    finalize::print_final_statistics(scanner.stats(), &summary);

    Ok(summary)
}
