//! Per-target task processing.
//!
//! One `TargetScanJob` is driven from `Running` to `Done` or `Failed` here.
//! Every error and timeout is converted into a `ScanReport` at this boundary,
//! so a target never aborts the batch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::ScanContext;
use crate::analysis::{analyze, summarize};
use crate::error_handling::ScanError;
use crate::models::{JobState, ScanReport, TargetScanJob};
use crate::query::build_queries;
use crate::utils::sanitize_and_truncate_error_message;

/// Keeps the shared running count accurate even if the task unwinds.
pub(crate) struct RunningGuard {
    running: Arc<AtomicUsize>,
}

impl RunningGuard {
    /// Marks one more job as running and raises `peak` if needed.
    pub(crate) fn enter(running: Arc<AtomicUsize>, peak: &AtomicUsize) -> Self {
        let now = running.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        Self { running }
    }
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.running.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Runs one job under the per-target timeout and always returns a report.
pub(crate) async fn process_target_job(
    ctx: Arc<ScanContext>,
    mut job: TargetScanJob,
    cancel: CancellationToken,
) -> ScanReport {
    let start = Instant::now();
    job.transition(JobState::Running);
    log::debug!("{}: scan started", job.target);

    let outcome = tokio::time::timeout(ctx.scan_timeout, scan_target(&ctx, &job, &cancel)).await;
    let outcome = match outcome {
        Ok(result) => result,
        Err(_) => Err(ScanError::TimedOut(ctx.scan_timeout)),
    };

    match outcome {
        Ok(mut report) => {
            job.transition(JobState::Done);
            report.state = job.state();
            report.scan_duration = start.elapsed();
            report
        }
        Err(e) => {
            job.transition(JobState::Failed);
            let message = sanitize_and_truncate_error_message(&e.to_string());
            let mut report = ScanReport::failed(&job.target, message, start.elapsed());
            report.state = job.state();
            report
        }
    }
}

/// Search every selected query through the fallback chain, then probe the
/// target directly, then deduplicate and classify the merged results.
///
/// Cancellation is checked between queries; the query in flight finishes.
async fn scan_target(
    ctx: &ScanContext,
    job: &TargetScanJob,
    cancel: &CancellationToken,
) -> Result<ScanReport, ScanError> {
    let target = job.target.as_str();
    if target.is_empty() || target.contains(char::is_whitespace) || target.contains('/') {
        return Err(ScanError::InvalidTarget(target.to_string()));
    }

    let queries = if ctx.search_enabled && !ctx.chain.is_empty() {
        build_queries(target, &job.selected_categories, ctx.queries_per_category)?
    } else {
        Vec::new()
    };

    let mut raw = Vec::new();
    let mut attempts = Vec::new();
    let mut queries_executed = 0;
    let mut queries_satisfied = 0;

    for query in &queries {
        if cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }
        let outcome = ctx.chain.search(query, ctx.results_per_query).await;
        queries_executed += 1;
        if outcome.is_exhausted() {
            log::warn!("{}: no backend answered '{}'", target, query.text);
        } else {
            queries_satisfied += 1;
        }
        attempts.extend(outcome.attempts);
        raw.extend(outcome.results);
    }

    let mut probe_hits = 0;
    if let Some(probe) = &ctx.probe {
        if cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }
        let hits = probe.probe_cancellable(target, cancel).await?;
        probe_hits = hits.len();
        raw.extend(hits);
    }

    let analyzed_results = analyze(raw, &ctx.classifier);
    let mut summary = summarize(&analyzed_results);
    summary.queries_executed = queries_executed;
    summary.queries_satisfied = queries_satisfied;
    summary.probe_hits = probe_hits;

    Ok(ScanReport {
        target: target.to_string(),
        state: JobState::Done,
        analyzed_results,
        summary,
        attempts,
        scan_duration: Default::default(),
        completed_at: Utc::now(),
        error: None,
    })
}
