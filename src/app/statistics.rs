//! Final statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::app::logging::format_duration;
use crate::error_handling::{FailureKind, InfoType, ProcessingStats};
use crate::models::BulkSummary;

/// Prints backend failure and info counters to the log.
pub fn print_error_statistics(stats: &ProcessingStats) {
    let total_failures = stats.total_failures();
    let total_info = stats.total_info();

    if total_failures > 0 {
        info!("Backend Failure Counts ({} total):", total_failures);
        for kind in FailureKind::iter() {
            let count = stats.get_failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

/// Prints the bulk run's totals, query success rate, and per-backend counts.
pub fn print_run_summary(summary: &BulkSummary) {
    info!(
        "✅ Scanned {} target{} ({} succeeded, {} failed, {} not run) in {} (avg {:.1}s/target)",
        summary.total_targets,
        if summary.total_targets == 1 { "" } else { "s" },
        summary.successful,
        summary.failed,
        summary.not_run,
        format_duration(summary.total_duration),
        summary.avg_seconds_per_target
    );
    info!(
        "Findings: {} unique, {} high risk, {} login pages",
        summary.total_findings, summary.total_high_risk, summary.total_login_pages
    );
    info!(
        "Queries: {}/{} satisfied ({:.1}%), peak concurrency {}",
        summary.queries_satisfied,
        summary.queries_executed,
        summary.query_success_rate,
        summary.peak_running
    );
    for (backend, stats) in &summary.backend_stats {
        info!(
            "   {}: {} attempts, {} ok, {} rate limited, {} blocked, {} network, {} empty, {} parse",
            backend,
            stats.attempts,
            stats.successes,
            stats.rate_limited,
            stats.blocked,
            stats.network_errors,
            stats.empty,
            stats.parse_failures
        );
    }
    if summary.cancelled {
        info!("Run was cancelled before all targets finished");
    }
}
