//! Progress logging utilities.

use std::time::Duration;

use log::{info, warn};

use crate::models::ScanReport;

/// Remaining time extrapolated from the average time per finished target.
///
/// Returns `None` until at least one target has finished. This is an
/// approximation: slow and fast targets are averaged together.
pub fn estimate_eta(elapsed: Duration, completed: usize, total: usize) -> Option<Duration> {
    if completed == 0 {
        return None;
    }
    let remaining = total.saturating_sub(completed) as u32;
    Some(elapsed / completed as u32 * remaining)
}

/// Compact `1h02m03s` / `4m05s` / `6s` rendering.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h{m:02}m{s:02}s")
    } else if m > 0 {
        format!("{m}m{s:02}s")
    } else {
        format!("{s}s")
    }
}

/// Logs periodic progress of a bulk run.
///
/// # Arguments
///
/// * `elapsed` - Wall-clock time since the run started
/// * `completed` - Targets finished so far (successful or failed)
/// * `total` - Targets in the run
pub fn log_progress(elapsed: Duration, completed: usize, total: usize) {
    let elapsed_secs = elapsed.as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs * 60.0
    } else {
        0.0
    };
    let eta = estimate_eta(elapsed, completed, total)
        .map(format_duration)
        .unwrap_or_else(|| "unknown".to_string());
    info!(
        "Scanned {}/{} targets in {:.1}s (~{:.2} targets/min, ETA {})",
        completed, total, elapsed_secs, rate, eta
    );
}

/// Logs one finished target with its running position and the run's ETA.
pub fn log_target_completion(
    report: &ScanReport,
    completed: usize,
    total: usize,
    elapsed: Duration,
) {
    let eta = estimate_eta(elapsed, completed, total)
        .map(format_duration)
        .unwrap_or_else(|| "unknown".to_string());
    match &report.error {
        None => info!(
            "[{}/{}] {}: {} findings ({} high, {} login) in {:.1}s, ETA {}",
            completed,
            total,
            report.target,
            report.summary.total_unique,
            report.summary.high_risk_count,
            report.summary.login_page_count,
            report.scan_duration.as_secs_f64(),
            eta
        ),
        Some(error) => warn!(
            "[{}/{}] {}: failed after {:.1}s: {}, ETA {}",
            completed,
            total,
            report.target,
            report.scan_duration.as_secs_f64(),
            error,
            eta
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eta_unknown_before_first_completion() {
        assert_eq!(estimate_eta(Duration::from_secs(30), 0, 10), None);
    }

    #[test]
    fn test_eta_extrapolates_average() {
        // 2 targets in 20s: 10s each, 8 remaining
        assert_eq!(
            estimate_eta(Duration::from_secs(20), 2, 10),
            Some(Duration::from_secs(80))
        );
    }

    #[test]
    fn test_eta_zero_when_done() {
        assert_eq!(
            estimate_eta(Duration::from_secs(20), 10, 10),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(6)), "6s");
        assert_eq!(format_duration(Duration::from_secs(245)), "4m05s");
        assert_eq!(format_duration(Duration::from_secs(3723)), "1h02m03s");
    }

    #[test]
    fn test_log_progress_does_not_panic() {
        log_progress(Duration::ZERO, 0, 0);
        log_progress(Duration::from_secs(10), 3, 5);
    }
}
