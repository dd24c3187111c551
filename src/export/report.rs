//! Plain-text quick report.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::open_output;
use crate::models::BulkSummary;

/// Summary totals, targets with login pages (most first), and failed targets.
pub fn quick_report(summary: &BulkSummary) -> String {
    let mut out = String::new();
    let secs = summary.total_duration.as_secs_f64();

    let _ = writeln!(out, "BULK SCAN REPORT");
    let _ = writeln!(out, "================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Total targets:     {}", summary.total_targets);
    let _ = writeln!(out, "Successful scans:  {}", summary.successful);
    let _ = writeln!(out, "Failed scans:      {}", summary.failed);
    if summary.not_run > 0 {
        let _ = writeln!(out, "Not run:           {}", summary.not_run);
    }
    let _ = writeln!(
        out,
        "Total time:        {:.1}s ({:.1} min)",
        secs,
        secs / 60.0
    );
    let _ = writeln!(
        out,
        "Average/target:    {:.2}s",
        summary.avg_seconds_per_target
    );
    let _ = writeln!(out, "Login pages:       {}", summary.total_login_pages);
    let _ = writeln!(out, "High risk:         {}", summary.total_high_risk);
    let _ = writeln!(
        out,
        "Query success:     {}/{} ({:.1}%)",
        summary.queries_satisfied, summary.queries_executed, summary.query_success_rate
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "LOGIN PAGES FOUND");
    let _ = writeln!(out, "-----------------");
    let mut with_logins: Vec<_> = summary
        .reports
        .iter()
        .filter(|r| r.is_success() && r.summary.login_page_count > 0)
        .collect();
    with_logins.sort_by(|a, b| b.summary.login_page_count.cmp(&a.summary.login_page_count));
    if with_logins.is_empty() {
        let _ = writeln!(out, "No login pages found across all scanned targets.");
    }
    for report in with_logins {
        let _ = writeln!(
            out,
            "{} - {} login page(s) ({:.1}s)",
            report.target,
            report.summary.login_page_count,
            report.scan_duration.as_secs_f64()
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "FAILED TARGETS");
    let _ = writeln!(out, "--------------");
    let failed: Vec<_> = summary.reports.iter().filter(|r| !r.is_success()).collect();
    if failed.is_empty() {
        let _ = writeln!(out, "All targets scanned successfully.");
    }
    for report in failed {
        let _ = writeln!(
            out,
            "{} - {}",
            report.target,
            report.error.as_deref().unwrap_or_default()
        );
    }
    out
}

/// Writes [`quick_report`] to `output`, or stdout.
pub fn export_report(summary: &BulkSummary, output: Option<&Path>) -> Result<()> {
    let mut writer = open_output(output)?;
    writer
        .write_all(quick_report(summary).as_bytes())
        .context("Failed to write report")?;
    writer.flush().context("Failed to flush report")?;
    Ok(())
}
