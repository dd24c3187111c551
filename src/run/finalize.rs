//! Scan finalization: exports and final statistics.

use anyhow::{Context, Result};
use log::info;

use crate::app::{print_error_statistics, print_run_summary};
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::export::{export_csv, export_json, export_report};
use crate::models::BulkSummary;

/// Writes every export the config asks for.
pub(super) fn write_outputs(config: &Config, summary: &BulkSummary) -> Result<()> {
    if let Some(path) = &config.output_json {
        export_json(summary, Some(path.as_path()))
            .with_context(|| format!("Failed to export JSON to {}", path.display()))?;
        info!("💾 Summary written to {}", path.display());
    }
    if let Some(path) = &config.output_csv {
        let rows = export_csv(summary, Some(path.as_path()))
            .with_context(|| format!("Failed to export CSV to {}", path.display()))?;
        info!("💾 {} rows written to {}", rows, path.display());
    }
    if let Some(path) = &config.output_report {
        export_report(summary, Some(path.as_path()))
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("💾 Report written to {}", path.display());
    }
    Ok(())
}

pub(super) fn print_final_statistics(stats: &ProcessingStats, summary: &BulkSummary) {
    print_error_statistics(stats);
    print_run_summary(summary);
}
