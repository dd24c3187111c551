//! CSV export.

use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use super::{export_rows, open_output};
use crate::models::BulkSummary;

/// Writes one CSV row per analyzed result and returns the row count.
///
/// A header row is written even when there are no results.
pub fn export_csv(summary: &BulkSummary, output: Option<&Path>) -> Result<usize> {
    let mut writer = Writer::from_writer(open_output(output)?);
    let rows = export_rows(summary);

    if rows.is_empty() {
        writer
            .write_record([
                "target",
                "category",
                "query",
                "title",
                "url",
                "snippet",
                "timestamp",
                "risk_level",
                "findings",
                "confidence_score",
                "source_backend",
            ])
            .context("Failed to write CSV header")?;
    }
    for row in &rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(rows.len())
}
