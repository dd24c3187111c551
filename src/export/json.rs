//! JSON export.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::open_output;
use crate::models::BulkSummary;

/// Writes the whole summary, reports included, as pretty-printed JSON.
pub fn export_json(summary: &BulkSummary, output: Option<&Path>) -> Result<()> {
    let mut writer = open_output(output)?;
    serde_json::to_writer_pretty(&mut writer, summary).context("Failed to serialize summary")?;
    writeln!(writer).context("Failed to write JSON output")?;
    writer.flush().context("Failed to flush JSON output")?;
    Ok(())
}
