//! Export of scan results.
//!
//! This module serializes a finished `BulkSummary` into:
//! - flat CSV rows, one per analyzed result
//! - a pretty-printed JSON document of the whole summary
//! - a plain-text quick report of login pages and failed targets
//!
//! Each writer targets a file, or stdout when no path is given.

mod csv;
mod json;
mod report;
mod row;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

pub use csv::export_csv;
pub use json::export_json;
pub use report::{export_report, quick_report};
pub use row::{export_rows, ExportRow};

/// Opens `output` for writing, or stdout when `None`.
fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
