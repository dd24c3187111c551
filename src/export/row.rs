//! Flat export rows.

use serde::Serialize;

use crate::models::{BulkSummary, ScanReport};

/// One analyzed result flattened for tabular export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub target: String,
    pub category: String,
    pub query: String,
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// RFC 3339 completion time of the target's scan.
    pub timestamp: String,
    pub risk_level: String,
    /// Finding categories joined with `;`.
    pub findings: String,
    pub confidence_score: f64,
    pub source_backend: String,
}

/// Rows for every analyzed result of every report, in report order.
///
/// Failed targets and queries that returned nothing contribute no rows.
pub fn export_rows(summary: &BulkSummary) -> Vec<ExportRow> {
    summary.reports.iter().flat_map(report_rows).collect()
}

fn report_rows(report: &ScanReport) -> impl Iterator<Item = ExportRow> + '_ {
    let timestamp = report.completed_at.to_rfc3339();
    report.analyzed_results.iter().map(move |result| ExportRow {
        target: report.target.clone(),
        category: result.raw.query.category.clone(),
        query: result.raw.query.text.clone(),
        title: result.raw.title.clone(),
        url: result.raw.url.clone(),
        snippet: result.raw.snippet.clone(),
        timestamp: timestamp.clone(),
        risk_level: result.risk_level.to_string(),
        findings: result
            .categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(";"),
        confidence_score: result.confidence_score,
        source_backend: result.raw.source_backend.clone(),
    })
}
