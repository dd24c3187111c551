//! Tests for CSV, JSON, and quick-report export of a bulk summary.

use std::time::Duration;

use chrono::Utc;
use tempfile::NamedTempFile;

use dork_recon::analysis::{analyze, summarize, RiskClassifier};
use dork_recon::export::{export_csv, export_json, export_rows, quick_report};
use dork_recon::models::JobState;
use dork_recon::query::Query;
use dork_recon::{BulkSummary, RawResult, ScanReport};

fn raw(target: &str, title: &str, url: &str, snippet: &str) -> RawResult {
    RawResult {
        title: title.to_string(),
        url: url.to_string(),
        snippet: snippet.to_string(),
        source_backend: "google".to_string(),
        query: Query::new(
            format!("site:{} inurl:admin", target),
            "login_admin",
            target,
        ),
    }
}

fn done_report(target: &str, results: Vec<RawResult>) -> ScanReport {
    let analyzed_results = analyze(results, &RiskClassifier::default());
    let summary = summarize(&analyzed_results);
    ScanReport {
        target: target.to_string(),
        state: JobState::Done,
        analyzed_results,
        summary,
        attempts: Vec::new(),
        scan_duration: Duration::from_secs(4),
        completed_at: Utc::now(),
        error: None,
    }
}

fn sample_summary() -> BulkSummary {
    let reports = vec![
        done_report(
            "alpha.example",
            vec![
                raw(
                    "alpha.example",
                    "Admin Login, Alpha",
                    "https://alpha.example/admin/login",
                    "Enter your \"username\" and password",
                ),
                raw(
                    "alpha.example",
                    "Spring recipes",
                    "https://alpha.example/blog/post-1",
                    "Seasonal baking ideas",
                ),
            ],
        ),
        done_report("beta.example", Vec::new()),
        ScanReport::failed(
            "gamma.example",
            "scan timed out after 1800s",
            Duration::from_secs(1800),
        ),
    ];
    BulkSummary::from_reports(reports, 4, Duration::from_secs(60), 2, true)
}

#[test]
fn test_rows_cover_only_analyzed_results() {
    let rows = export_rows(&sample_summary());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].target, "alpha.example");
    assert_eq!(rows[0].category, "login_admin");
    assert_eq!(rows[0].query, "site:alpha.example inurl:admin");
    assert_eq!(rows[0].risk_level, "high");
    assert!(rows[0].findings.contains("login_page"));
    assert_eq!(rows[1].risk_level, "low");
    assert!(rows[1].findings.is_empty());
}

#[test]
fn test_export_csv_round_trips_through_reader() {
    let file = NamedTempFile::new().expect("temp file");
    let written = export_csv(&sample_summary(), Some(file.path())).expect("export");
    assert_eq!(written, 2);

    let mut reader = csv::Reader::from_path(file.path()).expect("reader");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(&headers[0], "target");
    assert_eq!(&headers[4], "url");

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("record")).collect();
    assert_eq!(records.len(), 2);
    // commas and quotes survive quoting
    assert_eq!(&records[0][3], "Admin Login, Alpha");
    assert_eq!(&records[0][5], "Enter your \"username\" and password");
}

#[test]
fn test_export_json_is_valid() {
    let file = NamedTempFile::new().expect("temp file");
    export_json(&sample_summary(), Some(file.path())).expect("export");

    let text = std::fs::read_to_string(file.path()).expect("read");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value["total_targets"], 4);
    assert_eq!(value["not_run"], 1);
    assert_eq!(value["cancelled"], true);
    assert_eq!(value["reports"][0]["analyzed_results"][0]["risk_level"], "high");
    assert_eq!(value["reports"][2]["state"], "failed");
}

#[test]
fn test_quick_report_lists_logins_and_failures() {
    let report = quick_report(&sample_summary());
    assert!(report.contains("Total targets:     4"));
    assert!(report.contains("Not run:           1"));
    assert!(report.contains("alpha.example - 1 login page(s)"));
    assert!(!report.contains("beta.example - "));
    assert!(report.contains("gamma.example - scan timed out after 1800s"));
}
