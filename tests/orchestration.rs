//! Integration tests for the bulk orchestrator.
//!
//! These tests drive `Scanner::bulk_scan` with in-process backends to verify:
//! - Per-target failure isolation (panics, invalid targets)
//! - The worker-pool concurrency bound
//! - Cooperative cancellation and not-run accounting
//! - Fallback behaviour visible in the bulk summary
//! - Progress callback delivery

mod helpers;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use dork_recon::models::JobState;
use dork_recon::{
    FailureKind, ProcessingStats, ProgressCallback, ScanReport, Scanner, SearchBackend,
};

use helpers::{test_config, FakeBackend};

fn targets(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn categories() -> Vec<String> {
    vec!["login_admin".to_string()]
}

fn scanner_with(workers: usize, backends: Vec<Arc<dyn SearchBackend>>) -> Scanner {
    Scanner::from_parts(
        &test_config(workers),
        backends,
        None,
        Arc::new(ProcessingStats::new()),
    )
}

#[tokio::test(start_paused = true)]
async fn test_one_target_failure_does_not_abort_batch() {
    let backend = FakeBackend::new("fake")
        .panicking_on("broken.example")
        .into_arc();
    let scanner = scanner_with(2, vec![backend.clone() as Arc<dyn SearchBackend>]);

    let summary = scanner
        .bulk_scan(
            targets(&["ok.example", "broken.example"]),
            &categories(),
            None,
            CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.total_targets, 2);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.not_run, 0);

    let ok = summary.report("ok.example").expect("ok report");
    assert!(ok.error.is_none());
    assert_eq!(ok.state, JobState::Done);
    assert_eq!(ok.summary.login_page_count, 1);

    let broken = summary.report("broken.example").expect("broken report");
    assert!(broken.analyzed_results.is_empty());
    assert!(broken
        .error
        .as_deref()
        .is_some_and(|e| e.contains("worker panicked")));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_target_becomes_failed_report() {
    let backend = FakeBackend::new("fake").into_arc();
    let scanner = scanner_with(2, vec![backend.clone() as Arc<dyn SearchBackend>]);

    let summary = scanner
        .bulk_scan(
            targets(&["good.example", "bad target"]),
            &categories(),
            None,
            CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.successful, 1);
    let bad = summary.report("bad target").expect("bad report");
    assert_eq!(bad.state, JobState::Failed);
    assert!(bad
        .error
        .as_deref()
        .is_some_and(|e| e.contains("invalid target")));
    // the invalid target never reached the backend
    assert_eq!(backend.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_running_jobs_never_exceed_worker_count() {
    let backend = FakeBackend::new("slow")
        .with_latency(Duration::from_millis(100))
        .into_arc();
    let scanner = scanner_with(2, vec![backend.clone() as Arc<dyn SearchBackend>]);

    let names: Vec<String> = (0..6).map(|i| format!("t{}.example", i)).collect();
    let summary = scanner
        .bulk_scan(names, &categories(), None, CancellationToken::new())
        .await;

    assert_eq!(summary.successful, 6);
    assert_eq!(summary.peak_running, 2);
    assert!(backend.max_in_flight() <= 2);
    assert_eq!(backend.calls(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_keeps_finished_reports_and_skips_the_rest() {
    let backend = FakeBackend::new("slow")
        .with_latency(Duration::from_secs(1))
        .into_arc();
    let mut config = test_config(1);
    config.queries_per_category = Some(3);
    let scanner = Scanner::from_parts(
        &config,
        vec![backend.clone() as Arc<dyn SearchBackend>],
        None,
        Arc::new(ProcessingStats::new()),
    );

    let cancel = CancellationToken::new();
    let cancel_after_first = cancel.clone();
    let progress: ProgressCallback = Arc::new(
        move |completed: usize, _total: usize, _target: &str, _report: &ScanReport| {
            if completed == 1 {
                cancel_after_first.cancel();
            }
        },
    );

    let names: Vec<String> = (0..5).map(|i| format!("t{}.example", i)).collect();
    let summary = scanner
        .bulk_scan(names, &categories(), Some(progress), cancel)
        .await;

    assert!(summary.cancelled);
    assert_eq!(summary.total_targets, 5);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed + summary.not_run, 4);
    assert!(summary.not_run >= 3);
    for report in summary.reports.iter().filter(|r| !r.is_success()) {
        assert_eq!(report.error.as_deref(), Some("scan cancelled"));
    }
    let finished = summary.reports.iter().find(|r| r.is_success()).unwrap();
    assert_eq!(finished.summary.queries_executed, 3);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_before_start_runs_nothing() {
    let backend = FakeBackend::new("fake").into_arc();
    let scanner = scanner_with(2, vec![backend.clone() as Arc<dyn SearchBackend>]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let summary = scanner
        .bulk_scan(targets(&["a.example", "b.example"]), &categories(), None, cancel)
        .await;

    assert_eq!(summary.not_run, 2);
    assert!(summary.reports.is_empty());
    assert_eq!(backend.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_blocked_primary_falls_back() {
    let primary = FakeBackend::new("primary")
        .failing_with(FailureKind::Blocked)
        .into_arc();
    let secondary = FakeBackend::new("secondary").into_arc();
    let mut config = test_config(1);
    config.max_retries = 2;
    let stats = Arc::new(ProcessingStats::new());
    let scanner = Scanner::from_parts(
        &config,
        vec![
            primary.clone() as Arc<dyn SearchBackend>,
            secondary.clone() as Arc<dyn SearchBackend>,
        ],
        None,
        Arc::clone(&stats),
    );

    let summary = scanner
        .bulk_scan(
            targets(&["example.com"]),
            &categories(),
            None,
            CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.successful, 1);
    assert_eq!(summary.queries_satisfied, 1);
    assert_eq!(primary.calls(), 2);
    assert_eq!(secondary.calls(), 1);

    let primary_stats = &summary.backend_stats["primary"];
    assert_eq!(primary_stats.attempts, 2);
    assert_eq!(primary_stats.blocked, 2);
    assert_eq!(summary.backend_stats["secondary"].successes, 1);
    assert_eq!(stats.get_failure_count(FailureKind::Blocked), 2);

    let report = summary.report("example.com").unwrap();
    assert_eq!(report.analyzed_results[0].raw.source_backend, "secondary");
}

#[tokio::test(start_paused = true)]
async fn test_successful_primary_never_touches_fallback() {
    let primary = FakeBackend::new("primary").into_arc();
    let secondary = FakeBackend::new("secondary").into_arc();
    let scanner = scanner_with(
        2,
        vec![
            primary.clone() as Arc<dyn SearchBackend>,
            secondary.clone() as Arc<dyn SearchBackend>,
        ],
    );

    let summary = scanner
        .bulk_scan(
            targets(&["a.example", "b.example", "c.example"]),
            &categories(),
            None,
            CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.successful, 3);
    assert_eq!(primary.calls(), 3);
    assert_eq!(secondary.calls(), 0);
    assert!((summary.query_success_rate - 100.0).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_chain_is_success_with_no_findings() {
    let only = FakeBackend::new("only")
        .failing_with(FailureKind::Empty)
        .into_arc();
    let scanner = scanner_with(1, vec![only.clone() as Arc<dyn SearchBackend>]);

    let summary = scanner
        .bulk_scan(
            targets(&["quiet.example"]),
            &categories(),
            None,
            CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.successful, 1);
    assert_eq!(summary.queries_executed, 1);
    assert_eq!(summary.queries_satisfied, 0);
    assert_eq!(summary.total_findings, 0);
}

#[tokio::test(start_paused = true)]
async fn test_progress_callback_sees_every_target_once() {
    let backend = FakeBackend::new("fake").into_arc();
    let scanner = scanner_with(3, vec![backend.clone() as Arc<dyn SearchBackend>]);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let calls = Arc::new(AtomicUsize::new(0));
    let progress: ProgressCallback = {
        let seen = Arc::clone(&seen);
        let calls = Arc::clone(&calls);
        Arc::new(move |completed: usize, total: usize, target: &str, report: &ScanReport| {
            assert_eq!(total, 4);
            assert_eq!(target, report.target);
            calls.fetch_add(1, Ordering::SeqCst);
            seen.lock().unwrap().push((completed, target.to_string()));
        })
    };

    let summary = scanner
        .bulk_scan(
            targets(&["a.example", "b.example", "c.example", "d.example"]),
            &categories(),
            Some(progress),
            CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.successful, 4);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    let seen = seen.lock().unwrap();
    let counts: Vec<usize> = seen.iter().map(|(c, _)| *c).collect();
    assert_eq!(counts, vec![1, 2, 3, 4]);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_category_fails_every_target() {
    let backend = FakeBackend::new("fake").into_arc();
    let scanner = scanner_with(2, vec![backend.clone() as Arc<dyn SearchBackend>]);

    let summary = scanner
        .bulk_scan(
            targets(&["a.example", "b.example"]),
            &["no_such_category".to_string()],
            None,
            CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.failed, 2);
    assert_eq!(backend.calls(), 0);
    assert!(summary.reports.iter().all(|r| r
        .error
        .as_deref()
        .is_some_and(|e| e.contains("no_such_category"))));
}

#[tokio::test(start_paused = true)]
async fn test_search_disabled_skips_backends() {
    let backend = FakeBackend::new("fake").into_arc();
    let mut config = test_config(1);
    config.no_search = true;
    let scanner = Scanner::from_parts(
        &config,
        vec![backend.clone() as Arc<dyn SearchBackend>],
        None,
        Arc::new(ProcessingStats::new()),
    );

    let summary = scanner
        .bulk_scan(
            targets(&["a.example"]),
            &categories(),
            None,
            CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.successful, 1);
    assert_eq!(summary.queries_executed, 0);
    assert_eq!(backend.calls(), 0);
}
