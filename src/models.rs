//! Core data model: raw and analyzed results, backend attempts, scan jobs,
//! per-target reports, and the bulk summary.
//!
//! Everything here is plain data. Results are never mutated after creation;
//! reports are built once by the worker that owns the target.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::error_handling::FailureKind;
use crate::query::Query;

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// One candidate record produced by a search backend or the direct probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source_backend: String,
    pub query: Query,
}

/// Outcome of one backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success,
    Failure(FailureKind),
}

/// Diagnostic record of one call to one backend for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendAttempt {
    pub backend: String,
    pub outcome: AttemptOutcome,
    #[serde(serialize_with = "serialize_secs")]
    pub latency: Duration,
}

/// Coarse severity bucket. Ordered, so `tier >= RiskLevel::Medium` reads
/// naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finding category whose threshold a result met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    LoginPage,
    SensitiveFile,
    ConfigExposure,
    DirectoryListing,
    ErrorPage,
}

impl FindingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCategory::LoginPage => "login_page",
            FindingCategory::SensitiveFile => "sensitive_file",
            FindingCategory::ConfigExposure => "config_exposure",
            FindingCategory::DirectoryListing => "directory_listing",
            FindingCategory::ErrorPage => "error_page",
        }
    }
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deduplicated result with its risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedResult {
    #[serde(flatten)]
    pub raw: RawResult,
    pub risk_level: RiskLevel,
    pub categories: BTreeSet<FindingCategory>,
    pub confidence_score: f64,
}

impl AnalyzedResult {
    pub fn is_login_page(&self) -> bool {
        self.categories.contains(&FindingCategory::LoginPage)
    }
}

/// Lifecycle of a target scan job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Pending,
    Running,
    Done,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Done | JobState::Failed)
    }
}

/// One unit of work: a target and the categories to query for it.
///
/// Owned by exactly one worker. State moves `Pending -> Running -> Done|Failed`
/// and a terminal state is never left.
#[derive(Debug, Clone)]
pub struct TargetScanJob {
    pub target: String,
    pub selected_categories: Vec<String>,
    state: JobState,
}

impl TargetScanJob {
    pub fn new(target: impl Into<String>, selected_categories: Vec<String>) -> Self {
        Self {
            target: target.into(),
            selected_categories,
            state: JobState::Pending,
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Applies a state transition. Returns `false` and leaves the state alone
    /// if the transition is not allowed.
    pub fn transition(&mut self, next: JobState) -> bool {
        let allowed = matches!(
            (self.state, next),
            (JobState::Pending, JobState::Running)
                | (JobState::Running, JobState::Done)
                | (JobState::Running, JobState::Failed)
        );
        if allowed {
            self.state = next;
        }
        allowed
    }
}

/// Per-target counts derived from the analyzed results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub login_page_count: usize,
    pub total_unique: usize,
    /// Search queries dispatched to the fallback chain.
    pub queries_executed: usize,
    /// Queries for which some backend returned at least one result.
    pub queries_satisfied: usize,
    /// Results contributed by the direct probe before deduplication.
    pub probe_hits: usize,
}

/// Outcome of one target scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: String,
    pub state: JobState,
    pub analyzed_results: Vec<AnalyzedResult>,
    pub summary: ReportSummary,
    pub attempts: Vec<BackendAttempt>,
    #[serde(serialize_with = "serialize_secs")]
    pub scan_duration: Duration,
    pub completed_at: DateTime<Utc>,
    pub error: Option<String>,
}

impl ScanReport {
    /// A report for a target whose pipeline failed: empty results, `error` set.
    pub fn failed(
        target: impl Into<String>,
        error: impl Into<String>,
        scan_duration: Duration,
    ) -> Self {
        Self {
            target: target.into(),
            state: JobState::Failed,
            analyzed_results: Vec::new(),
            summary: ReportSummary::default(),
            attempts: Vec::new(),
            scan_duration,
            completed_at: Utc::now(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-backend attempt counts across a bulk run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackendStats {
    pub attempts: usize,
    pub successes: usize,
    pub rate_limited: usize,
    pub blocked: usize,
    pub network_errors: usize,
    pub empty: usize,
    pub parse_failures: usize,
}

impl BackendStats {
    fn record(&mut self, outcome: AttemptOutcome) {
        self.attempts += 1;
        match outcome {
            AttemptOutcome::Success => self.successes += 1,
            AttemptOutcome::Failure(FailureKind::RateLimited) => self.rate_limited += 1,
            AttemptOutcome::Failure(FailureKind::Blocked) => self.blocked += 1,
            AttemptOutcome::Failure(FailureKind::NetworkError) => self.network_errors += 1,
            AttemptOutcome::Failure(FailureKind::Empty) => self.empty += 1,
            AttemptOutcome::Failure(FailureKind::ParseFailure) => self.parse_failures += 1,
        }
    }
}

/// Aggregate over every report in a bulk run. Built once, after all jobs have
/// finished or been cancelled.
#[derive(Debug, Clone, Serialize)]
pub struct BulkSummary {
    pub total_targets: usize,
    pub successful: usize,
    pub failed: usize,
    /// Jobs never started because the run was cancelled.
    pub not_run: usize,
    pub total_login_pages: usize,
    pub total_high_risk: usize,
    pub total_findings: usize,
    pub queries_executed: usize,
    pub queries_satisfied: usize,
    pub query_success_rate: f64,
    #[serde(serialize_with = "serialize_secs")]
    pub total_duration: Duration,
    pub avg_seconds_per_target: f64,
    /// Highest number of jobs observed running at once.
    pub peak_running: usize,
    pub cancelled: bool,
    pub backend_stats: BTreeMap<String, BackendStats>,
    pub reports: Vec<ScanReport>,
}

impl BulkSummary {
    pub fn from_reports(
        reports: Vec<ScanReport>,
        total_targets: usize,
        total_duration: Duration,
        peak_running: usize,
        cancelled: bool,
    ) -> Self {
        let successful = reports.iter().filter(|r| r.is_success()).count();
        let failed = reports.len() - successful;
        let queries_executed: usize = reports.iter().map(|r| r.summary.queries_executed).sum();
        let queries_satisfied: usize = reports.iter().map(|r| r.summary.queries_satisfied).sum();

        let mut backend_stats: BTreeMap<String, BackendStats> = BTreeMap::new();
        for attempt in reports.iter().flat_map(|r| r.attempts.iter()) {
            backend_stats
                .entry(attempt.backend.clone())
                .or_default()
                .record(attempt.outcome);
        }

        let avg_seconds_per_target = if reports.is_empty() {
            0.0
        } else {
            total_duration.as_secs_f64() / reports.len() as f64
        };
        let query_success_rate = if queries_executed == 0 {
            0.0
        } else {
            queries_satisfied as f64 / queries_executed as f64 * 100.0
        };

        Self {
            total_targets,
            successful,
            failed,
            not_run: total_targets.saturating_sub(reports.len()),
            total_login_pages: reports.iter().map(|r| r.summary.login_page_count).sum(),
            total_high_risk: reports.iter().map(|r| r.summary.high_risk_count).sum(),
            total_findings: reports.iter().map(|r| r.summary.total_unique).sum(),
            queries_executed,
            queries_satisfied,
            query_success_rate,
            total_duration,
            avg_seconds_per_target,
            peak_running,
            cancelled,
            backend_stats,
            reports,
        }
    }

    pub fn report(&self, target: &str) -> Option<&ScanReport> {
        self.reports.iter().find(|r| r.target == target)
    }
}
