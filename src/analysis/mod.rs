//! Heuristic risk classification.
//!
//! This module provides:
//! - Pattern tables (login, credential, database, config, listing, error)
//! - `ScoringWeights`, the single table of weights and tier thresholds
//! - `RiskClassifier`, which turns a `RawResult` into an `AnalyzedResult`
//! - Per-target summarisation

mod classifier;
pub mod patterns;
mod weights;

pub use classifier::{RiskClassifier, ScoreBreakdown};
pub use weights::ScoringWeights;

use crate::dedup::dedupe;
use crate::models::{AnalyzedResult, RawResult, ReportSummary, RiskLevel};

/// Deduplicates a target's raw results and classifies each survivor once.
pub fn analyze(results: Vec<RawResult>, classifier: &RiskClassifier) -> Vec<AnalyzedResult> {
    dedupe(results)
        .into_iter()
        .map(|result| classifier.classify(result))
        .collect()
}

/// Risk and login counts over a target's analyzed results. Query counters are
/// left at zero for the caller to fill in.
pub fn summarize(results: &[AnalyzedResult]) -> ReportSummary {
    ReportSummary {
        high_risk_count: results
            .iter()
            .filter(|r| r.risk_level == RiskLevel::High)
            .count(),
        medium_risk_count: results
            .iter()
            .filter(|r| r.risk_level == RiskLevel::Medium)
            .count(),
        login_page_count: results.iter().filter(|r| r.is_login_page()).count(),
        total_unique: results.len(),
        ..Default::default()
    }
}
