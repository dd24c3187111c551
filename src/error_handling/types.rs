//! Error type definitions.
//!
//! This module defines the backend failure taxonomy, target-level scan errors,
//! initialization errors, and the info counters tracked during a run.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the logger with custom message.
    #[error("Logger initialization error: {0}")]
    LoggerSetupError(String),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A search endpoint URL did not parse.
    #[error("Invalid backend endpoint: {0}")]
    InvalidEndpointError(#[from] url::ParseError),
}

/// Why a single backend call produced no usable results.
///
/// Backend failures are values, not errors: they travel inside a
/// `QueryOutcome::Failure` and never abort a scan.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// HTTP 429 from the provider.
    #[error("rate limited")]
    RateLimited,
    /// The provider served a CAPTCHA, interstitial, or 403.
    #[error("blocked")]
    Blocked,
    /// Connection failure, timeout, or unexpected status.
    #[error("network error")]
    NetworkError,
    /// Well-formed response with zero parseable results.
    #[error("empty")]
    Empty,
    /// The response body could not be read or decoded.
    #[error("parse failure")]
    ParseFailure,
}

impl FailureKind {
    /// Whether the executor retries this failure and escalates backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FailureKind::RateLimited | FailureKind::Blocked | FailureKind::NetworkError
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::RateLimited => "Rate limited",
            FailureKind::Blocked => "Blocked",
            FailureKind::NetworkError => "Network error",
            FailureKind::Empty => "Empty result",
            FailureKind::ParseFailure => "Parse failure",
        }
    }
}

/// Errors that end a single target scan.
///
/// Caught at the job boundary and stored in `ScanReport::error`; they never
/// abort the batch.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The target could not be turned into a fetchable URL.
    #[error("invalid target '{0}'")]
    InvalidTarget(String),

    /// A selected category is not in the template table.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// The run was cancelled while this target was in flight.
    #[error("scan cancelled")]
    Cancelled,

    /// The per-target timeout elapsed.
    #[error("scan timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    /// The worker task panicked.
    #[error("worker panicked: {0}")]
    WorkerPanicked(String),

    /// A direct fetch failed outside the retry/fallback path.
    #[error("HTTP error: {0}")]
    Http(#[from] ReqwestError),
}

/// Notable events counted during a run that are neither failures nor results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// The first backend in the chain answered the query.
    PrimarySatisfied,
    /// A fallback backend answered after the primary failed.
    FallbackSatisfied,
    /// Every backend failed or returned nothing for a query.
    ChainExhausted,
    /// The direct probe recorded a login surface.
    ProbeHit,
    /// A backend response carried a block signature.
    BlockDetected,
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::PrimarySatisfied => "Primary backend satisfied",
            InfoType::FallbackSatisfied => "Fallback backend satisfied",
            InfoType::ChainExhausted => "Fallback chain exhausted",
            InfoType::ProbeHit => "Direct probe hit",
            InfoType::BlockDetected => "Block detected",
        }
    }
}
