//! Error handling and processing statistics.
//!
//! This module provides:
//! - The backend failure taxonomy (`FailureKind`) and target-level `ScanError`
//! - Status/body/`reqwest` error categorization
//! - Processing statistics tracking (failures and info metrics)
//! - Retry strategy configuration for direct-probe fetches

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_reqwest_error, categorize_status, find_block_marker, get_retry_strategy,
};
pub use stats::ProcessingStats;
pub use types::{FailureKind, InfoType, InitializationError, ScanError};
