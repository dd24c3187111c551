//! Main application modules.
//!
//! This module provides utilities for target normalization, progress logging,
//! shutdown handling, and statistics printing used by the scan entry point.

pub mod logging;
pub mod shutdown;
pub mod statistics;
pub mod url;

// Re-export public API
pub use logging::{log_progress, log_target_completion};
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_error_statistics, print_run_summary};
pub use url::normalize_target;
