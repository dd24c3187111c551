//! dork_recon library: bulk search-engine reconnaissance.
//!
//! Each target is expanded into category queries that run through a fallback
//! chain of rate-limited, backoff-aware search backends. A direct probe checks
//! the target's own homepage and well-known login paths. The merged results
//! are deduplicated and scored by a heuristic risk classifier.
//!
//! # Example
//!
//! ```no_run
//! use dork_recon::{run_scan, Config};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config {
//!     targets: vec!["example.com".to_string()],
//!     categories: vec!["login_admin".to_string()],
//!     ..Default::default()
//! };
//! let summary = run_scan(config, CancellationToken::new()).await?;
//! println!("{} login pages", summary.total_login_pages);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
mod app;
pub mod backend;
pub mod config;
pub mod dedup;
pub mod error_handling;
pub mod export;
pub mod fallback;
pub mod initialization;
pub mod models;
pub mod probe;
pub mod query;
pub mod rate_limiter;
mod run;
mod utils;

pub use app::normalize_target;
pub use backend::SearchBackend;
pub use config::{BackendConfig, Config, LogFormat, LogLevel};
pub use error_handling::{FailureKind, ProcessingStats, ScanError};
pub use models::{AnalyzedResult, BulkSummary, RawResult, RiskLevel, ScanReport};
pub use run::{read_targets, run_scan, ProgressCallback, Scanner};
