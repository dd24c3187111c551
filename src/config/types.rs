//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    BACKOFF_BASE, DEFAULT_MAX_BACKOFF_SECS, DEFAULT_MAX_DELAY_SECS, DEFAULT_MAX_RETRIES,
    DEFAULT_MIN_DELAY_SECS, DEFAULT_RESULTS_PER_QUERY, DEFAULT_SCAN_TIMEOUT_SECS,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEFAULT_WORKERS, MAX_WORKERS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Timing and retry policy shared by every backend, the direct probe, and the
/// worker pool.
///
/// All components read from one instance so that spacing, backoff and retry
/// behaviour cannot drift between them.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Minimum spacing between two dispatches to the same backend.
    pub min_delay: Duration,
    /// Upper end of the normal delay range. Jitter is drawn from
    /// `[0, max_delay - min_delay]` and added on top of `min_delay`.
    pub max_delay: Duration,
    /// Base of the exponential backoff penalty.
    pub backoff_base: Duration,
    /// Ceiling of the backoff penalty.
    pub max_backoff: Duration,
    /// Attempts per backend per query, initial attempt included.
    pub max_retries: u32,
    /// Size of the target worker pool.
    pub worker_count: usize,
}

impl BackendConfig {
    /// A policy with no spacing, no jitter, and no backoff wait. Useful for
    /// tests and for backends that are not remote.
    pub fn immediate() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_base: Duration::ZERO,
            max_backoff: Duration::ZERO,
            max_retries: DEFAULT_MAX_RETRIES,
            worker_count: DEFAULT_WORKERS,
        }
    }

    /// Width of the jitter window added after the minimum spacing.
    pub fn jitter_range(&self) -> Duration {
        self.max_delay.saturating_sub(self.min_delay)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Config::default().backend_config()
    }
}

/// Scanner configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically
/// with struct update syntax over [`Config::default`].
///
/// # Examples
///
/// ```no_run
/// use dork_recon::Config;
///
/// let config = Config {
///     targets: vec!["example.com".to_string()],
///     workers: 2,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dork_recon",
    about = "Rate-limited search-engine reconnaissance with direct login probing"
)]
pub struct Config {
    /// File with one target hostname per line ('#' starts a comment)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Target hostname (repeatable); combined with FILE when both are given
    #[arg(short = 't', long = "target")]
    pub targets: Vec<String>,

    /// Query categories to run (comma separated); defaults to all known categories
    #[arg(short = 'c', long, value_delimiter = ',')]
    pub categories: Vec<String>,

    /// Results kept per query
    #[arg(long, default_value_t = DEFAULT_RESULTS_PER_QUERY)]
    pub results_per_query: usize,

    /// Only run the first N templates of each category
    #[arg(long)]
    pub queries_per_category: Option<usize>,

    /// Minimum spacing between requests to one backend, in seconds
    #[arg(long, default_value_t = DEFAULT_MIN_DELAY_SECS)]
    pub min_delay_secs: f64,

    /// Upper end of the request delay range, in seconds
    #[arg(long, default_value_t = DEFAULT_MAX_DELAY_SECS)]
    pub max_delay_secs: f64,

    /// Ceiling for exponential backoff after blocks, in seconds
    #[arg(long, default_value_t = DEFAULT_MAX_BACKOFF_SECS)]
    pub max_backoff_secs: u64,

    /// Attempts per backend per query (initial attempt included)
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Number of targets scanned concurrently
    #[arg(short = 'w', long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Per-target timeout in seconds
    #[arg(long, default_value_t = DEFAULT_SCAN_TIMEOUT_SECS)]
    pub scan_timeout_seconds: u64,

    /// Skip the direct homepage/path probe
    #[arg(long)]
    pub no_probe: bool,

    /// Skip search-engine queries (direct probe only)
    #[arg(long)]
    pub no_search: bool,

    /// Write the bulk summary as JSON to this path
    #[arg(long)]
    pub output_json: Option<PathBuf>,

    /// Write flat result rows as CSV to this path
    #[arg(long)]
    pub output_csv: Option<PathBuf>,

    /// Write a plain-text quick report to this path
    #[arg(long)]
    pub output_report: Option<PathBuf>,

    /// Pin a User-Agent instead of rotating through the built-in pool
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Config {
    /// Builds the shared timing/retry policy from the user-facing settings.
    ///
    /// Negative or inverted delay ranges are corrected rather than rejected:
    /// `max_delay` never drops below `min_delay`.
    pub fn backend_config(&self) -> BackendConfig {
        let min_delay = Duration::from_secs_f64(self.min_delay_secs.max(0.0));
        let max_delay = Duration::from_secs_f64(self.max_delay_secs.max(0.0)).max(min_delay);
        BackendConfig {
            min_delay,
            max_delay,
            backoff_base: BACKOFF_BASE,
            max_backoff: Duration::from_secs(self.max_backoff_secs),
            max_retries: self.max_retries.max(1),
            worker_count: self.workers.clamp(1, MAX_WORKERS),
        }
    }

    /// User-Agent used as the HTTP client default.
    pub fn client_user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Per-target timeout.
    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            targets: Vec::new(),
            categories: Vec::new(),
            results_per_query: DEFAULT_RESULTS_PER_QUERY,
            queries_per_category: None,
            min_delay_secs: DEFAULT_MIN_DELAY_SECS,
            max_delay_secs: DEFAULT_MAX_DELAY_SECS,
            max_backoff_secs: DEFAULT_MAX_BACKOFF_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            workers: DEFAULT_WORKERS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            scan_timeout_seconds: DEFAULT_SCAN_TIMEOUT_SECS,
            no_probe: false,
            no_search: false,
            output_json: None,
            output_csv: None,
            output_report: None,
            user_agent: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
