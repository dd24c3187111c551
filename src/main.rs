//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dork_recon` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C as cooperative cancellation
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

use dork_recon::initialization::init_logger_with;
use dork_recon::{run_scan, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, finishing in-flight queries and stopping");
            cancel_on_signal.cancel();
        }
    });

    match run_scan(config, cancel).await {
        Ok(summary) => {
            println!(
                "Scanned {} target{} ({} succeeded, {} failed, {} not run) in {:.1}s: {} login pages, {} high risk",
                summary.total_targets,
                if summary.total_targets == 1 { "" } else { "s" },
                summary.successful,
                summary.failed,
                summary.not_run,
                summary.total_duration.as_secs_f64(),
                summary.total_login_pages,
                summary.total_high_risk
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("dork_recon error: {:#}", e);
            process::exit(1);
        }
    }
}
