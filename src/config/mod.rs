//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (delays, timeouts, limits, request fingerprint)
//! - CLI option types and parsing
//! - The shared `BackendConfig` timing/retry policy

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{BackendConfig, Config, LogFormat, LogLevel};
