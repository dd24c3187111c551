//! Per-backend rate and backoff control.
//!
//! One [`BackendLimiter`] per backend, shared across workers. Exposes only
//! `acquire` and outcome recording; the timestamp and level fields stay
//! private.

mod backoff;
mod limiter;

pub use backoff::{backoff_delay, MAX_BACKOFF_LEVEL};
pub use limiter::BackendLimiter;
