//! Exponential backoff arithmetic.

use std::time::Duration;

/// Levels above this no longer change the result for any realistic cap.
pub const MAX_BACKOFF_LEVEL: u32 = 16;

/// Backoff penalty for a failure level: `base * 2^level`, capped at `cap`.
///
/// Non-decreasing in `level` and never above `cap`.
pub fn backoff_delay(base: Duration, level: u32, cap: Duration) -> Duration {
    let factor = 1u32 << level.min(MAX_BACKOFF_LEVEL);
    base.saturating_mul(factor).min(cap)
}
