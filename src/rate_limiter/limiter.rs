//! Per-backend spacing, jitter, and backoff.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rand::Rng;
use tokio::time::{sleep_until, Instant};

use super::backoff::{backoff_delay, MAX_BACKOFF_LEVEL};
use crate::config::BackendConfig;
use crate::error_handling::FailureKind;

#[derive(Debug, Default)]
struct LimiterState {
    /// Time the most recent dispatch was scheduled for.
    last_dispatch: Option<Instant>,
    backoff_level: u32,
    consecutive_failures: u32,
}

/// Rate/backoff controller for one backend.
///
/// Shared by every worker that uses the backend. Each `acquire` reserves the
/// next dispatch slot under the lock, then sleeps until that slot without
/// holding it, so dispatches are strictly spaced across all workers while
/// `record_*` calls are never stuck behind a sleeping worker.
///
/// Spacing between two dispatches is `max(min_delay, penalty)` plus jitter
/// drawn from `[0, max_delay - min_delay]`, where `penalty` is the
/// exponential backoff for the current failure level (zero at baseline).
pub struct BackendLimiter {
    name: String,
    config: BackendConfig,
    state: Mutex<LimiterState>,
}

impl BackendLimiter {
    pub fn new(name: impl Into<String>, config: BackendConfig) -> Self {
        Self {
            name: name.into(),
            config,
            state: Mutex::new(LimiterState::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, LimiterState> {
        // State is plain counters; a panic mid-update cannot leave it inconsistent
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Waits until this backend may be called again and reserves the slot.
    ///
    /// Returns how long the caller waited.
    pub async fn acquire(&self) -> Duration {
        let jitter = self.draw_jitter();
        let now = Instant::now();
        let slot = {
            let mut state = self.lock();
            let slot = match state.last_dispatch {
                Some(last) => (last + self.spacing_for(state.backoff_level) + jitter).max(now),
                None => now,
            };
            state.last_dispatch = Some(slot);
            slot
        };

        let wait = slot.saturating_duration_since(now);
        if !wait.is_zero() {
            log::trace!("{}: waiting {:?} before dispatch", self.name, wait);
            sleep_until(slot).await;
        }
        wait
    }

    /// A response with results: clear the failure streak and halve the
    /// backoff level.
    pub fn record_success(&self) {
        let mut state = self.lock();
        state.consecutive_failures = 0;
        state.backoff_level /= 2;
    }

    /// A failed call. Retryable kinds escalate backoff; `Empty` and
    /// `ParseFailure` leave the state untouched.
    pub fn record_failure(&self, kind: FailureKind) {
        if !kind.is_retryable() {
            return;
        }
        let mut state = self.lock();
        state.consecutive_failures = state.consecutive_failures.saturating_add(1);
        state.backoff_level = (state.backoff_level + 1).min(MAX_BACKOFF_LEVEL);
        log::debug!(
            "{}: {} (streak {}), next spacing {:?}",
            self.name,
            kind,
            state.consecutive_failures,
            self.spacing_for(state.backoff_level)
        );
    }

    /// Minimum spacing the next dispatch will observe, jitter excluded.
    pub fn next_delay(&self) -> Duration {
        self.spacing_for(self.lock().backoff_level)
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.lock().consecutive_failures
    }

    pub fn backoff_level(&self) -> u32 {
        self.lock().backoff_level
    }

    fn spacing_for(&self, level: u32) -> Duration {
        if level == 0 {
            return self.config.min_delay;
        }
        let penalty = backoff_delay(self.config.backoff_base, level, self.config.max_backoff);
        self.config.min_delay.max(penalty)
    }

    fn draw_jitter(&self) -> Duration {
        let range = self.config.jitter_range();
        if range.is_zero() {
            return Duration::ZERO;
        }
        let nanos = range.as_nanos().min(u64::MAX as u128) as u64;
        Duration::from_nanos(rand::rng().random_range(0..=nanos))
    }
}
