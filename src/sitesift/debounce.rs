//! Cancel-and-reschedule debouncing, driven by caller-supplied time.
//!
//! Nothing here sleeps or spawns. The owner passes `now` on every call, which keeps the
//! primitive deterministic and lets tests move the clock by hand.

use std::time::{Duration, Instant};
use tracing::trace;

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiescence window at `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        trace!(replaced = self.pending.is_some(), "debounce scheduled");
        self.pending = Some((value, now));
    }

    /// Releases the pending value once the window has elapsed since the last schedule.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.window => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Releases the pending value immediately, regardless of time.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
