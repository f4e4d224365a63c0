//! Fixed-interval tick timer.
//!
//! The timer never reads the clock itself; callers pass `now` in. That keeps
//! it deterministic under test and lets the game loop decide how to wait.

use std::time::{Duration, Instant};

/// Repeating timer that fires at most once per poll.
///
/// If the loop falls behind, missed fires are coalesced into one and the
/// next deadline is realigned to the original cadence.
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval: Duration,
    next_due: Instant,
}

impl TickTimer {
    /// First fire is one full interval after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Returns true if a tick is due at `now`, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        if self.interval.is_zero() {
            self.next_due = now;
            return true;
        }

        let missed = (now - self.next_due).as_nanos() / self.interval.as_nanos();
        let steps = u32::try_from(missed + 1).unwrap_or(u32::MAX);
        self.next_due = self
            .next_due
            .checked_add(self.interval.saturating_mul(steps))
            .unwrap_or(now + self.interval);
        true
    }

    /// How long until the next fire (zero if already due).
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
