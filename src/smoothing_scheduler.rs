//! Periodic smoothing ticks.
//!
//! Portable timer without async or platform-specific handles. The scheduler
//! only tracks deadlines; the controller polls it with the current time and
//! the host is responsible for sleeping until [`SmoothingScheduler::next_deadline`].

use embassy_time::{Duration, Instant};

use crate::config::SmoothingTimings;

/// Two-phase periodic timer: an initial delay, then a steady period.
///
/// Arming an armed scheduler and disarming a disarmed one are no-ops.
/// Once [`disarm`](Self::disarm) returns, [`poll`](Self::poll) never
/// reports another tick until the scheduler is armed again.
#[derive(Debug, Clone)]
pub struct SmoothingScheduler {
    initial_delay: Duration,
    period: Duration,
    next_tick: Option<Instant>,
}

impl SmoothingScheduler {
    pub const fn new(initial_delay: Duration, period: Duration) -> Self {
        Self {
            initial_delay,
            period,
            next_tick: None,
        }
    }

    pub const fn from_timings(timings: &SmoothingTimings) -> Self {
        Self::new(timings.initial_delay, timings.period)
    }

    /// Start ticking, the first tick fires after the initial delay.
    ///
    /// Returns `false` if the scheduler was already armed.
    pub fn arm(&mut self, now: Instant) -> bool {
        if self.next_tick.is_some() {
            return false;
        }
        self.next_tick = Some(now + self.initial_delay);
        true
    }

    /// Stop ticking.
    ///
    /// Returns `false` if the scheduler was not armed.
    pub fn disarm(&mut self) -> bool {
        self.next_tick.take().is_some()
    }

    pub const fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Deadline of the next tick, if armed
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Check whether a tick is due and advance the deadline.
    ///
    /// Missed ticks are not replayed: after a long stall the next deadline
    /// is rebased on `now` so only one tick fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.next_tick else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let mut next = deadline + self.period;
        if next <= now {
            next = now + self.period;
        }
        self.next_tick = Some(next);
        true
    }
}

impl Default for SmoothingScheduler {
    fn default() -> Self {
        Self::from_timings(&SmoothingTimings::default())
    }
}
