//! Screenshot coordination timers.

use embassy_time::Instant;

use crate::config::CaptureTimings;

/// Action that became due during [`CaptureSchedule::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureAction {
    /// Take the screenshot
    Shoot,
    /// Bring the overlay back
    Resume,
}

/// Pending screenshot deadlines.
///
/// A new request replaces the deadlines of a previous one.
#[derive(Debug, Clone, Default)]
pub struct CaptureSchedule {
    shoot_at: Option<Instant>,
    resume_at: Option<Instant>,
}

impl CaptureSchedule {
    pub const fn new() -> Self {
        Self {
            shoot_at: None,
            resume_at: None,
        }
    }

    /// Schedule a screenshot, and an overlay resume when `paused` is set.
    pub fn request(&mut self, now: Instant, timings: &CaptureTimings, paused: bool) {
        self.shoot_at = Some(now + timings.shot_delay);
        if paused {
            self.resume_at = Some(now + timings.pause);
        }
    }

    /// Pop the next due action, if any.
    ///
    /// Call repeatedly until it returns `None`.
    pub fn poll(&mut self, now: Instant) -> Option<CaptureAction> {
        if self.shoot_at.is_some_and(|at| at <= now) {
            self.shoot_at = None;
            return Some(CaptureAction::Shoot);
        }
        if self.resume_at.is_some_and(|at| at <= now) {
            self.resume_at = None;
            return Some(CaptureAction::Resume);
        }
        None
    }

    /// Whether the overlay is waiting to be resumed
    pub const fn is_paused(&self) -> bool {
        self.resume_at.is_some()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.shoot_at, self.resume_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn cancel(&mut self) {
        self.shoot_at = None;
        self.resume_at = None;
    }
}
