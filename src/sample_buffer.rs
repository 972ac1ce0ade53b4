//! Time-ordered history of ambient light readings.

use embassy_time::{Duration, Instant};
use heapless::Deque;

/// Maximum number of samples kept in the history.
pub const SAMPLE_CAPACITY: usize = 100;

/// A single ambient light reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    pub timestamp: Instant,
    pub lux: f32,
}

impl LightSample {
    pub const fn new(timestamp: Instant, lux: f32) -> Self {
        Self { timestamp, lux }
    }
}

/// Bounded sample history with a sliding-window average.
///
/// Samples are kept in insertion order and their timestamps never decrease.
/// When the history is full the oldest sample is evicted.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    inner: Deque<LightSample, SAMPLE_CAPACITY>,
}

impl SampleBuffer {
    pub const fn new() -> Self {
        Self {
            inner: Deque::new(),
        }
    }

    /// Append a sample, evicting the oldest one when full.
    ///
    /// A timestamp older than the latest sample is raised to the latest
    /// timestamp so ordering is preserved.
    pub fn record(&mut self, sample: LightSample) {
        let mut sample = sample;
        if let Some(latest) = self.inner.back() {
            if sample.timestamp < latest.timestamp {
                sample.timestamp = latest.timestamp;
            }
        }

        if self.inner.is_full() {
            self.inner.pop_front();
        }
        // Cannot fail, a slot was freed above
        let _ = self.inner.push_back(sample);
    }

    /// Mean lux of the samples younger than `window`.
    ///
    /// Falls back to the latest sample when none is recent enough, and
    /// returns `None` only for an empty history.
    pub fn window_average(&self, now: Instant, window: Duration) -> Option<f32> {
        let latest = self.inner.back()?;

        let mut total = 0.0_f64;
        let mut count = 0_u32;
        for sample in self
            .inner
            .iter()
            .filter(|sample| now.saturating_duration_since(sample.timestamp) < window)
        {
            total += f64::from(sample.lux);
            count += 1;
        }

        if count == 0 {
            return Some(latest.lux);
        }

        #[allow(clippy::cast_possible_truncation)]
        let average = (total / f64::from(count)) as f32;
        Some(average)
    }

    /// Drop every sample
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Most recently recorded sample
    pub fn latest(&self) -> Option<LightSample> {
        self.inner.back().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &LightSample> {
        self.inner.iter()
    }
}
