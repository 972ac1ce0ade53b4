//! Controller timing and tuning parameters.

use embassy_time::Duration;

/// Default delay before the first smoothing tick
pub const DEFAULT_SMOOTHING_DELAY: Duration = Duration::from_millis(4_500);

/// Default period between smoothing ticks
pub const DEFAULT_SMOOTHING_PERIOD: Duration = Duration::from_millis(6_000);

/// Default width of the lux averaging window
pub const DEFAULT_SMOOTHING_WINDOW: Duration = Duration::from_millis(11_000);

/// Default time the overlay stays paused for a screenshot
pub const DEFAULT_CAPTURE_PAUSE: Duration = Duration::from_millis(5_000);

/// Default delay between pausing the overlay and taking the screenshot
pub const DEFAULT_CAPTURE_SHOT_DELAY: Duration = Duration::from_millis(2_000);

/// Flat brightness offset applied in landscape orientation
pub const DEFAULT_LANDSCAPE_OFFSET: f32 = 0.1;

/// Configuration for lux smoothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothingTimings {
    /// Delay between arming and the first tick
    pub initial_delay: Duration,
    /// Steady period between ticks
    pub period: Duration,
    /// Samples younger than this are averaged
    pub window: Duration,
}

impl Default for SmoothingTimings {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_SMOOTHING_DELAY,
            period: DEFAULT_SMOOTHING_PERIOD,
            window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

/// Configuration for screenshot handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTimings {
    /// How long the overlay stays paused
    pub pause: Duration,
    /// Delay before the screenshot is triggered
    pub shot_delay: Duration,
}

impl Default for CaptureTimings {
    fn default() -> Self {
        Self {
            pause: DEFAULT_CAPTURE_PAUSE,
            shot_delay: DEFAULT_CAPTURE_SHOT_DELAY,
        }
    }
}

/// Configuration for the light controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub smoothing: SmoothingTimings,
    pub capture: CaptureTimings,
    pub landscape_offset: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingTimings::default(),
            capture: CaptureTimings::default(),
            landscape_offset: DEFAULT_LANDSCAPE_OFFSET,
        }
    }
}
