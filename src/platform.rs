//! Collaborators the controller drives but does not own.
//!
//! Implement these traits to plug the controller into a concrete platform.
//! All calls are fire-and-forget: the controller never waits on them and
//! never retries.

use crate::error::LightError;
use crate::event::Mode;
use crate::filter::FilterConfig;

/// Overlay renderer
pub trait OverlayRenderer {
    /// Show the overlay
    fn open(&mut self);

    /// Hide the overlay
    fn close(&mut self);

    /// Apply a new filter config
    fn apply(&mut self, config: FilterConfig);

    /// Temporarily hide the overlay without forgetting its config
    fn pause(&mut self);

    /// Undo [`pause`](Self::pause)
    fn resume(&mut self);
}

/// Persisted user settings.
pub trait SettingsStore {
    /// Largest system brightness value seen so far
    fn max_brightness(&self) -> u16;

    fn set_max_brightness(&mut self, value: u16);

    /// Average lux over a window instead of reacting to every reading
    fn smoothing_enabled(&self) -> bool;

    /// Stop updating the filter while the screen is off
    fn screen_off_pause(&self) -> bool;

    /// User brightness offset in percent
    fn brightness_offset_percent(&self) -> i16;

    /// Open the controller as soon as the service connects
    fn auto_start(&self) -> bool;
}

/// User-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The filter switched between automatic and manual brightness
    ModeChanged(Mode),
    /// A filter update could not be computed
    UpdateFailed(LightError),
    /// The platform refused to take a screenshot
    CaptureFailed,
}

impl Notice {
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ModeChanged(Mode::Auto) => "Filter switched to automatic brightness",
            Self::ModeChanged(Mode::Manual) => "Filter switched to manual brightness",
            Self::UpdateFailed(_) => "Failed to update the filter",
            Self::CaptureFailed => "Failed to take a screenshot",
        }
    }
}

/// Platform services: raw event source registration, state queries,
/// screenshots and notifications.
pub trait Platform {
    /// Register the sensor, brightness, mode and screen watchers
    fn start_watchers(&mut self);

    /// Unregister everything registered by [`start_watchers`](Self::start_watchers)
    fn stop_watchers(&mut self);

    fn is_screen_on(&self) -> bool;

    /// Whether automatic brightness is currently enabled
    fn auto_brightness(&self) -> bool;

    /// Take a screenshot, returns `false` when the platform could not
    fn take_screenshot(&mut self) -> bool;

    fn notify(&mut self, notice: Notice);
}
