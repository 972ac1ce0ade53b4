//! Raw events delivered to the light controller.

use crate::channel::{Channel, Receiver, Sender};

/// Which input drives filter updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// System brightness slider drives the filter directly.
    Manual,
    /// Ambient light sensor drives the filter through smoothing.
    Auto,
}

impl Mode {
    /// Mode matching the platform's automatic brightness switch.
    pub const fn from_auto_brightness(auto: bool) -> Self {
        if auto { Self::Auto } else { Self::Manual }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    On,
    Off,
}

impl ScreenState {
    pub const fn from_on(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }

    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Display orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Event reported by one of the raw sources
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightEvent {
    /// Ambient light sensor reading in lux
    Lux(f32),
    /// System brightness slider value, in whatever scale the device reports
    Brightness(u16),
    /// Automatic brightness was toggled
    ModeChanged(Mode),
    /// Screen was turned on or off
    Screen(ScreenState),
    /// Display was rotated
    Orientation(Orientation),
    /// A screenshot is about to be taken
    CapturePending,
    /// Recompute the filter from the last known lux value
    Refresh,
}

impl LightEvent {
    /// Whether the event still matters after the session it was queued in.
    ///
    /// Rotation is tracked in every state, so it survives `open`/`close`.
    pub const fn outlives_session(&self) -> bool {
        matches!(self, Self::Orientation(_))
    }
}

/// Type alias for event sender
pub type EventSender<'a, const SIZE: usize> = Sender<'a, LightEvent, SIZE>;

/// Type alias for event receiver
pub type EventReceiver<'a, const SIZE: usize> = Receiver<'a, LightEvent, SIZE>;

/// Type alias for the event channel
pub type EventChannel<const SIZE: usize> = Channel<LightEvent, SIZE>;
