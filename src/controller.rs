use embassy_time::{Duration, Instant};
use log::{debug, trace, warn};

use crate::capture::{CaptureAction, CaptureSchedule};
use crate::config::ControllerConfig;
use crate::error::LightError;
use crate::event::{EventReceiver, LightEvent, Mode, Orientation, ScreenState};
use crate::filter::{BrightnessCurve, DynamicOptimizer, FilterConfig, derive_config};
use crate::platform::{Notice, OverlayRenderer, Platform, SettingsStore};
use crate::sample_buffer::{LightSample, SampleBuffer};
use crate::smoothing_scheduler::SmoothingScheduler;

/// Controller lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Closed,
    /// Brightness slider drives the filter
    Manual,
    /// Lux drives the filter, smoothing timer not running
    AutoIdle,
    /// Lux drives the filter, smoothing timer running
    AutoSmoothing,
}

impl ControllerState {
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Active mode, `None` when closed
    pub const fn mode(self) -> Option<Mode> {
        match self {
            Self::Closed => None,
            Self::Manual => Some(Mode::Manual),
            Self::AutoIdle | Self::AutoSmoothing => Some(Mode::Auto),
        }
    }
}

/// Result of a [`LightController::poll`] call
#[derive(Debug, Clone, Copy)]
pub struct PollResult {
    /// The earliest pending timer deadline, `None` when nothing is scheduled.
    pub next_deadline: Option<Instant>,
    /// How long the caller may sleep before polling again.
    pub sleep_duration: Option<Duration>,
}

/// Light controller - the main orchestrator
///
/// Turns raw sensor, brightness and screen events into overlay updates.
/// Events are marshaled through an [`EventChannel`](crate::EventChannel) and
/// handled one at a time in [`poll`](Self::poll), so all state lives on a
/// single execution context.
pub struct LightController<'a, R, S, C, P, const EVENTS: usize>
where
    R: OverlayRenderer,
    S: SettingsStore,
    C: BrightnessCurve,
    P: Platform,
{
    // External dependencies and configuration
    events: EventReceiver<'a, EVENTS>,
    renderer: R,
    settings: S,
    curve: C,
    platform: P,
    config: ControllerConfig,
    optimizer: DynamicOptimizer,

    // Internal state
    state: ControllerState,
    screen: ScreenState,
    orientation: Orientation,
    awaiting_first_lux: bool,
    last_lux: Option<f32>,
    last_brightness: Option<u16>,
    filter_brightness: Option<u16>,

    // Internal dependencies
    samples: SampleBuffer,
    scheduler: SmoothingScheduler,
    capture: CaptureSchedule,
}

impl<'a, R, S, C, P, const EVENTS: usize> LightController<'a, R, S, C, P, EVENTS>
where
    R: OverlayRenderer,
    S: SettingsStore,
    C: BrightnessCurve,
    P: Platform,
{
    /// Create a closed controller
    pub fn new(
        events: EventReceiver<'a, EVENTS>,
        config: ControllerConfig,
        renderer: R,
        settings: S,
        curve: C,
        platform: P,
    ) -> Self {
        Self {
            events,
            renderer,
            settings,
            curve,
            platform,
            config,
            optimizer: DynamicOptimizer::new(),
            state: ControllerState::Closed,
            screen: ScreenState::Off,
            orientation: Orientation::default(),
            awaiting_first_lux: false,
            last_lux: None,
            last_brightness: None,
            filter_brightness: None,
            samples: SampleBuffer::new(),
            scheduler: SmoothingScheduler::from_timings(&config.smoothing),
            capture: CaptureSchedule::new(),
        }
    }

    /// Open the controller if the settings ask for auto-start.
    ///
    /// Returns whether the controller is open afterwards.
    pub fn connect(&mut self) -> bool {
        if self.settings.auto_start() {
            self.open();
        }
        self.state.is_open()
    }

    /// Counterpart of [`connect`](Self::connect)
    pub fn disconnect(&mut self) {
        self.close();
    }

    /// Start a session.
    ///
    /// The initial mode follows the platform's automatic brightness switch.
    /// Nothing is armed until the first lux reading arrives.
    pub fn open(&mut self) {
        if self.state.is_open() {
            return;
        }

        let stale = self.events.retain(LightEvent::outlives_session);
        if stale > 0 {
            trace!("discarded {} events queued while closed", stale);
        }

        self.renderer.open();
        self.awaiting_first_lux = true;
        self.screen = ScreenState::from_on(self.platform.is_screen_on());
        self.platform.start_watchers();

        self.state = match Mode::from_auto_brightness(self.platform.auto_brightness()) {
            Mode::Manual => ControllerState::Manual,
            Mode::Auto => ControllerState::AutoIdle,
        };
        debug!("filter opened: {:?}, screen {:?}", self.state, self.screen);
    }

    /// End the session.
    ///
    /// Unregisters every source, drops queued session events and samples,
    /// and cancels every timer. Safe to call in any state, any number of
    /// times.
    pub fn close(&mut self) {
        if self.state.is_open() {
            self.platform.stop_watchers();
            self.renderer.close();
            debug!("filter closed");
        }

        self.events.retain(LightEvent::outlives_session);
        self.samples.clear();
        self.scheduler.disarm();
        self.capture.cancel();
        self.awaiting_first_lux = false;
        self.last_lux = None;
        self.last_brightness = None;
        self.filter_brightness = None;
        self.state = ControllerState::Closed;
    }

    /// Process pending events and due timers.
    ///
    /// This is the main loop step. The caller should poll again no later than
    /// the returned deadline, and whenever new events are queued.
    pub fn poll(&mut self, now: Instant) -> PollResult {
        while let Ok(event) = self.events.try_receive() {
            self.handle(event, now);
        }

        if self.scheduler.poll(now) {
            self.smoothing_tick(now);
        }

        while let Some(action) = self.capture.poll(now) {
            match action {
                CaptureAction::Shoot => {
                    if !self.platform.take_screenshot() {
                        warn!("screenshot failed");
                        self.platform.notify(Notice::CaptureFailed);
                    }
                }
                CaptureAction::Resume => self.renderer.resume(),
            }
        }

        let next_deadline = match (self.scheduler.next_deadline(), self.capture.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        PollResult {
            next_deadline,
            sleep_duration: next_deadline.map(|deadline| deadline.saturating_duration_since(now)),
        }
    }

    /// Handle a single event immediately
    pub fn handle(&mut self, event: LightEvent, now: Instant) {
        trace!("event: {:?}", event);
        match event {
            LightEvent::Lux(lux) => self.on_lux(lux, now),
            LightEvent::Brightness(brightness) => self.on_brightness(brightness),
            LightEvent::ModeChanged(mode) => self.on_mode_changed(mode, now),
            LightEvent::Screen(screen) => self.on_screen(screen),
            LightEvent::Orientation(orientation) => self.orientation = orientation,
            LightEvent::CapturePending => self.on_capture(now),
            LightEvent::Refresh => self.on_refresh(),
        }
    }

    fn on_lux(&mut self, lux: f32, now: Instant) {
        if !self.state.is_open() {
            return;
        }
        self.last_lux = Some(lux);
        if self.state == ControllerState::Manual {
            return;
        }

        if self.awaiting_first_lux {
            if !lux.is_finite() {
                self.report(LightError::NonFiniteLux);
                return;
            }
            self.awaiting_first_lux = false;
            self.update_by_lux(lux, false);
        } else if self.settings.smoothing_enabled() {
            if !lux.is_finite() {
                self.report(LightError::NonFiniteLux);
                return;
            }
            self.samples.record(LightSample::new(now, lux.max(0.0)));
            if self.scheduler.arm(now) {
                debug!("smoothing armed");
            }
            self.state = ControllerState::AutoSmoothing;
        } else {
            if self.scheduler.disarm() {
                debug!("smoothing disarmed");
            }
            self.state = ControllerState::AutoIdle;
            self.update_by_lux(lux, true);
        }
    }

    fn on_brightness(&mut self, brightness: u16) {
        if self.state != ControllerState::Manual {
            return;
        }
        self.last_brightness = Some(brightness);

        // Some devices report brightness on scales far above 255
        let mut max = self.settings.max_brightness();
        if brightness > max {
            debug!("max brightness recalibrated: {} -> {}", max, brightness);
            self.settings.set_max_brightness(brightness);
            max = brightness;
        }
        let ratio = if max == 0 {
            0.0
        } else {
            f32::from(brightness) / f32::from(max)
        };

        match self.curve.filter_config_by_ratio(ratio) {
            Some(config) => self.emit(config.with_smooth(false).clamped()),
            None => self.report(LightError::CurveLookup),
        }
    }

    fn on_mode_changed(&mut self, mode: Mode, now: Instant) {
        if !self.state.is_open() || self.state.mode() == Some(mode) {
            return;
        }

        match mode {
            Mode::Auto => {
                self.scheduler.arm(now);
                self.state = ControllerState::AutoSmoothing;
            }
            Mode::Manual => {
                self.scheduler.disarm();
                self.samples.clear();
                self.state = ControllerState::Manual;
            }
        }
        debug!("mode changed: {:?}", self.state);
        self.platform.notify(Notice::ModeChanged(mode));
    }

    fn on_screen(&mut self, screen: ScreenState) {
        self.screen = screen;
        if !screen.is_on() || !self.state.is_open() {
            return;
        }

        // The window is stale after an unknown time with the screen off
        if let Some(latest) = self.samples.latest() {
            self.samples.clear();
            self.update_by_lux(latest.lux, true);
        }
    }

    /// The overlay only hides while open, the screenshot is always taken.
    fn on_capture(&mut self, now: Instant) {
        let open = self.state.is_open();
        if open {
            self.renderer.pause();
        }
        self.capture.request(now, &self.config.capture, open);
    }

    fn on_refresh(&mut self) {
        match self.state {
            ControllerState::Closed => {}
            ControllerState::Manual => {
                if let Some(brightness) = self.last_brightness {
                    self.on_brightness(brightness);
                }
            }
            ControllerState::AutoIdle | ControllerState::AutoSmoothing => {
                if let Some(lux) = self.last_lux {
                    self.update_by_lux(lux, true);
                }
            }
        }
    }

    fn smoothing_tick(&mut self, now: Instant) {
        let Some(lux) = self
            .samples
            .window_average(now, self.config.smoothing.window)
        else {
            return;
        };
        trace!("smoothed lux: {}", lux);
        self.update_by_lux(lux, true);
    }

    fn update_by_lux(&mut self, lux: f32, smooth: bool) {
        match self.config_for_lux(lux, smooth) {
            Ok(config) => self.emit(config),
            Err(err) => self.report(err),
        }
    }

    /// Filter config for a raw lux reading, with orientation-specific offsets
    pub fn config_for_lux(&self, lux: f32, smooth: bool) -> Result<FilterConfig, LightError> {
        if !lux.is_finite() {
            return Err(LightError::NonFiniteLux);
        }
        let lux = lux.max(0.0);
        let optical_lux = self.optimizer.lux_optimization(lux);

        let mut static_offset = f32::from(self.settings.brightness_offset_percent()) / 100.0;
        let mut practical_offset = 0.0;
        match self.orientation {
            Orientation::Landscape => static_offset += self.config.landscape_offset,
            Orientation::Portrait => {
                practical_offset = self
                    .optimizer
                    .brightness_optimization(lux, self.curve.min_brightness());
            }
        }

        derive_config(
            &self.curve,
            optical_lux,
            static_offset,
            practical_offset,
            smooth,
        )
        .ok_or(LightError::CurveLookup)
    }

    fn emit(&mut self, config: FilterConfig) {
        if !self.screen.is_on() && self.settings.screen_off_pause() {
            trace!("screen off, update suppressed");
            return;
        }
        trace!("apply {:?}", config);
        self.filter_brightness = Some(config.brightness);
        self.renderer.apply(config);
    }

    fn report(&mut self, err: LightError) {
        warn!("filter update failed: {}", err);
        self.platform.notify(Notice::UpdateFailed(err));
    }

    pub const fn state(&self) -> ControllerState {
        self.state
    }

    pub const fn screen(&self) -> ScreenState {
        self.screen
    }

    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Screen brightness of the last applied config, `None` when unset
    pub const fn filter_brightness(&self) -> Option<u16> {
        self.filter_brightness
    }

    pub const fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub const fn scheduler(&self) -> &SmoothingScheduler {
        &self.scheduler
    }

    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub const fn curve(&self) -> &C {
        &self.curve
    }

    pub fn curve_mut(&mut self) -> &mut C {
        &mut self.curve
    }

    pub const fn settings(&self) -> &S {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    pub const fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}
