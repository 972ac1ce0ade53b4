#![no_std]

pub mod capture;
pub mod channel;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod filter;
pub mod platform;
pub mod sample_buffer;
pub mod smoothing_scheduler;

pub use config::{CaptureTimings, ControllerConfig, SmoothingTimings};
pub use controller::{ControllerState, LightController, PollResult};
pub use error::LightError;
pub use event::{
    EventChannel, EventReceiver, EventSender, LightEvent, Mode, Orientation, ScreenState,
};
pub use filter::{ALPHA_MAX, BrightnessCurve, DynamicOptimizer, FilterConfig, derive_config};
pub use platform::{Notice, OverlayRenderer, Platform, SettingsStore};
pub use sample_buffer::{LightSample, SAMPLE_CAPACITY, SampleBuffer};
pub use smoothing_scheduler::SmoothingScheduler;

pub use embassy_time::{Duration, Instant};
