//! Filter derivation
//!
//! Maps an ambient light level onto an overlay configuration. The base
//! values come from a device-specific [`BrightnessCurve`]; offsets are then
//! applied and the result is clamped into the safe alpha range.

mod optimizer;

pub use optimizer::{DynamicOptimizer, LUX_CEILING};

/// Upper bound of the overlay alpha.
///
/// The overlay never becomes fully opaque so the screen stays readable.
pub const ALPHA_MAX: u16 = 245;

/// Overlay configuration handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterConfig {
    /// Overlay opacity (0..=`ALPHA_MAX`)
    pub alpha: u16,
    /// Screen brightness the renderer should apply with the overlay
    pub brightness: u16,
    /// Whether the renderer should animate towards this config
    pub smooth: bool,
}

impl FilterConfig {
    pub const fn new(alpha: u16, brightness: u16) -> Self {
        Self {
            alpha,
            brightness,
            smooth: false,
        }
    }

    /// Copy of this config with the given animation flag
    #[must_use]
    pub const fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    /// Copy of this config with alpha forced into `0..=ALPHA_MAX`
    #[must_use]
    pub const fn clamped(mut self) -> Self {
        if self.alpha > ALPHA_MAX {
            self.alpha = ALPHA_MAX;
        }
        self
    }
}

/// Device-specific lookup table of base filter configs.
///
/// Lookups return `None` when the table cannot answer (e.g. not yet
/// populated); the caller reports that as a transient failure.
pub trait BrightnessCurve {
    /// Base config for an (already optimized) lux value
    fn filter_config(&self, lux: f32) -> Option<FilterConfig>;

    /// Base config for a system brightness ratio in `0.0..=1.0`
    fn filter_config_by_ratio(&self, ratio: f32) -> Option<FilterConfig>;

    /// Lowest brightness the panel can physically reach (0-255 scale)
    fn min_brightness(&self) -> u16;
}

/// Derive the final config for `optical_lux`.
///
/// Offsets are brightness fractions: a positive offset brightens the screen,
/// which means less overlay. The resulting alpha is always within
/// `0..=ALPHA_MAX`, whatever the offsets are. `smooth` is passed through.
pub fn derive_config<C: BrightnessCurve + ?Sized>(
    curve: &C,
    optical_lux: f32,
    static_offset: f32,
    practical_offset: f32,
    smooth: bool,
) -> Option<FilterConfig> {
    let base = curve.filter_config(optical_lux)?;
    let alpha = offset_alpha(base.alpha, static_offset + practical_offset);

    Some(FilterConfig {
        alpha,
        brightness: base.brightness,
        smooth,
    })
}

/// Shift `alpha` by `offset` brightness fractions and clamp it.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn offset_alpha(alpha: u16, offset: f32) -> u16 {
    let max = f32::from(ALPHA_MAX);
    let base = f32::from(alpha.min(ALPHA_MAX));
    if offset.is_nan() {
        return base as u16;
    }

    let shifted = libm::roundf(base - offset * max);
    shifted.clamp(0.0, max) as u16
}
