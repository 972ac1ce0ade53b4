//! Non-linear lux and brightness corrections

/// Lux values saturate towards this level.
pub const LUX_CEILING: f32 = 5_000.0;

/// Lux level at which the brightness floor correction is halved.
const DARK_KNEE_LUX: f32 = 20.0;

/// Largest brightness fraction the floor correction may remove.
const FLOOR_GAIN: f32 = 0.5;

/// Full scale of the panel brightness reported by the curve table.
const BRIGHTNESS_SCALE: f32 = 255.0;

/// Pure lux/brightness corrections applied before the curve lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicOptimizer {
    lux_ceiling: f32,
    dark_knee: f32,
    floor_gain: f32,
}

impl DynamicOptimizer {
    pub const fn new() -> Self {
        Self {
            lux_ceiling: LUX_CEILING,
            dark_knee: DARK_KNEE_LUX,
            floor_gain: FLOOR_GAIN,
        }
    }

    /// Compress `lux` so very bright scenes saturate instead of growing
    /// without bound.
    ///
    /// Close to identity for dim light, monotonic and bounded by the ceiling.
    /// Negative and NaN input map to `0.0`.
    pub fn lux_optimization(&self, lux: f32) -> f32 {
        if lux.is_nan() || lux <= 0.0 {
            return 0.0;
        }
        let compressed = -self.lux_ceiling * libm::expm1f(-lux / self.lux_ceiling);
        compressed.clamp(0.0, self.lux_ceiling)
    }

    /// Extra brightness offset for panels with a high minimum brightness.
    ///
    /// In the dark such a panel cannot dim further, so the overlay has to
    /// take over earlier. Returns a non-positive brightness fraction that
    /// fades out as the environment gets brighter.
    pub fn brightness_optimization(&self, lux: f32, min_brightness: u16) -> f32 {
        let lux = if lux.is_nan() { 0.0 } else { lux.max(0.0) };
        let floor = f32::from(min_brightness).min(BRIGHTNESS_SCALE) / BRIGHTNESS_SCALE;
        let darkness = self.dark_knee / (self.dark_knee + lux);

        -(floor * darkness * self.floor_gain)
    }
}

impl Default for DynamicOptimizer {
    fn default() -> Self {
        Self::new()
    }
}
