mod tests {
    use myrtio_ambient_filter::filter::{LUX_CEILING, offset_alpha};
    use myrtio_ambient_filter::{
        ALPHA_MAX, BrightnessCurve, DynamicOptimizer, FilterConfig, derive_config,
    };
    use proptest::prelude::*;

    struct FixedCurve(u16);

    impl BrightnessCurve for FixedCurve {
        fn filter_config(&self, _lux: f32) -> Option<FilterConfig> {
            Some(FilterConfig::new(self.0, 120))
        }

        fn filter_config_by_ratio(&self, _ratio: f32) -> Option<FilterConfig> {
            Some(FilterConfig::new(self.0, 120))
        }

        fn min_brightness(&self) -> u16 {
            0
        }
    }

    struct EmptyCurve;

    impl BrightnessCurve for EmptyCurve {
        fn filter_config(&self, _lux: f32) -> Option<FilterConfig> {
            None
        }

        fn filter_config_by_ratio(&self, _ratio: f32) -> Option<FilterConfig> {
            None
        }

        fn min_brightness(&self) -> u16 {
            0
        }
    }

    #[test]
    fn test_derive_config_applies_offsets() {
        let curve = FixedCurve(100);
        let config = derive_config(&curve, 50.0, 0.2, 0.0, true).unwrap();
        assert_eq!(config.alpha, 51);
        assert_eq!(config.brightness, 120);
        assert!(config.smooth);

        let config = derive_config(&curve, 50.0, 0.0, -0.2, false).unwrap();
        assert_eq!(config.alpha, 149);
        assert!(!config.smooth);
    }

    #[test]
    fn test_derive_config_clamps() {
        let curve = FixedCurve(100);
        assert_eq!(derive_config(&curve, 0.0, 5.0, 0.0, false).unwrap().alpha, 0);
        assert_eq!(
            derive_config(&curve, 0.0, -5.0, 0.0, false).unwrap().alpha,
            ALPHA_MAX
        );

        let curve = FixedCurve(u16::MAX);
        assert_eq!(
            derive_config(&curve, 0.0, 0.0, 0.0, false).unwrap().alpha,
            ALPHA_MAX
        );
    }

    #[test]
    fn test_derive_config_lookup_failure() {
        assert_eq!(derive_config(&EmptyCurve, 10.0, 0.0, 0.0, true), None);
    }

    #[test]
    fn test_offset_alpha_non_finite() {
        assert_eq!(offset_alpha(100, f32::NAN), 100);
        assert_eq!(offset_alpha(100, f32::INFINITY), 0);
        assert_eq!(offset_alpha(100, f32::NEG_INFINITY), ALPHA_MAX);
    }

    #[test]
    fn test_filter_config_clamped() {
        let config = FilterConfig::new(1_000, 10).clamped();
        assert_eq!(config.alpha, ALPHA_MAX);
        assert_eq!(FilterConfig::new(3, 10).clamped().alpha, 3);
    }

    #[test]
    fn test_lux_optimization() {
        let optimizer = DynamicOptimizer::new();
        assert_eq!(optimizer.lux_optimization(-5.0), 0.0);
        assert_eq!(optimizer.lux_optimization(f32::NAN), 0.0);
        assert!((optimizer.lux_optimization(10.0) - 10.0).abs() < 0.05);
        assert!(optimizer.lux_optimization(100_000.0) <= LUX_CEILING);
        assert_eq!(optimizer.lux_optimization(f32::INFINITY), LUX_CEILING);
    }

    #[test]
    fn test_brightness_optimization() {
        let optimizer = DynamicOptimizer::new();
        assert_eq!(optimizer.brightness_optimization(0.0, 0), 0.0);

        let dark = optimizer.brightness_optimization(0.0, 255);
        let dim = optimizer.brightness_optimization(20.0, 255);
        let bright = optimizer.brightness_optimization(10_000.0, 255);
        assert!((dark + 0.5).abs() < f32::EPSILON);
        assert!((dim + 0.25).abs() < f32::EPSILON);
        assert!(bright > dim && bright <= 0.0);

        let low_floor = optimizer.brightness_optimization(0.0, 51);
        assert!(low_floor > dark);
    }

    proptest! {
        #[test]
        fn prop_alpha_always_in_range(
            base in 0u16..=u16::MAX,
            static_offset in -1_000.0f32..1_000.0,
            practical_offset in -1_000.0f32..1_000.0,
        ) {
            let config = derive_config(&FixedCurve(base), 0.0, static_offset, practical_offset, true)
                .unwrap();
            prop_assert!(config.alpha <= ALPHA_MAX);
        }

        #[test]
        fn prop_lux_optimization_monotonic_and_bounded(a in 0.0f32..200_000.0, b in 0.0f32..200_000.0) {
            let optimizer = DynamicOptimizer::new();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low = optimizer.lux_optimization(low);
            let high = optimizer.lux_optimization(high);
            prop_assert!(low <= high);
            prop_assert!((0.0..=LUX_CEILING).contains(&high));
        }
    }
}
