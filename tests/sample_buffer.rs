mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_ambient_filter::{LightSample, SAMPLE_CAPACITY, SampleBuffer};
    use proptest::prelude::*;

    const WINDOW: Duration = Duration::from_millis(11_000);

    fn sample(ms: u64, lux: f32) -> LightSample {
        LightSample::new(Instant::from_millis(ms), lux)
    }

    #[test]
    fn test_window_average_of_recent_samples() {
        let mut buffer = SampleBuffer::new();
        buffer.record(sample(0, 100.0));
        buffer.record(sample(5_000, 10.0));
        buffer.record(sample(6_000, 20.0));

        // The first sample is exactly one window old and is excluded
        let average = buffer.window_average(Instant::from_millis(11_000), WINDOW);
        assert_eq!(average, Some(15.0));
    }

    #[test]
    fn test_window_average_falls_back_to_latest() {
        let mut buffer = SampleBuffer::new();
        buffer.record(sample(0, 7.0));
        buffer.record(sample(1_000, 9.0));

        let average = buffer.window_average(Instant::from_millis(60_000), WINDOW);
        assert_eq!(average, Some(9.0));
    }

    #[test]
    fn test_window_average_empty() {
        let buffer = SampleBuffer::new();
        assert_eq!(buffer.window_average(Instant::from_millis(0), WINDOW), None);
        assert_eq!(buffer.latest(), None);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut buffer = SampleBuffer::new();
        for i in 0..=SAMPLE_CAPACITY as u64 {
            buffer.record(sample(i, i as f32));
        }

        assert_eq!(buffer.len(), SAMPLE_CAPACITY);
        assert_eq!(buffer.iter().next().map(|s| s.lux), Some(1.0));
        assert_eq!(buffer.latest().map(|s| s.lux), Some(SAMPLE_CAPACITY as f32));
    }

    #[test]
    fn test_out_of_order_timestamp_is_raised() {
        let mut buffer = SampleBuffer::new();
        buffer.record(sample(1_000, 1.0));
        buffer.record(sample(500, 2.0));

        let latest = buffer.latest().unwrap();
        assert_eq!(latest.timestamp, Instant::from_millis(1_000));
        assert_eq!(latest.lux, 2.0);
    }

    #[test]
    fn test_clear() {
        let mut buffer = SampleBuffer::new();
        buffer.record(sample(0, 1.0));
        buffer.clear();
        assert!(buffer.is_empty());
    }

    proptest! {
        #[test]
        fn prop_size_never_exceeds_capacity(count in 0usize..400) {
            let mut buffer = SampleBuffer::new();
            for i in 0..count {
                buffer.record(sample(i as u64, 1.0));
                prop_assert!(buffer.len() <= SAMPLE_CAPACITY);
            }
            prop_assert_eq!(buffer.len(), count.min(SAMPLE_CAPACITY));
        }

        #[test]
        fn prop_average_within_considered_range(
            steps in prop::collection::vec((0u64..3_000, 0.0f32..100_000.0), 1..250),
            probe_delay in 0u64..30_000,
        ) {
            let mut buffer = SampleBuffer::new();
            let mut time = 0;
            for (step, lux) in &steps {
                time += step;
                buffer.record(sample(time, *lux));
            }
            let now = Instant::from_millis(time + probe_delay);

            let considered: Vec<f32> = buffer
                .iter()
                .filter(|s| now.duration_since(s.timestamp) < WINDOW)
                .map(|s| s.lux)
                .collect();
            let average = buffer.window_average(now, WINDOW).unwrap();

            if considered.is_empty() {
                prop_assert_eq!(average, buffer.latest().unwrap().lux);
            } else {
                let min = considered.iter().copied().fold(f32::INFINITY, f32::min);
                let max = considered.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                prop_assert!(average >= min && average <= max);
            }
        }
    }
}
