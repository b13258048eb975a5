mod tests {
    use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

    use myrtio_segment_fx::segment::{ExternalData, INACTIVE_SEGMENT, SPEED_MIN};
    use myrtio_segment_fx::{
        Color, Duration, FrameBuffer, FrameScheduler, Instant, LightEngine, LightEngineConfig,
        ModeContext, ModeId, OutputDriver, PixelBuffer, Segment, TriggerSignal,
    };

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        brightness: u8,
    }

    impl OutputDriver for Recorder {
        fn write(&mut self, _pixels: &[Color], brightness: u8) {
            self.frames += 1;
            self.brightness = brightness;
        }
    }

    type TestEngine = LightEngine<FrameBuffer<20>, Recorder>;

    fn engine(len: usize) -> TestEngine {
        let config = LightEngineConfig {
            settle: Duration::from_millis(0),
            ..LightEngineConfig::default()
        };
        LightEngine::new(FrameBuffer::with_len(len), Recorder::default(), &config)
    }

    fn engine_with_mode(len: usize, mode: ModeId) -> TestEngine {
        let mut engine = engine(len);
        engine.set_mode(0, mode);
        engine.set_colors(0, [Color::RED, Color::BLUE, Color::BLACK]);
        engine.start();
        engine
    }

    /// Service far enough apart that every segment is due
    fn tick(engine: &mut TestEngine, n: u64) -> bool {
        engine.service(Instant::from_millis(n * 100_000))
    }

    fn pixels(engine: &TestEngine) -> &[Color] {
        engine.buffer().pixels()
    }

    #[test]
    fn test_new_engine_spans_buffer() {
        let engine = engine(12);
        assert_eq!(engine.segment_count(), 1);
        assert_eq!(engine.segment(0).map(|s| (s.start, s.stop)), Some((0, 11)));
        assert!(engine.is_active(0));
        assert!(!engine.is_running());
        assert_eq!(engine.brightness(), 50);
    }

    #[test]
    fn test_stopped_engine_does_nothing() {
        let mut engine = engine(10);
        assert!(!tick(&mut engine, 1));
        assert_eq!(engine.driver_mut().frames, 0);
    }

    #[test]
    fn test_color_wipe_cycle() {
        let mut engine = engine_with_mode(10, ModeId::ColorWipe);
        for n in 1..=10 {
            assert!(tick(&mut engine, n));
            assert_eq!(pixels(&engine)[n as usize - 1], Color::RED);
        }
        assert_eq!(pixels(&engine), [Color::RED; 10]);

        for n in 11..=19 {
            tick(&mut engine, n);
            assert!(!engine.is_cycle(0));
        }
        tick(&mut engine, 20);
        assert_eq!(pixels(&engine), [Color::BLUE; 10]);
        assert!(engine.is_cycle(0));
        assert_eq!(engine.runtime(0).map(|r| r.step), Some(0));
    }

    #[test]
    fn test_strobe_timing() {
        let mut engine = engine_with_mode(10, ModeId::Strobe);

        engine.service(Instant::from_millis(1_000));
        assert_eq!(pixels(&engine), [Color::RED; 10]);
        assert_eq!(engine.runtime(0).map(|r| r.next_due_time), Some(1_020));

        engine.service(Instant::from_millis(1_020));
        assert_eq!(pixels(&engine), [Color::BLUE; 10]);
        assert_eq!(engine.runtime(0).map(|r| r.next_due_time), Some(1_020 + 980));
        assert!(engine.is_cycle(0));
    }

    #[test]
    fn test_twinkle_budget() {
        let mut engine = engine_with_mode(20, ModeId::Twinkle);
        tick(&mut engine, 1);
        assert_eq!(pixels(&engine), [Color::BLUE; 20]);

        let budget = engine.runtime(0).map_or(0, |r| r.step);
        assert!((5..10).contains(&budget), "budget {budget}");
        for n in 0..u64::from(budget) - 1 {
            tick(&mut engine, n + 2);
            assert!(!engine.is_cycle(0));
        }
        tick(&mut engine, u64::from(budget) + 1);
        assert!(engine.is_cycle(0));
        assert_eq!(engine.runtime(0).map(|r| r.step), Some(0));
    }

    #[test]
    fn test_due_time_follows_delay() {
        let mut engine = engine_with_mode(10, ModeId::Static);
        engine.set_speed(0, 0);
        assert_eq!(engine.speed(0), Some(SPEED_MIN));

        engine.service(Instant::from_millis(500));
        assert_eq!(engine.runtime(0).map(|r| r.next_due_time), Some(502));
        assert!(!engine.service(Instant::from_millis(501)));
        assert!(!engine.is_frame(0));
        assert!(engine.service(Instant::from_millis(502)));
        assert!(engine.is_frame(0));
        assert_eq!(engine.runtime(0).map(|r| r.call_count), Some(2));
    }

    #[test]
    fn test_segments_render_in_their_ranges() {
        let mut engine = engine(10);
        engine.set_segment(0, Segment::new(0, 4).with_color(Color::RED));
        engine.set_segment(1, Segment::new(5, 9).with_color(Color::GREEN));
        engine.start();
        tick(&mut engine, 1);
        assert_eq!(&pixels(&engine)[..5], [Color::RED; 5]);
        assert_eq!(&pixels(&engine)[5..], [Color::GREEN; 5]);
        assert_eq!(engine.driver_mut().frames, 1);
    }

    #[test]
    fn test_segment_stop_is_clamped() {
        let mut engine = engine(10);
        engine.set_segment(2, Segment::new(8, 40));
        assert_eq!(engine.segment(2).map(|s| s.stop), Some(9));
        assert_eq!(engine.segment_count(), 3);
        engine.set_segment(30, Segment::new(0, 1));
        assert_eq!(engine.segment_count(), 3);
    }

    #[test]
    fn test_activate_deactivate_swap() {
        let mut engine = engine(10);
        assert_eq!(engine.active_slots()[0], 0);
        let runtime = engine.runtime(0).cloned();
        assert_eq!(runtime.map(|r| (r.step, r.call_count, r.aux3)), Some((0, 0, 0)));

        engine.remove_active_segment(0);
        assert_eq!(engine.active_slots()[0], INACTIVE_SEGMENT);
        assert!(!engine.is_active(0));
        assert!(engine.segment(0).is_some());

        engine.add_active_segment(0);
        engine.set_idle_segment(1, Segment::new(0, 9).with_color(Color::BLUE));
        assert!(!engine.is_active(1));
        engine.swap_active_segment(0, 1);
        assert_eq!(engine.active_segments().as_slice(), [1]);
        engine.swap_active_segment(1, 1);
        assert_eq!(engine.active_segments().as_slice(), [1]);
    }

    #[test]
    fn test_trigger_forces_frame() {
        let mut engine = engine_with_mode(10, ModeId::Static);
        assert!(engine.service(Instant::from_millis(0)));
        assert!(!engine.service(Instant::from_millis(10)));

        engine.trigger();
        assert!(engine.service(Instant::from_millis(20)));
        assert_eq!(engine.runtime(0).map(|r| r.next_due_time), Some(1_020));
        assert!(!engine.is_triggered());
        assert!(!engine.service(Instant::from_millis(30)));
    }

    #[test]
    fn test_pause_keeps_trigger() {
        let mut engine = engine_with_mode(10, ModeId::Static);
        engine.service(Instant::from_millis(0));
        engine.pause();
        engine.trigger();
        assert!(!engine.service(Instant::from_millis(10)));
        assert!(engine.is_triggered());

        engine.resume();
        assert!(engine.service(Instant::from_millis(10)));
    }

    #[test]
    fn test_trigger_signal() {
        static SIGNAL: TriggerSignal = TriggerSignal::new();
        let mut engine = engine_with_mode(10, ModeId::Static);
        engine.attach_trigger(&SIGNAL);
        engine.service(Instant::from_millis(0));

        SIGNAL.raise();
        assert!(SIGNAL.is_raised());
        assert!(engine.service(Instant::from_millis(5)));
        assert!(!SIGNAL.is_raised());
    }

    #[test]
    fn test_stop_blanks_strip() {
        let mut engine = engine_with_mode(10, ModeId::Static);
        tick(&mut engine, 1);
        engine.stop();
        assert!(!engine.is_running());
        assert_eq!(pixels(&engine), [Color::BLACK; 10]);
        assert_eq!(engine.driver_mut().frames, 2);
    }

    #[test]
    fn test_brightness_and_intensity() {
        let mut engine = engine(10);
        engine.set_color(0, Color::WHITE);
        engine.start();
        tick(&mut engine, 1);
        assert_eq!(engine.intensity_sum(), 10 * 3 * 50);

        engine.set_brightness(255);
        assert_eq!(engine.driver_mut().brightness, 255);
        assert_eq!(engine.intensity_sum(), 10 * 3 * 255);
        engine.increase_brightness(10);
        assert_eq!(engine.brightness(), 255);
        engine.decrease_brightness(55);
        assert_eq!(engine.brightness(), 200);
    }

    #[test]
    fn test_set_length() {
        let mut engine = engine(20);
        engine.set_length(10);
        assert_eq!(engine.length(), 10);
        assert_eq!(engine.segment(0).map(|s| s.stop), Some(9));

        engine.increase_length(100);
        assert_eq!(engine.length(), 20);
        engine.decrease_length(25);
        assert_eq!(engine.length(), 1);
    }

    fn solid_green(ctx: &mut ModeContext<'_, 8>) -> u16 {
        ctx.fill_segment(Color::GREEN);
        ctx.set_cycle();
        500
    }

    #[test]
    fn test_custom_mode() {
        let mut engine = engine(10);
        let mode = engine.set_custom_mode(0, "Green", solid_green);
        assert_eq!(mode, Some(ModeId::Custom0));
        assert_eq!(engine.set_custom_mode(8, "Nope", solid_green), None);

        engine.set_mode(0, ModeId::Custom0);
        engine.start();
        engine.service(Instant::from_millis(0));
        assert_eq!(pixels(&engine), [Color::GREEN; 10]);
        assert_eq!(engine.runtime(0).map(|r| r.next_due_time), Some(500));
        assert!(engine.is_cycle(0));

        assert_eq!(engine.mode_name(72), "Green");
        assert_eq!(engine.mode_name(73), "Custom 1");
        assert_eq!(engine.mode_name(3), "Color Wipe");
        assert_eq!(engine.mode_name(80), "");
    }

    #[test]
    fn test_set_mode_raw_clamps() {
        let mut engine = engine(10);
        engine.set_mode_raw(0, 250);
        assert_eq!(engine.mode(0), Some(ModeId::Custom7));
    }

    #[test]
    fn test_custom_show() {
        static SHOWN: AtomicUsize = AtomicUsize::new(0);
        fn count(_pixels: &[Color], _brightness: u8) {
            SHOWN.fetch_add(1, Ordering::Relaxed);
        }

        let mut engine = engine_with_mode(10, ModeId::Static);
        engine.set_custom_show(Some(count));
        tick(&mut engine, 1);
        assert_eq!(SHOWN.load(Ordering::Relaxed), 1);
        assert_eq!(engine.driver_mut().frames, 0);
    }

    #[test]
    fn test_vu_meter_external_levels() {
        static LEVELS: [AtomicU8; 2] = [AtomicU8::new(255), AtomicU8::new(0)];
        let mut engine = engine(10);
        engine.set_mode(0, ModeId::VuMeter);
        assert!(engine.set_external_data(0, Some(ExternalData::new(&LEVELS))));
        assert!(!engine.set_external_data(5, None));
        engine.start();
        tick(&mut engine, 1);

        let expected = [
            Color::GREEN,
            Color::GREEN,
            Color::GREEN,
            Color::YELLOW,
            Color::YELLOW,
            Color::BLACK,
            Color::BLACK,
            Color::BLACK,
            Color::BLACK,
            Color::BLACK,
        ];
        assert_eq!(pixels(&engine), expected);
    }

    #[test]
    fn test_every_mode_stays_in_segment() {
        for mode in ModeId::ALL {
            let mut engine = engine(20);
            engine.set_segment(0, Segment::new(5, 14).with_mode(mode).with_color(Color::WHITE));
            engine.start();
            for n in 1..=40 {
                tick(&mut engine, n);
            }
            let outside = pixels(&engine)[..5].iter().chain(&pixels(&engine)[15..]);
            assert!(
                outside.copied().all(Color::is_black),
                "{} wrote outside its segment",
                mode.as_str()
            );
        }
    }

    #[test]
    fn test_random_seed_reproduces_frames() {
        let run = || {
            let mut engine = engine_with_mode(20, ModeId::Fireworks);
            engine.set_random_seed(99);
            for n in 1..=30 {
                tick(&mut engine, n);
            }
            pixels(&engine).to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_scheduler_sleep() {
        let mut scheduler = FrameScheduler::new(engine(10));
        let result = scheduler.tick(Instant::from_millis(0));
        assert!(!result.rendered);
        assert_eq!(result.sleep_duration, Duration::from_millis(50));

        scheduler.engine_mut().start();
        let result = scheduler.tick(Instant::from_millis(100));
        assert!(result.rendered);
        assert_eq!(result.sleep_duration, Duration::from_millis(1_000));
        assert_eq!(result.next_deadline, Instant::from_millis(1_100));

        let result = scheduler.tick(Instant::from_millis(600));
        assert!(!result.rendered);
        assert_eq!(result.sleep_duration, Duration::from_millis(500));
    }

    #[test]
    fn test_reconfigure_running_segment_restarts_animation() {
        let mut engine = engine_with_mode(10, ModeId::Rainbow);
        for n in 1..=200 {
            tick(&mut engine, n);
        }
        assert_eq!(engine.runtime(0).map(|r| (r.step, r.call_count)), Some((200, 200)));

        engine.set_segment(0, Segment::new(0, 9).with_mode(ModeId::LarsonScanner));
        assert_eq!(engine.runtime(0).map(|r| (r.step, r.call_count)), Some((0, 0)));
        assert_eq!(engine.active_slots()[0], 0);
        for n in 201..=240 {
            tick(&mut engine, n);
        }
    }

    #[test]
    fn test_shrinking_running_segment_restarts_animation() {
        let mut engine = engine_with_mode(20, ModeId::ColorWipeReverse);
        for n in 1..=30 {
            tick(&mut engine, n);
        }
        assert_eq!(engine.runtime(0).map(|r| r.step), Some(30));

        engine.set_segment(0, Segment::new(0, 4).with_mode(ModeId::ColorWipeReverse));
        assert_eq!(engine.runtime(0).map(|r| r.step), Some(0));
        for n in 31..=50 {
            tick(&mut engine, n);
        }
    }

    #[test]
    fn test_set_length_clips_other_segments() {
        let mut engine = engine(20);
        engine.set_segment(0, Segment::new(0, 9));
        engine.set_segment(
            1,
            Segment::new(10, 19)
                .with_mode(ModeId::RunningColor)
                .with_colors([Color::RED, Color::BLUE, Color::BLACK]),
        );
        engine.set_length(15);
        assert_eq!(engine.segment(0).map(|s| s.stop), Some(14));
        assert_eq!(engine.segment(1).map(|s| (s.start, s.stop)), Some((10, 14)));

        engine.remove_active_segment(0);
        engine.start();
        tick(&mut engine, 1);
        tick(&mut engine, 2);
        assert_eq!(&pixels(&engine)[10..12], [Color::BLUE; 2]);
    }

    #[test]
    fn test_external_data_survives_runtime_reset() {
        static LEVELS: [AtomicU8; 1] = [AtomicU8::new(128)];
        let mut engine = engine_with_mode(10, ModeId::VuMeter);
        assert!(engine.set_external_data(0, Some(ExternalData::new(&LEVELS))));
        tick(&mut engine, 1);

        engine.reset_segment_runtime(0);
        assert!(engine.runtime(0).is_some_and(|r| r.external_data().is_some()));
        assert_eq!(engine.runtime(0).map(|r| r.call_count), Some(0));
        engine.start();
        assert!(engine.runtime(0).is_some_and(|r| r.external_data().is_some()));
    }

    #[test]
    fn test_swap_keeps_due_time() {
        let mut engine = engine_with_mode(10, ModeId::Static);
        engine.service(Instant::from_millis(1_000));
        engine.set_idle_segment(1, Segment::new(0, 9).with_color(Color::BLUE));
        let before = engine.runtime(0).map(|r| r.next_due_time);
        assert_eq!(before, Some(2_000));

        engine.swap_active_segment(0, 1);
        let after = engine.runtime(1).cloned();
        assert_eq!(after.map(|r| (r.next_due_time, r.call_count)), Some((2_000, 0)));
        assert!(!engine.service(Instant::from_millis(1_500)));
        assert!(engine.service(Instant::from_millis(2_000)));
        assert_eq!(pixels(&engine), [Color::BLUE; 10]);
    }

    #[test]
    fn test_mode_count() {
        assert_eq!(TestEngine::MODE_COUNT, 80);
    }
}
