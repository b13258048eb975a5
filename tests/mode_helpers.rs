mod tests {
    use myrtio_segment_fx::gamma::gamma8;
    use myrtio_segment_fx::{
        BlockSize, Color, FadeRate, FrameBuffer, ModeContext, PixelBuffer, Random8, Runtime,
        Segment, SegmentOptions,
    };

    const RATES: [FadeRate; 8] = [
        FadeRate::Legacy,
        FadeRate::ExtraFast,
        FadeRate::Fast,
        FadeRate::Medium,
        FadeRate::Slow,
        FadeRate::ExtraSlow,
        FadeRate::ExtraExtraSlow,
        FadeRate::Glacial,
    ];

    /// One segment driven frame by frame the way the engine does it
    struct Fixture {
        segment: Segment,
        runtime: Runtime<4>,
        buffer: FrameBuffer<32>,
        random: Random8,
    }

    impl Fixture {
        fn new(len: u16, options: SegmentOptions) -> Self {
            Self {
                segment: Segment::new(0, len - 1).with_options(options),
                runtime: Runtime::new(),
                buffer: FrameBuffer::with_len(usize::from(len)),
                random: Random8::default(),
            }
        }

        fn frame(&mut self, mode: impl FnOnce(&mut ModeContext<'_, 4>) -> u16) -> u16 {
            self.runtime.clear_frame_cycle();
            let mut ctx = ModeContext::new(
                &self.segment,
                &mut self.runtime,
                &mut self.buffer,
                &mut self.random,
                gamma8,
                false,
            );
            let delay = mode(&mut ctx);
            self.runtime.call_count += 1;
            delay
        }

        fn pixels(&self) -> &[Color] {
            self.buffer.pixels()
        }

        fn positions(&self, color: Color) -> Vec<usize> {
            (0..self.pixels().len())
                .filter(|&i| self.pixels()[i] == color)
                .collect()
        }
    }

    fn sized(size: BlockSize) -> SegmentOptions {
        SegmentOptions::new().with_size(size)
    }

    /// Fade calls needed to reach `target`, checking every step moves toward it
    fn fade_calls(rate: FadeRate, from: Color, target: Color) -> usize {
        let mut fixture = Fixture::new(4, SegmentOptions::new().with_fade_rate(rate));
        fixture.frame(|ctx| {
            ctx.fill_segment(from);
            0
        });
        let mut calls = 0;
        while fixture.pixels()[0] != target {
            let before = fixture.pixels()[0];
            fixture.frame(|ctx| {
                ctx.fade_out_to(target);
                0
            });
            let after = fixture.pixels()[0];
            for (b, a, t) in [
                (before.r(), after.r(), target.r()),
                (before.g(), after.g(), target.g()),
                (before.b(), after.b(), target.b()),
            ] {
                assert!(a.abs_diff(t) <= b.abs_diff(t), "{rate:?} moved away from target");
            }
            calls += 1;
            assert!(calls < 256, "{rate:?} did not converge");
        }
        assert!(fixture.pixels().iter().all(|&pixel| pixel == target));
        calls
    }

    #[test]
    fn test_legacy_fade_halves_to_black() {
        assert_eq!(fade_calls(FadeRate::Legacy, Color::WHITE, Color::BLACK), 8);
    }

    #[test]
    fn test_fade_rates_converge_down() {
        for rate in RATES {
            fade_calls(rate, Color::WHITE, Color::BLACK);
        }
    }

    #[test]
    fn test_fade_rates_converge_up() {
        for rate in &RATES[1..] {
            fade_calls(*rate, Color::BLACK, Color::new(200, 100, 50));
            fade_calls(*rate, Color::new(10, 250, 3), Color::new(200, 100, 50));
        }
    }

    #[test]
    fn test_slower_rates_take_longer() {
        let fast = fade_calls(FadeRate::ExtraFast, Color::WHITE, Color::BLACK);
        let glacial = fade_calls(FadeRate::Glacial, Color::WHITE, Color::BLACK);
        assert!(fast < glacial);
    }

    #[test]
    fn test_scan_bounces() {
        let mut fixture = Fixture::new(6, SegmentOptions::new());
        let mut path = Vec::new();
        let mut cycles = Vec::new();
        for call in 1..=11 {
            fixture.frame(|ctx| ctx.scan(Color::RED, Color::BLUE, false));
            let lit = fixture.positions(Color::RED);
            assert_eq!(lit.len(), 1);
            assert_eq!(fixture.positions(Color::BLUE).len(), 5);
            path.push(lit[0]);
            if fixture.runtime.is_cycle() {
                cycles.push(call);
            }
        }
        assert_eq!(path, [0, 1, 2, 3, 4, 5, 4, 3, 2, 1, 0]);
        assert_eq!(cycles, [10]);
    }

    #[test]
    fn test_dual_scan_mirrors() {
        let mut fixture = Fixture::new(6, SegmentOptions::new());
        fixture.frame(|ctx| ctx.scan(Color::RED, Color::BLUE, true));
        assert_eq!(fixture.positions(Color::RED), [0, 5]);
        fixture.frame(|ctx| ctx.scan(Color::RED, Color::BLUE, true));
        assert_eq!(fixture.positions(Color::RED), [1, 4]);
    }

    #[test]
    fn test_chase_cycle_point() {
        for (len, size) in [(9, BlockSize::Small), (12, BlockSize::Medium)] {
            let mut fixture = Fixture::new(len, sized(size));
            let block = usize::from(size.pixels());
            let mut cycles = Vec::new();
            for call in 1..=u32::from(len) {
                fixture.frame(|ctx| ctx.chase(Color::RED, Color::GREEN, Color::BLUE));
                if call == 1 {
                    assert_eq!(fixture.positions(Color::RED), (0..block).collect::<Vec<_>>());
                    assert_eq!(
                        fixture.positions(Color::GREEN),
                        (block..2 * block).collect::<Vec<_>>()
                    );
                    assert_eq!(
                        fixture.positions(Color::BLUE),
                        (2 * block..3 * block).collect::<Vec<_>>()
                    );
                }
                if fixture.runtime.is_cycle() {
                    cycles.push(fixture.runtime.step);
                }
            }
            let cycle_step = u32::from(len) - 3 * u32::from(size.pixels());
            assert_eq!(cycles, [cycle_step + 1]);
            assert_eq!(fixture.runtime.step, 0);
        }
    }

    #[test]
    fn test_tricolor_bands() {
        let colors = [Color::RED, Color::GREEN, Color::BLUE];
        for size in [
            BlockSize::Small,
            BlockSize::Medium,
            BlockSize::Large,
            BlockSize::ExtraLarge,
        ] {
            let len = 24;
            let block = usize::from(size.pixels());
            let mut fixture = Fixture::new(len, sized(size));
            fixture.frame(|ctx| ctx.tricolor_chase(colors[0], colors[1], colors[2]));
            for pixel in 0..usize::from(len) {
                let i = usize::from(len) - 1 - pixel;
                let band = (i % (3 * block)) / block;
                assert_eq!(fixture.pixels()[pixel], colors[band], "{size:?} pixel {pixel}");
            }
        }
    }

    #[test]
    fn test_tricolor_cycle_after_len_steps() {
        let mut fixture = Fixture::new(12, SegmentOptions::new());
        let mut cycles = Vec::new();
        for call in 1..=24 {
            fixture.frame(|ctx| ctx.tricolor_chase(Color::RED, Color::GREEN, Color::BLUE));
            if fixture.runtime.is_cycle() {
                cycles.push(call);
            }
        }
        assert_eq!(cycles, [12, 24]);
    }

    #[test]
    fn test_running_shift_parity() {
        let (a, b) = (Color::RED, Color::BLUE);
        let mut fixture = Fixture::new(8, SegmentOptions::new());
        for call in 1..=8 {
            fixture.frame(|ctx| ctx.running(a, b));
            if call == 4 {
                assert_eq!(&fixture.pixels()[..4], [a, a, b, b]);
                assert_eq!(&fixture.pixels()[4..], [Color::BLACK; 4]);
            }
            assert_eq!(fixture.runtime.is_cycle(), call == 8);
        }
        assert_eq!(fixture.pixels(), [a, a, b, b, a, a, b, b]);

        let mut fixture = Fixture::new(8, sized(BlockSize::Medium));
        for _ in 0..8 {
            fixture.frame(|ctx| ctx.running(a, b));
        }
        assert_eq!(fixture.pixels(), [a, a, a, a, b, b, b, b]);
    }

    #[test]
    fn test_sparkle_restores_previous_block() {
        for size in [BlockSize::Small, BlockSize::Large] {
            let block = usize::from(size.pixels());
            let mut fixture = Fixture::new(10, sized(size));
            for _ in 0..30 {
                fixture.frame(|ctx| ctx.sparkle(Color::BLUE, Color::WHITE));
                let start = usize::from(fixture.runtime.aux3);
                assert_eq!(
                    fixture.positions(Color::WHITE),
                    (start..start + block).collect::<Vec<_>>()
                );
                assert_eq!(fixture.positions(Color::BLUE).len(), 10 - block);
                assert!(fixture.runtime.is_cycle());
            }
        }
    }
}
