mod tests {
    use myrtio_segment_fx::Color;
    use myrtio_segment_fx::color::{WHEEL_MIN_DISTANCE, blend, color_blend, color_wheel, random_wheel_index};
    use myrtio_segment_fx::random::Random8;

    #[test]
    fn test_color_packing() {
        let color = Color::rgbw(0x11, 0x22, 0x33, 0x44);
        assert_eq!(color.0, 0x4411_2233);
        assert_eq!(color.r(), 0x11);
        assert_eq!(color.g(), 0x22);
        assert_eq!(color.b(), 0x33);
        assert_eq!(color.w(), 0x44);
        assert_eq!(Color::new(255, 0, 0), Color::RED);
    }

    #[test]
    fn test_color_to_rgb_drops_white() {
        let rgb = Color::rgbw(1, 2, 3, 200).to_rgb();
        assert_eq!((rgb.r, rgb.g, rgb.b), (1, 2, 3));
    }

    #[test]
    fn test_color_dim_and_dark() {
        assert_eq!(Color::WHITE.dim(), Color(0x3F_3F_3F));
        assert_eq!(Color::WHITE.dark(), Color(0x0F_0F_0F));
    }

    #[test]
    fn test_color_wheel_primaries() {
        assert_eq!(color_wheel(0), Color::RED);
        assert_eq!(color_wheel(85), Color::GREEN);
        assert_eq!(color_wheel(170), Color::BLUE);
    }

    #[test]
    fn test_color_wheel_saturated() {
        for position in 0..=255u8 {
            let color = color_wheel(position);
            let channels = [color.r(), color.g(), color.b()];
            assert!(channels.contains(&0), "position {position} has no zero channel");
            assert_eq!(color.w(), 0);
        }
    }

    #[test]
    fn test_random_wheel_index_distance() {
        let mut random = Random8::new(42);
        let mut anchor = 0u8;
        for _ in 0..100 {
            let next = random_wheel_index(&mut random, anchor);
            let x = anchor.abs_diff(next);
            assert!(x.min(255 - x) >= WHEEL_MIN_DISTANCE);
            anchor = next;
        }
    }

    #[test]
    fn test_color_blend() {
        assert_eq!(color_blend(Color::RED, Color::BLUE, 0), Color::RED);
        assert_eq!(color_blend(Color::RED, Color::BLUE, 255), Color::BLUE);
        assert_eq!(color_blend(Color::RED, Color::BLUE, 128), Color::new(128, 0, 127));
        assert_eq!(color_blend(Color::BLACK, Color::WHITE, 128), Color::new(127, 127, 127));
    }

    #[test]
    fn test_blend_runs() {
        let a = [Color::BLACK; 3];
        let b = [Color::WHITE; 2];
        let mut dest = [Color::RED; 3];
        blend(&mut dest, &a, &b, 255);
        assert_eq!(dest, [Color::WHITE, Color::WHITE, Color::RED]);
    }
}
