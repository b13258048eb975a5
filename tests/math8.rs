mod tests {
    use myrtio_segment_fx::gamma::gamma8;
    use myrtio_segment_fx::math8::{max4, scale8, sine8};
    use myrtio_segment_fx::random::{DEFAULT_SEED, Random8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(255, 255), 255);
        assert_eq!(scale8(255, 50), 50);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_sine8() {
        assert_eq!(sine8(0), 128);
        assert_eq!(sine8(64), 255);
        assert_eq!(sine8(192), 0);
    }

    #[test]
    fn test_max4() {
        assert_eq!(max4(1, 9, 3, 4), 9);
        assert_eq!(max4(0, 0, 0, 7), 7);
    }

    #[test]
    fn test_gamma8_endpoints() {
        assert_eq!(gamma8(0), 0);
        assert_eq!(gamma8(128), 42);
        assert_eq!(gamma8(255), 255);
    }

    #[test]
    fn test_random_is_deterministic() {
        let mut a = Random8::new(DEFAULT_SEED);
        let mut b = Random8::default();
        for _ in 0..64 {
            assert_eq!(a.next_u8(), b.next_u8());
        }
        a.set_seed(7);
        b.set_seed(7);
        assert_eq!(a.next_u16(), b.next_u16());
        assert_eq!(a.seed(), b.seed());
    }

    #[test]
    fn test_random_bounds() {
        let mut random = Random8::new(1234);
        for _ in 0..500 {
            assert!(random.below_u8(10) < 10);
            let value = random.range_u16(5, 10);
            assert!((5..10).contains(&value));
        }
        assert_eq!(random.below_u8(0), 0);
        assert_eq!(random.below_u16(0), 0);
        assert_eq!(random.range_u8(5, 5), 5);
        assert_eq!(random.range_u16(9, 3), 9);
    }
}
