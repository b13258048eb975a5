mod tests {
    use myrtio_segment_fx::{Color, FrameBuffer, PixelBuffer};

    fn numbered(len: usize) -> FrameBuffer<8> {
        let mut buffer = FrameBuffer::with_len(len);
        for i in 0..len {
            buffer.set(i, Color(i as u32 + 1));
        }
        buffer
    }

    #[test]
    fn test_out_of_range_access() {
        let mut buffer = numbered(5);
        buffer.set(5, Color::WHITE);
        assert_eq!(buffer.get(5), Color::BLACK);
        assert_eq!(buffer.get(100), Color::BLACK);
        assert_eq!(buffer.pixels().len(), 5);
    }

    #[test]
    fn test_copy_within_clips_to_length() {
        let mut buffer = numbered(5);
        buffer.copy_within(1, 0, 9);
        assert_eq!(buffer.pixels(), [1, 1, 2, 3, 4].map(Color));

        let mut buffer = numbered(5);
        buffer.copy_within(0, 2, 9);
        assert_eq!(buffer.pixels(), [3, 4, 5, 4, 5].map(Color));

        let mut buffer = numbered(5);
        buffer.copy_within(7, 0, 3);
        assert_eq!(buffer.pixels(), [1, 2, 3, 4, 5].map(Color));
    }

    #[test]
    fn test_fill_clips_to_length() {
        let mut buffer = numbered(5);
        buffer.fill(Color::RED, 3, 10);
        assert_eq!(buffer.get(2), Color(3));
        assert_eq!(buffer.get(4), Color::RED);
        assert_eq!(buffer.resize(8), 8);
        assert_eq!(buffer.get(5), Color::BLACK);
    }

    #[test]
    fn test_resize_within_capacity() {
        let mut buffer = numbered(8);
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.resize(3), 3);
        assert_eq!(buffer.resize(20), 8);
        assert_eq!(buffer.get(3), Color::BLACK);
        assert_eq!(buffer.resize(0), 1);
    }
}
