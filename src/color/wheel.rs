use super::Color;
use crate::random::Random8;

/// Minimum circular distance between two successive random wheel positions
pub const WHEEL_MIN_DISTANCE: u8 = 42;

/// Map a wheel position (0-255) to a fully saturated hue
///
/// The range is split into three 85-wide bands. In each band one channel is
/// held at 0 while the other two crossfade, giving red (0) → green (85) →
/// blue (170) → red.
pub const fn color_wheel(position: u8) -> Color {
    let pos = 255 - position;
    if pos < 85 {
        Color::new(255 - pos * 3, 0, pos * 3)
    } else if pos < 170 {
        let pos = pos - 85;
        Color::new(0, pos * 3, 255 - pos * 3)
    } else {
        let pos = pos - 170;
        Color::new(pos * 3, 255 - pos * 3, 0)
    }
}

/// Draw a random wheel position visually distinct from `anchor`
///
/// Rejection-samples until the circular distance on the 256-step wheel is at
/// least [`WHEEL_MIN_DISTANCE`].
pub fn random_wheel_index(random: &mut Random8, anchor: u8) -> u8 {
    loop {
        let candidate = random.next_u8();
        let x = anchor.abs_diff(candidate);
        let distance = x.min(255 - x);
        if distance >= WHEEL_MIN_DISTANCE {
            return candidate;
        }
    }
}
