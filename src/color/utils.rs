use super::Color;

/// Blend two colors channel by channel
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = exactly a, 255 = exactly b)
///
/// Intermediate amounts use `a + amount * (b - a) / 256` with truncation
/// toward zero, which keeps fade timing identical across platforms.
pub fn color_blend(a: Color, b: Color, amount_of_b: u8) -> Color {
    match amount_of_b {
        0 => a,
        255 => b,
        amount => Color::rgbw(
            blend_channel(a.r(), b.r(), amount),
            blend_channel(a.g(), b.g(), amount),
            blend_channel(a.b(), b.b(), amount),
            blend_channel(a.w(), b.w(), amount),
        ),
    }
}

/// Blend two pixel runs into `dest`
///
/// Only the common prefix of the three slices is written.
pub fn blend(dest: &mut [Color], a: &[Color], b: &[Color], amount_of_b: u8) {
    for ((out, &a), &b) in dest.iter_mut().zip(a).zip(b) {
        *out = color_blend(a, b, amount_of_b);
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend_channel(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = i32::from(b) - i32::from(a);
    (i32::from(amount_of_b) * delta / 256 + i32::from(a)) as u8
}
