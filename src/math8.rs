use core::f32::consts::PI;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Sine wave mapped onto 0-255
///
/// One full period spans the 256 input values: `sine8(0) == 128`,
/// `sine8(64) == 255`, `sine8(192) == 0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sine8(x: u8) -> u8 {
    let angle = f32::from(x) * (2.0 * PI / 256.0);
    let value = libm::roundf((libm::sinf(angle) + 1.0) * 127.5);
    value.clamp(0.0, 255.0) as u8
}

/// Largest of the four channel values
#[inline]
pub const fn max4(a: u8, b: u8, c: u8, d: u8) -> u8 {
    let ab = if a > b { a } else { b };
    let cd = if c > d { c } else { d };
    if ab > cd { ab } else { cd }
}
