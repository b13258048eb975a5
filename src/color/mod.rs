mod utils;
mod wheel;

use smart_leds::RGB8;

pub use utils::{blend, color_blend};
pub use wheel::{WHEEL_MIN_DISTANCE, color_wheel, random_wheel_index};

pub type Rgb = RGB8;

/// Packed pixel color in `0xWWRRGGBB` layout
///
/// The white byte is only meaningful for RGBW strips; RGB strips ignore it.
/// Hosts persist colors in this form, so the layout is part of the public
/// contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0x00_00_00);
    pub const WHITE: Self = Self(0xFF_FF_FF);
    pub const RED: Self = Self(0xFF_00_00);
    pub const GREEN: Self = Self(0x00_FF_00);
    pub const BLUE: Self = Self(0x00_00_FF);
    pub const YELLOW: Self = Self(0xFF_FF_00);
    pub const CYAN: Self = Self(0x00_FF_FF);
    pub const MAGENTA: Self = Self(0xFF_00_FF);
    pub const PURPLE: Self = Self(0x40_00_80);
    pub const ORANGE: Self = Self(0xFF_30_00);
    pub const PINK: Self = Self(0xFF_14_93);
    pub const GRAY: Self = Self(0x10_10_10);
    pub const ULTRAWHITE: Self = Self(0xFF_FF_FF_FF);

    /// Create a color from RGB channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self::rgbw(r, g, b, 0)
    }

    /// Create a color from RGBW channels
    #[allow(clippy::cast_lossless)]
    pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self((w as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Create a color from a packed `0xWWRRGGBB` value
    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn w(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn is_black(self) -> bool {
        self.0 == 0
    }

    /// Apply a channel transform to all four channels
    pub fn map_channels(self, f: impl Fn(u8) -> u8) -> Self {
        Self::rgbw(f(self.r()), f(self.g()), f(self.b()), f(self.w()))
    }

    /// Quarter brightness (`0x3F` mask per channel)
    pub const fn dim(self) -> Self {
        Self((self.0 >> 2) & 0x3F3F_3F3F)
    }

    /// One-sixteenth brightness (`0x0F` mask per channel)
    pub const fn dark(self) -> Self {
        Self((self.0 >> 4) & 0x0F0F_0F0F)
    }

    /// Convert to an RGB8 pixel, dropping the white channel
    pub const fn to_rgb(self) -> Rgb {
        Rgb {
            r: self.r(),
            g: self.g(),
            b: self.b(),
        }
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::new(rgb.r, rgb.g, rgb.b)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        color.to_rgb()
    }
}
