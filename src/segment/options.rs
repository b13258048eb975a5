//! Segment option flags
//!
//! Hosts store options as one byte:
//!
//! | bit | meaning |
//! |-----|---------|
//! | 7   | reverse direction |
//! | 6-4 | fade rate (0 = legacy halving) |
//! | 3   | gamma correction |
//! | 2-1 | block size (1/2/4/8 pixels) |
//! | 0   | unused |

pub const NO_OPTIONS: u8 = 0b0000_0000;
pub const REVERSE: u8 = 0b1000_0000;
pub const FADE_XFAST: u8 = 0b0001_0000;
pub const FADE_FAST: u8 = 0b0010_0000;
pub const FADE_MEDIUM: u8 = 0b0011_0000;
pub const FADE_SLOW: u8 = 0b0100_0000;
pub const FADE_XSLOW: u8 = 0b0101_0000;
pub const FADE_XXSLOW: u8 = 0b0110_0000;
pub const FADE_GLACIAL: u8 = 0b0111_0000;
pub const GAMMA: u8 = 0b0000_1000;
pub const SIZE_SMALL: u8 = 0b0000_0000;
pub const SIZE_MEDIUM: u8 = 0b0000_0010;
pub const SIZE_LARGE: u8 = 0b0000_0100;
pub const SIZE_XLARGE: u8 = 0b0000_0110;

const FADE_SHIFT: u8 = 4;
const FADE_MASK: u8 = 0b111;
const SIZE_SHIFT: u8 = 1;
const SIZE_MASK: u8 = 0b11;

/// Animation direction along the segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// Speed at which `fade_out` approaches its target
///
/// `Legacy` halves every channel per call and always fades toward black.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum FadeRate {
    #[default]
    Legacy = 0,
    ExtraFast = 1,
    Fast = 2,
    Medium = 3,
    Slow = 4,
    ExtraSlow = 5,
    ExtraExtraSlow = 6,
    Glacial = 7,
}

impl FadeRate {
    const ALL: [Self; 8] = [
        Self::Legacy,
        Self::ExtraFast,
        Self::Fast,
        Self::Medium,
        Self::Slow,
        Self::ExtraSlow,
        Self::ExtraExtraSlow,
        Self::Glacial,
    ];

    /// Decode from the low three bits
    pub const fn from_raw(value: u8) -> Self {
        Self::ALL[(value & FADE_MASK) as usize]
    }

    /// Pair of right-shift amounts combined additively per fade step
    pub const fn shifts(self) -> (u8, u8) {
        const HIGH: [u8; 8] = [0, 1, 1, 1, 2, 3, 4, 6];
        const LOW: [u8; 8] = [0, 2, 3, 8, 8, 8, 8, 8];
        (HIGH[self as usize], LOW[self as usize])
    }
}

/// Pixel granularity used by block-based modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum BlockSize {
    #[default]
    Small = 0,
    Medium = 1,
    Large = 2,
    ExtraLarge = 3,
}

impl BlockSize {
    /// Decode from the low two bits
    pub const fn from_raw(value: u8) -> Self {
        match value & SIZE_MASK {
            0 => Self::Small,
            1 => Self::Medium,
            2 => Self::Large,
            _ => Self::ExtraLarge,
        }
    }

    /// Raw 0-3 size option
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Block width in pixels (`1 << size`)
    pub const fn pixels(self) -> u16 {
        1 << self as u16
    }
}

/// Named view of the packed option byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentOptions {
    pub direction: Direction,
    pub fade_rate: FadeRate,
    pub gamma: bool,
    pub size: BlockSize,
}

impl SegmentOptions {
    pub const fn new() -> Self {
        Self {
            direction: Direction::Forward,
            fade_rate: FadeRate::Legacy,
            gamma: false,
            size: BlockSize::Small,
        }
    }

    /// Decode a packed option byte
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            direction: if bits & REVERSE != 0 {
                Direction::Reverse
            } else {
                Direction::Forward
            },
            fade_rate: FadeRate::from_raw(bits >> FADE_SHIFT),
            gamma: bits & GAMMA != 0,
            size: BlockSize::from_raw(bits >> SIZE_SHIFT),
        }
    }

    /// Encode into the packed option byte
    pub const fn to_bits(self) -> u8 {
        let mut bits = NO_OPTIONS;
        if matches!(self.direction, Direction::Reverse) {
            bits |= REVERSE;
        }
        bits |= (self.fade_rate as u8) << FADE_SHIFT;
        if self.gamma {
            bits |= GAMMA;
        }
        bits | (self.size as u8) << SIZE_SHIFT
    }

    pub const fn is_reverse(self) -> bool {
        matches!(self.direction, Direction::Reverse)
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn with_fade_rate(mut self, fade_rate: FadeRate) -> Self {
        self.fade_rate = fade_rate;
        self
    }

    #[must_use]
    pub const fn with_gamma(mut self, gamma: bool) -> Self {
        self.gamma = gamma;
        self
    }

    #[must_use]
    pub const fn with_size(mut self, size: BlockSize) -> Self {
        self.size = size;
        self
    }
}

impl From<u8> for SegmentOptions {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<SegmentOptions> for u8 {
    fn from(options: SegmentOptions) -> Self {
        options.to_bits()
    }
}
