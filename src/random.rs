//! Small deterministic pseudo-random generator
//!
//! A 16-bit linear congruential generator (the `FastLED` `random8` recipe).
//! Every segment animation draws from the engine's single instance, so a
//! fixed seed reproduces the exact same sequence of frames.

/// Default seed used when the host does not provide one
pub const DEFAULT_SEED: u16 = 0x1F35;

const MULTIPLIER: u16 = 2053;
const INCREMENT: u16 = 13849;

/// Deterministic 8/16-bit random source
#[derive(Debug, Clone)]
pub struct Random8 {
    seed: u16,
}

impl Default for Random8 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Random8 {
    /// Create a generator with the given seed
    pub const fn new(seed: u16) -> Self {
        Self { seed }
    }

    /// Replace the generator state
    pub fn set_seed(&mut self, seed: u16) {
        self.seed = seed;
    }

    /// Current generator state
    pub const fn seed(&self) -> u16 {
        self.seed
    }

    /// Next value in `0..=255`
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_u8(&mut self) -> u8 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        (self.seed.wrapping_add(self.seed >> 8) & 0xFF) as u8
    }

    /// Next value in `0..limit` (always 0 when `limit` is 0)
    #[allow(clippy::cast_possible_truncation)]
    pub fn below_u8(&mut self, limit: u8) -> u8 {
        ((u16::from(self.next_u8()) * u16::from(limit)) >> 8) as u8
    }

    /// Next value in `min..max`, or `min` when the range is empty
    pub fn range_u8(&mut self, min: u8, max: u8) -> u8 {
        if max <= min {
            return min;
        }
        min + self.below_u8(max - min)
    }

    /// Next value in `0..=65535`, built from two 8-bit draws
    pub fn next_u16(&mut self) -> u16 {
        let high = u16::from(self.next_u8());
        let low = u16::from(self.next_u8());
        high * 256 + low
    }

    /// Next value in `0..limit` (always 0 when `limit` is 0)
    #[allow(clippy::cast_possible_truncation)]
    pub fn below_u16(&mut self, limit: u16) -> u16 {
        ((u32::from(self.next_u16()) * u32::from(limit)) >> 16) as u16
    }

    /// Next value in `min..max`, or `min` when the range is empty
    pub fn range_u16(&mut self, min: u16, max: u16) -> u16 {
        if max <= min {
            return min;
        }
        min + self.below_u16(max - min)
    }
}
