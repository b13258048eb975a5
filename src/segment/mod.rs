//! Segment configuration and per-segment animation state

mod options;
pub mod registry;

use core::sync::atomic::{AtomicU8, Ordering};

pub use options::*;
pub use registry::{ActiveRegistry, INACTIVE_SEGMENT};

use crate::color::Color;
use crate::mode::ModeId;

/// Lowest accepted speed and shortest frame delay
pub const SPEED_MIN: u16 = 2;
/// Highest accepted speed
pub const SPEED_MAX: u16 = u16::MAX;
/// Speed used for the default segment
pub const DEFAULT_SPEED: u16 = 1000;
/// Foreground color used for the default segment
pub const DEFAULT_COLOR: Color = Color::RED;
/// Number of color slots per segment
pub const MAX_NUM_COLORS: usize = 3;

/// Runtime flag: the segment's mode ran during the current tick
pub const FRAME: u8 = 0b1000_0000;
/// Runtime flag: the mode finished one full repetition of its pattern
pub const CYCLE: u8 = 0b0100_0000;

/// Contiguous pixel range with its own animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// First pixel (inclusive)
    pub start: u16,
    /// Last pixel (inclusive)
    pub stop: u16,
    pub mode: ModeId,
    /// Pace hint; each mode derives its frame delay from it
    pub speed: u16,
    pub options: SegmentOptions,
    /// Foreground, background and accent colors
    pub colors: [Color; MAX_NUM_COLORS],
}

impl Default for Segment {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Segment {
    /// Create a static segment covering `start..=stop`
    pub const fn new(start: u16, stop: u16) -> Self {
        Self {
            start,
            stop,
            mode: ModeId::Static,
            speed: DEFAULT_SPEED,
            options: SegmentOptions::new(),
            colors: [DEFAULT_COLOR, Color::BLACK, Color::BLACK],
        }
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: ModeId) -> Self {
        self.mode = mode;
        self
    }

    /// Set the speed, clamped to `SPEED_MIN..=SPEED_MAX`
    #[must_use]
    pub const fn with_speed(mut self, speed: u16) -> Self {
        self.speed = clamp_speed(speed);
        self
    }

    #[must_use]
    pub const fn with_options(mut self, options: SegmentOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the foreground color, leaving the other slots untouched
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.colors[0] = color;
        self
    }

    #[must_use]
    pub const fn with_colors(mut self, colors: [Color; MAX_NUM_COLORS]) -> Self {
        self.colors = colors;
        self
    }

    /// Number of pixels in the segment
    pub const fn len(&self) -> u16 {
        self.stop.saturating_sub(self.start).saturating_add(1)
    }

    pub const fn is_reverse(&self) -> bool {
        self.options.is_reverse()
    }
}

/// Clamp a speed value into the accepted range
pub const fn clamp_speed(speed: u16) -> u16 {
    if speed < SPEED_MIN { SPEED_MIN } else { speed }
}

/// Externally supplied levels (e.g. audio bands) read by data-driven modes
///
/// The host keeps writing the atomics; modes only read them.
#[derive(Debug, Clone, Copy)]
pub struct ExternalData {
    levels: &'static [AtomicU8],
}

impl ExternalData {
    pub const fn new(levels: &'static [AtomicU8]) -> Self {
        Self { levels }
    }

    pub const fn len(&self) -> usize {
        self.levels.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Current level at `index` (0 when out of range)
    pub fn level(&self, index: usize) -> u8 {
        self.levels
            .get(index)
            .map_or(0, |level| level.load(Ordering::Relaxed))
    }
}

/// Mutable animation state of an active segment
///
/// Only the scheduler touches `next_due_time`; every other field belongs to
/// whichever mode currently drives the segment.
#[derive(Debug, Clone)]
pub struct Runtime<const ENTITIES: usize> {
    /// Wrapping millisecond timestamp at which the segment is next due
    pub next_due_time: u32,
    /// Animation phase cursor
    pub step: u32,
    /// Mode invocations since the last reset
    pub call_count: u32,
    /// Scratch byte, usually a color wheel index
    pub aux: u8,
    /// Flag byte: [`FRAME`] and [`CYCLE`] in the high bits, low bits free for modes
    pub aux2: u8,
    /// Scratch word, usually a pixel index
    pub aux3: u16,
    /// Per-entity scratch for multi-entity modes
    pub scratch: [u16; ENTITIES],
    external: Option<ExternalData>,
}

impl<const ENTITIES: usize> Default for Runtime<ENTITIES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ENTITIES: usize> Runtime<ENTITIES> {
    pub const fn new() -> Self {
        Self {
            next_due_time: 0,
            step: 0,
            call_count: 0,
            aux: 0,
            aux2: 0,
            aux3: 0,
            scratch: [0; ENTITIES],
            external: None,
        }
    }

    /// Zero every field except the external data source
    pub fn reset(&mut self) {
        self.next_due_time = 0;
        self.reset_animation();
    }

    /// Zero every field except the due time and the external data source
    pub fn reset_animation(&mut self) {
        self.step = 0;
        self.call_count = 0;
        self.aux = 0;
        self.aux2 = 0;
        self.aux3 = 0;
        self.scratch = [0; ENTITIES];
    }

    /// Whether the segment may advance at `now` (wrapping milliseconds)
    #[allow(clippy::cast_possible_wrap)]
    pub const fn is_due(&self, now: u32) -> bool {
        if self.call_count == 0 && self.next_due_time == 0 {
            return true;
        }
        now.wrapping_sub(self.next_due_time) as i32 >= 0
    }

    pub const fn is_frame(&self) -> bool {
        self.aux2 & FRAME != 0
    }

    pub const fn is_cycle(&self) -> bool {
        self.aux2 & CYCLE != 0
    }

    pub fn set_frame(&mut self) {
        self.aux2 |= FRAME;
    }

    pub fn set_cycle(&mut self) {
        self.aux2 |= CYCLE;
    }

    pub fn clear_frame_cycle(&mut self) {
        self.aux2 &= !(FRAME | CYCLE);
    }

    pub const fn external_data(&self) -> Option<ExternalData> {
        self.external
    }

    pub fn set_external_data(&mut self, data: Option<ExternalData>) {
        self.external = data;
    }
}
