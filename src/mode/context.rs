//! Binding between a mode and the segment it is currently drawing
//!
//! Every pixel index handed to a [`ModeContext`] is relative to the
//! segment's first pixel. Writes outside the segment are dropped, so a mode
//! can never spill into a neighbouring segment's range.

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::gamma::GammaFn;
use crate::random::Random8;
use crate::segment::{BlockSize, FadeRate, Runtime, Segment};

/// Segment, runtime and shared resources for one mode invocation
pub struct ModeContext<'a, const ENTITIES: usize> {
    pub(super) segment: &'a Segment,
    pub(super) runtime: &'a mut Runtime<ENTITIES>,
    pub(super) buffer: &'a mut dyn PixelBuffer,
    pub(super) random: &'a mut Random8,
    pub(super) gamma: GammaFn,
    pub(super) triggered: bool,
}

impl<'a, const ENTITIES: usize> ModeContext<'a, ENTITIES> {
    pub fn new(
        segment: &'a Segment,
        runtime: &'a mut Runtime<ENTITIES>,
        buffer: &'a mut dyn PixelBuffer,
        random: &'a mut Random8,
        gamma: GammaFn,
        triggered: bool,
    ) -> Self {
        Self {
            segment,
            runtime,
            buffer,
            random,
            gamma,
            triggered,
        }
    }

    pub const fn segment(&self) -> &Segment {
        self.segment
    }

    pub fn runtime(&self) -> &Runtime<ENTITIES> {
        &*self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime<ENTITIES> {
        &mut *self.runtime
    }

    pub fn random(&mut self) -> &mut Random8 {
        &mut *self.random
    }

    /// Segment length in pixels
    pub const fn len(&self) -> u16 {
        self.segment.len()
    }

    /// Absolute index of the first pixel
    pub const fn start(&self) -> u16 {
        self.segment.start
    }

    /// Absolute index of the last pixel
    pub const fn stop(&self) -> u16 {
        self.segment.stop
    }

    pub const fn speed(&self) -> u16 {
        self.segment.speed
    }

    /// Color slot `index` (black for slots that do not exist)
    pub fn color(&self, index: usize) -> Color {
        self.segment.colors.get(index).copied().unwrap_or(Color::BLACK)
    }

    pub const fn is_reverse(&self) -> bool {
        self.segment.is_reverse()
    }

    pub const fn fade_rate(&self) -> FadeRate {
        self.segment.options.fade_rate
    }

    pub const fn block_size(&self) -> BlockSize {
        self.segment.options.size
    }

    /// Whether a manual trigger forced this frame
    pub const fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Mark one full repetition of the mode's pattern
    pub fn set_cycle(&mut self) {
        self.runtime.set_cycle();
    }

    /// `speed / divisor`, saturated to the delay range
    #[allow(clippy::cast_possible_truncation)]
    pub fn speed_div(&self, divisor: u32) -> u16 {
        (u32::from(self.segment.speed) / divisor.max(1)) as u16
    }

    /// Apply the segment's gamma option to a color
    pub fn correct(&self, color: Color) -> Color {
        if self.segment.options.gamma {
            color.map_channels(self.gamma)
        } else {
            color
        }
    }

    /// Raw (already corrected) color of a segment pixel
    pub fn pixel(&self, index: u16) -> Color {
        if index < self.len() {
            self.buffer.get(self.absolute(index))
        } else {
            Color::BLACK
        }
    }

    /// Write a gamma-corrected color to a segment pixel
    pub fn set_pixel(&mut self, index: u16, color: Color) {
        let color = self.correct(color);
        self.set_pixel_raw(index, color);
    }

    /// Write a color to a segment pixel without correction
    pub fn set_pixel_raw(&mut self, index: u16, color: Color) {
        if index < self.len() {
            let absolute = self.absolute(index);
            self.buffer.set(absolute, color);
        }
    }

    /// Signed variant of [`Self::set_pixel`]; negative offsets are dropped
    pub fn set_pixel_at(&mut self, index: i32, color: Color) {
        if let Ok(index) = u16::try_from(index) {
            self.set_pixel(index, color);
        }
    }

    /// Write a pixel counting from the segment's leading edge
    ///
    /// Forward segments count from `start`, reversed ones from `stop`.
    pub fn set_pixel_directed(&mut self, index: u16, color: Color) {
        if index < self.len() {
            let index = if self.is_reverse() {
                self.len() - 1 - index
            } else {
                index
            };
            self.set_pixel(index, color);
        }
    }

    /// Fill `count` pixels from `index`, clipped to the segment
    pub fn fill(&mut self, color: Color, index: u16, count: u16) {
        let len = self.len();
        if index >= len {
            return;
        }
        let count = count.min(len - index);
        let color = self.correct(color);
        let start = self.absolute(index);
        self.buffer.fill(color, start, usize::from(count));
    }

    /// Fill the whole segment
    pub fn fill_segment(&mut self, color: Color) {
        self.fill(color, 0, self.len());
    }

    /// Move `count` pixels from `src` to `dest` without correction
    pub fn copy_pixels(&mut self, dest: u16, src: u16, count: u16) {
        let len = self.len();
        if dest >= len || src >= len {
            return;
        }
        let count = count.min(len - dest).min(len - src);
        let dest = self.absolute(dest);
        let src = self.absolute(src);
        self.buffer.copy_within(dest, src, usize::from(count));
    }

    /// Random pixel offset at which a block of `size` pixels still fits
    pub fn random_block_start(&mut self, size: u16) -> u16 {
        let room = self.len().saturating_sub(size).saturating_add(1);
        self.random.below_u16(room)
    }

    const fn absolute(&self, index: u16) -> usize {
        self.segment.start as usize + index as usize
    }
}
