//! Pixel buffer capability
//!
//! The engine never owns LED memory layout decisions: it talks to a
//! [`PixelBuffer`] through indexed reads/writes and bulk fill/copy. Indices
//! are absolute strip positions. Out-of-range accesses are ignored rather
//! than panicking.

use crate::color::Color;

/// Mutable array of per-LED colors
pub trait PixelBuffer {
    /// Logical number of pixels
    fn len(&self) -> usize;

    /// Read a pixel (`BLACK` when out of range)
    fn get(&self, index: usize) -> Color;

    /// Write a pixel (ignored when out of range)
    fn set(&mut self, index: usize, color: Color);

    /// View of the logical pixel range, used for flushing to hardware
    fn pixels(&self) -> &[Color];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest logical length the buffer can hold
    fn capacity(&self) -> usize {
        self.len()
    }

    /// Change the logical length, returning the length actually applied
    ///
    /// Fixed-size buffers keep their length.
    fn resize(&mut self, len: usize) -> usize {
        let _ = len;
        self.len()
    }

    /// Write `color` to `count` pixels starting at `start`
    fn fill(&mut self, color: Color, start: usize, count: usize) {
        let end = start.saturating_add(count).min(self.len());
        for index in start..end {
            self.set(index, color);
        }
    }

    /// Copy `count` pixels from `src` to `dest`; ranges may overlap
    ///
    /// The run is shortened so both ranges stay inside the logical length.
    fn copy_within(&mut self, dest: usize, src: usize, count: usize) {
        let count = count.min(self.len().saturating_sub(src.max(dest)));
        if dest < src {
            for offset in 0..count {
                let color = self.get(src + offset);
                self.set(dest + offset, color);
            }
        } else {
            for offset in (0..count).rev() {
                let color = self.get(src + offset);
                self.set(dest + offset, color);
            }
        }
    }

    /// Blank every pixel
    fn clear(&mut self) {
        let len = self.len();
        self.fill(Color::BLACK, 0, len);
    }
}

/// Fixed-capacity frame buffer
///
/// `N` is the capacity; the logical length can be shrunk (and grown back up
/// to `N`) at runtime without reallocation.
#[derive(Debug, Clone)]
pub struct FrameBuffer<const N: usize> {
    pixels: [Color; N],
    len: usize,
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameBuffer<N> {
    /// Create a blank buffer using the full capacity
    pub const fn new() -> Self {
        Self {
            pixels: [Color::BLACK; N],
            len: N,
        }
    }

    /// Create a blank buffer with a logical length (clamped to `1..=N`)
    pub fn with_len(len: usize) -> Self {
        let mut buffer = Self::new();
        buffer.set_len(len);
        buffer
    }

    /// Change the logical length, clamped to `1..=N`
    ///
    /// Pixels beyond the new length are blanked.
    pub fn set_len(&mut self, len: usize) {
        self.len = len.clamp(1.min(N), N);
        for pixel in &mut self.pixels[self.len..] {
            *pixel = Color::BLACK;
        }
    }

    /// Mutable view of the logical pixel range
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels[..self.len]
    }
}

impl<const N: usize> PixelBuffer for FrameBuffer<N> {
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> Color {
        self.pixels().get(index).copied().unwrap_or(Color::BLACK)
    }

    fn set(&mut self, index: usize, color: Color) {
        if let Some(pixel) = self.pixels_mut().get_mut(index) {
            *pixel = color;
        }
    }

    fn pixels(&self) -> &[Color] {
        &self.pixels[..self.len]
    }

    fn capacity(&self) -> usize {
        N
    }

    fn resize(&mut self, len: usize) -> usize {
        self.set_len(len);
        self.len
    }

    fn fill(&mut self, color: Color, start: usize, count: usize) {
        let end = start.saturating_add(count).min(self.len);
        if start < end {
            self.pixels[start..end].fill(color);
        }
    }

    fn copy_within(&mut self, dest: usize, src: usize, count: usize) {
        let Some(room) = self.len.checked_sub(src.max(dest)) else {
            return;
        };
        let count = count.min(room);
        self.pixels.copy_within(src..src + count, dest);
    }
}
