//! Pixel-level building blocks shared by the mode library
//!
//! Helpers own the drawing algorithm; modes pick colors and keep the
//! cycle-boundary bookkeeping. Every helper returns the frame delay the
//! mode should request.

use super::ModeContext;
use crate::color::{Color, color_wheel};
use crate::math8::max4;
use crate::segment::FadeRate;

/// Fixed on-time of a strobe flash in milliseconds
pub const STROBE_ON_TIME: u16 = 20;

/// Channel delta below which a fade snaps onto its target
const FADE_SNAP: i32 = 3;

impl<const ENTITIES: usize> ModeContext<'_, ENTITIES> {
    /// Alternate the whole segment between `on` and `off`
    ///
    /// Even calls show `on`. With `strobe` the on-time is fixed and the
    /// off-time takes the rest of `speed`.
    pub fn blink(&mut self, on: Color, off: Color, strobe: bool) -> u16 {
        let (on, off) = if self.is_reverse() { (off, on) } else { (on, off) };
        if self.runtime.call_count & 1 == 1 {
            self.fill_segment(off);
            self.set_cycle();
            if strobe {
                self.speed().saturating_sub(STROBE_ON_TIME)
            } else {
                self.speed() / 2
            }
        } else {
            self.fill_segment(on);
            if strobe { STROBE_ON_TIME } else { self.speed() / 2 }
        }
    }

    /// Light the segment pixel by pixel with `first`, then with `second`
    ///
    /// One cycle spans `2 * len` calls. `reverse_second` flips the direction
    /// of the second half relative to the first.
    #[allow(clippy::cast_possible_truncation)]
    pub fn color_wipe(&mut self, first: Color, second: Color, reverse_second: bool) -> u16 {
        let len = u32::from(self.len());
        let step = self.runtime.step;
        if step < len {
            self.set_pixel_directed(step as u16, first);
        } else {
            let offset = (step - len) as u16;
            if self.is_reverse() != reverse_second {
                self.set_pixel(self.len() - 1 - offset, second);
            } else {
                self.set_pixel(offset, second);
            }
        }
        self.runtime.step = (step + 1) % (len * 2);
        if self.runtime.step == 0 {
            self.set_cycle();
        }
        self.speed_div(len * 2)
    }

    /// Bounce a block of foreground pixels between the segment ends
    ///
    /// In `dual` mode the block is mirrored from the opposite end as well.
    #[allow(clippy::cast_possible_wrap)]
    pub fn scan(&mut self, foreground: Color, background: Color, dual: bool) -> u16 {
        let size = self.block_size().pixels();
        let len = self.len();
        self.fill_segment(background);

        let step = self.runtime.step as i32;
        let last = i32::from(len) - 1;
        for i in 0..i32::from(size) {
            if self.is_reverse() || dual {
                self.set_pixel_at(last - step - i, foreground);
            }
            if !self.is_reverse() || dual {
                self.set_pixel_at(step + i, foreground);
            }
        }

        if self.runtime.aux == 0 {
            self.runtime.step += 1;
        } else {
            self.runtime.step = self.runtime.step.saturating_sub(1);
        }
        if self.runtime.step == 0 {
            self.runtime.aux = 0;
            self.set_cycle();
        }
        if self.runtime.step >= u32::from(len.saturating_sub(size)) {
            self.runtime.aux = 1;
        }
        self.speed_div(u32::from(len) * 2)
    }

    /// Three rotating blocks of `first`, `second` and `third`
    #[allow(clippy::cast_possible_truncation)]
    pub fn chase(&mut self, first: Color, second: Color, third: Color) -> u16 {
        let size = u32::from(self.block_size().pixels());
        let len = u32::from(self.len());
        let step = self.runtime.step;
        for i in 0..size {
            let a = (step + i) % len;
            let b = (a + size) % len;
            let c = (b + size) % len;
            self.set_pixel_directed(a as u16, first);
            self.set_pixel_directed(b as u16, second);
            self.set_pixel_directed(c as u16, third);
        }
        if step + size * 3 == len {
            self.set_cycle();
        }
        self.runtime.step = (step + 1) % len;
        self.speed_div(len)
    }

    /// Rotating triband computed per pixel from a modulo index
    pub fn tricolor_chase(&mut self, first: Color, second: Color, third: Color) -> u16 {
        let size = u32::from(self.block_size().pixels());
        let len = self.len();
        let mut index = self.runtime.step % (size * 3);
        for i in 0..len {
            index %= size * 3;
            let color = if index < size {
                first
            } else if index < size * 2 {
                second
            } else {
                third
            };
            if self.is_reverse() {
                self.set_pixel(i, color);
            } else {
                self.set_pixel(len - 1 - i, color);
            }
            index += 1;
        }
        self.runtime.step = self.runtime.step.wrapping_add(1);
        if self.runtime.step % u32::from(len) == 0 {
            self.set_cycle();
        }
        self.speed_div(u32::from(len))
    }

    /// Shift the segment by one pixel and feed a new pixel at the leading edge
    ///
    /// The fed color switches between `a` and `b` every `2 << size` steps.
    pub fn running(&mut self, a: Color, b: Color) -> u16 {
        let size = u32::from(self.block_size().pixels()) * 2;
        let color = if self.runtime.step & size != 0 { a } else { b };
        let len = self.len();
        if self.is_reverse() {
            self.copy_pixels(0, 1, len - 1);
            self.set_pixel(len - 1, color);
        } else {
            self.copy_pixels(1, 0, len - 1);
            self.set_pixel(0, color);
        }
        self.runtime.step = (self.runtime.step + 1) % u32::from(len);
        if self.runtime.step == 0 {
            self.set_cycle();
        }
        self.speed() / 16
    }

    /// Light random pixels one at a time over a background
    ///
    /// A cycle starts by filling `background` and drawing a budget of a
    /// quarter to half the segment length; each following call lights one
    /// pixel until the budget runs out.
    pub fn twinkle(&mut self, foreground: Color, background: Color) -> u16 {
        let len = self.len();
        if self.runtime.step == 0 {
            self.fill_segment(background);
            let min = (len / 4).max(1);
            let max = (len / 2).max(min + 1);
            self.runtime.step = u32::from(self.random.range_u16(min, max));
        } else {
            let index = self.random.below_u16(len);
            self.set_pixel(index, foreground);
            self.runtime.step -= 1;
            if self.runtime.step == 0 {
                self.set_cycle();
            }
        }
        self.speed_div(u32::from(len))
    }

    /// Fade toward the background and occasionally ignite a block
    pub fn twinkle_fade(&mut self, color: Color) -> u16 {
        self.fade_out();
        if self.random.below_u8(3) == 0 {
            let size = self.block_size().pixels();
            let index = self.random_block_start(size);
            self.fill(color, index, size);
            self.set_cycle();
        }
        self.speed() / 16
    }

    /// Keep a single sparkling block moving over a background
    pub fn sparkle(&mut self, background: Color, spark: Color) -> u16 {
        if self.runtime.call_count == 0 {
            self.fill_segment(background);
        }
        let size = self.block_size().pixels();
        self.fill(background, self.runtime.aux3, size);
        self.runtime.aux3 = self.random_block_start(size);
        self.fill(spark, self.runtime.aux3, size);
        self.set_cycle();
        self.speed() / 32
    }

    /// Glowing sparks that bleed into their neighbours as they fade
    ///
    /// A triggered frame ignites a dense burst instead of the sparse random
    /// one.
    pub fn fireworks(&mut self, color: Color) -> u16 {
        self.fade_out();
        self.blur();
        let size = self.block_size().pixels() * 2;
        self.ignite(size, |_| color);
        self.speed_div(u32::from(self.len()))
    }

    /// Like [`Self::fireworks`] but each spark pixel takes its own hue
    #[allow(clippy::cast_possible_truncation)]
    pub fn rainbow_fireworks(&mut self) -> u16 {
        self.fade_out();
        self.blur();
        let size = self.block_size().pixels() * 2;
        let hue = self.runtime.aux;
        self.ignite(size, |offset| {
            color_wheel(hue.wrapping_add((offset as u8).wrapping_mul(32)))
        });
        self.runtime.aux = self.runtime.aux.wrapping_add(8);
        self.speed_div(u32::from(self.len()))
    }

    /// Candle-like flicker of the primary color
    ///
    /// Higher `rev_intensity` means a gentler flicker.
    pub fn fire_flicker(&mut self, rev_intensity: u8) -> u16 {
        let base = self.color(0);
        let lum = max4(base.w(), base.r(), base.g(), base.b()) / rev_intensity.max(1);
        for i in 0..self.len() {
            let flicker = self.random.below_u8(lum);
            let color = Color::rgbw(
                base.r().saturating_sub(flicker),
                base.g().saturating_sub(flicker),
                base.b().saturating_sub(flicker),
                base.w().saturating_sub(flicker),
            );
            self.set_pixel(i, color);
        }
        self.set_cycle();
        self.speed_div(u32::from(self.len()))
    }

    /// Fade every pixel one step toward the background color
    pub fn fade_out(&mut self) {
        let target = self.color(1);
        self.fade_out_to(target);
    }

    /// Fade every pixel one step toward `target`
    ///
    /// The legacy rate halves each channel and always heads for black.
    pub fn fade_out_to(&mut self, target: Color) {
        let rate = self.fade_rate();
        let target = self.correct(target);
        for i in 0..self.len() {
            let current = self.pixel(i);
            let next = if rate == FadeRate::Legacy {
                Color((current.0 >> 1) & 0x7F7F_7F7F)
            } else {
                fade_toward(current, target, rate)
            };
            self.set_pixel_raw(i, next);
        }
    }

    /// In-place 1-D diffusion: each pixel absorbs a quarter of each neighbour
    fn blur(&mut self) {
        let len = self.len();
        for i in 1..len.saturating_sub(1) {
            let left = self.pixel(i - 1);
            let center = self.pixel(i);
            let right = self.pixel(i + 1);
            let mix = |l: u8, c: u8, r: u8| (l >> 2).saturating_add(c).saturating_add(r >> 2);
            let blurred = Color::rgbw(
                mix(left.r(), center.r(), right.r()),
                mix(left.g(), center.g(), right.g()),
                mix(left.b(), center.b(), right.b()),
                mix(left.w(), center.w(), right.w()),
            );
            self.set_pixel_raw(i, blurred);
        }
    }

    /// Spark ignition shared by the fireworks variants
    fn ignite(&mut self, size: u16, mut paint: impl FnMut(u16) -> Color) {
        let len = self.len();
        let (count, sparse) = if self.triggered {
            ((len / 10).max(1), false)
        } else {
            ((len / 20).max(1), true)
        };
        for _ in 0..count {
            if sparse && self.random.below_u8(10) != 0 {
                continue;
            }
            let index = self.random_block_start(size);
            for offset in 0..size {
                self.set_pixel(index.saturating_add(offset), paint(offset));
            }
            self.set_cycle();
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fade_toward(current: Color, target: Color, rate: FadeRate) -> Color {
    let (high, low) = rate.shifts();
    let step = |from: u8, to: u8| {
        let delta = i32::from(to) - i32::from(from);
        let delta = if delta.abs() < FADE_SNAP {
            delta
        } else {
            // slow rates would stall on small positive deltas
            match (delta >> high) + (delta >> low) {
                0 => delta.signum(),
                step => step,
            }
        };
        (i32::from(from) + delta).clamp(0, 255) as u8
    };
    Color::rgbw(
        step(current.r(), target.r()),
        step(current.g(), target.g()),
        step(current.b(), target.b()),
        step(current.w(), target.w()),
    )
}
