//! Twinkle, sparkle and dissolve modes

use super::ModeContext;
use crate::color::{Color, color_blend, color_wheel};
use crate::math8::sine8;
use crate::segment::MAX_NUM_COLORS;

/// Sparks lit per hyper sparkle frame
const HYPER_SPARKS: u8 = 8;

pub(super) fn twinkle<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.twinkle(ctx.color(0), ctx.color(1))
}

pub(super) fn twinkle_random<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = color_wheel(ctx.random.next_u8());
    ctx.twinkle(color, ctx.color(1))
}

pub(super) fn twinkle_fade<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.twinkle_fade(ctx.color(0))
}

pub(super) fn twinkle_fade_random<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = color_wheel(ctx.random.next_u8());
    ctx.twinkle_fade(color)
}

pub(super) fn sparkle<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.sparkle(ctx.color(1), ctx.color(0))
}

pub(super) fn flash_sparkle<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.sparkle(ctx.color(0), Color::WHITE)
}

/// Primary color with several white sparks per frame
pub(super) fn hyper_sparkle<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.fill_segment(ctx.color(0));
    let size = ctx.block_size().pixels();
    for _ in 0..HYPER_SPARKS {
        let index = ctx.random_block_start(size);
        ctx.fill(Color::WHITE, index, size);
    }
    ctx.set_cycle();
    ctx.speed() / 32
}

/// Twinkle whose pixels drift toward the segment's leading edge
///
/// A black primary color picks a random hue for every drop.
pub(super) fn rain<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let drop = match ctx.color(0) {
        Color::BLACK => color_wheel(ctx.random.next_u8()),
        color => color,
    };
    let delay = ctx.twinkle(drop, ctx.color(1));

    let last = ctx.len() - 1;
    if ctx.is_reverse() {
        let wrapped = ctx.pixel(last);
        ctx.copy_pixels(1, 0, last);
        ctx.set_pixel_raw(0, wrapped);
    } else {
        let wrapped = ctx.pixel(0);
        ctx.copy_pixels(0, 1, last);
        ctx.set_pixel_raw(last, wrapped);
    }
    delay
}

/// Random pixels switch to the next color slot until the segment is filled
#[allow(clippy::cast_possible_truncation)]
pub(super) fn block_dissolve<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let slot = usize::from(ctx.runtime.aux) % MAX_NUM_COLORS;
    let target = ctx.correct(ctx.color(slot));
    let delay = ctx.speed() / 64;

    for _ in 0..ctx.len() {
        let index = ctx.random.below_u16(ctx.len());
        if ctx.pixel(index) != target {
            ctx.set_pixel_raw(index, target);
            return delay;
        }
    }

    ctx.fill_segment(ctx.color(slot));
    ctx.runtime.aux = ((slot + 1) % MAX_NUM_COLORS) as u8;
    if ctx.runtime.aux == 0 {
        ctx.set_cycle();
    }
    delay
}

/// Pixel blocks that breathe between two colors at their own pace
///
/// Each block's phase and rate come from a fixed pseudo-random sequence, so
/// the pattern is identical on every reset.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn twinkle_fox<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let size = ctx.block_size().pixels();
    let [first, second, third] = [ctx.color(0), ctx.color(1), ctx.color(2)];
    let call = ctx.runtime.call_count;
    let mut seed: u16 = 0;
    let mut next = || {
        seed = seed.wrapping_mul(2053).wrapping_add(13849);
        seed.wrapping_add(seed >> 8)
    };

    let mut index = 0;
    while index < ctx.len() {
        let init = next() & 0xFF;
        let increment = u32::from(((next() & 0x07) + 1) * 2);
        let blend_index = (u32::from(init) + call.wrapping_mul(increment)) & 0xFF;
        let amount = sine8(blend_index as u8);

        let color = if first == Color::BLACK {
            color_blend(color_wheel(init as u8), second, amount)
        } else if third != Color::BLACK && init >= 128 {
            color_blend(third, second, amount)
        } else {
            color_blend(first, second, amount)
        };
        ctx.fill(color, index, size);
        index = index.saturating_add(size);
    }
    ctx.set_cycle();
    ctx.speed() / 32
}
