//! Shift-register and progressive-fill modes

use super::ModeContext;
use crate::color::{Color, color_blend, color_wheel, random_wheel_index};
use crate::math8::sine8;
use crate::segment::MAX_NUM_COLORS;

/// Widest counter the bits mode displays
const BITS_WIDTH: u16 = 32;
/// Largest random hue step taken by running random2
const HUE_DRIFT: u8 = 16;

pub(super) fn running_color<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.running(ctx.color(0), ctx.color(1))
}

pub(super) fn running_red_blue<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.running(Color::RED, Color::BLUE)
}

pub(super) fn merry_christmas<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.running(Color::RED, Color::GREEN)
}

pub(super) fn halloween<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.running(Color::PURPLE, Color::ORANGE)
}

/// Running blocks, each in a new random hue
pub(super) fn running_random<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let size = u32::from(ctx.block_size().pixels()) * 2;
    if ctx.runtime.step % size == 0 {
        ctx.runtime.aux = random_wheel_index(ctx.random, ctx.runtime.aux);
    }
    let color = color_wheel(ctx.runtime.aux);
    ctx.running(color, color)
}

/// Running pixels whose hue drifts by a small random amount every step
pub(super) fn running_random2<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = color_wheel(ctx.runtime.aux);
    let drift = ctx.random.below_u8(HUE_DRIFT);
    ctx.runtime.aux = ctx.runtime.aux.wrapping_add(drift);
    ctx.running(color, color)
}

/// Sine-shaped bands blending the primary into the background color
#[allow(clippy::cast_possible_truncation)]
pub(super) fn running_lights<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let len = ctx.len();
    let size = u32::from(ctx.block_size().pixels());
    let increment = (((256 / u32::from(len)) * size) as u8).max(1);
    let step = ctx.runtime.step;
    for i in 0..len {
        let angle = (u32::from(i) + step).wrapping_mul(u32::from(increment));
        let lum = sine8(angle as u8);
        let color = color_blend(ctx.color(0), ctx.color(1), lum);
        if ctx.is_reverse() {
            ctx.set_pixel(i, color);
        } else {
            ctx.set_pixel(len - 1 - i, color);
        }
    }
    ctx.runtime.step = (step + 1) % 256;
    if ctx.runtime.step == 0 {
        ctx.set_cycle();
    }
    ctx.speed_div(u32::from(len))
}

/// Drops fall from the far end and stack up until the segment is full
///
/// `aux3` holds the stack height, `step` the distance the current drop has
/// fallen.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn filler_up<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let len = ctx.len();
    let delay = ctx.speed_div(u32::from(len));
    let level = ctx.runtime.aux3;
    if level >= len {
        ctx.fill_segment(ctx.color(1));
        ctx.runtime.aux3 = 0;
        ctx.runtime.step = 0;
        ctx.set_cycle();
        return delay;
    }

    let drop = (len - 1).saturating_sub(ctx.runtime.step as u16);
    let (fill, background) = (ctx.color(0), ctx.color(1));
    for i in 0..len {
        let color = if i < level || i == drop { fill } else { background };
        ctx.set_pixel_directed(i, color);
    }

    if drop <= level {
        ctx.runtime.aux3 = level + 1;
        ctx.runtime.step = 0;
    } else {
        ctx.runtime.step += 1;
    }
    delay
}

/// Binary counter, least significant bit at the leading edge
pub(super) fn bits<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let len = ctx.len();
    let value = ctx.runtime.step;
    let (on, off) = (ctx.color(0), ctx.color(1));
    for i in 0..len {
        let lit = i < BITS_WIDTH && (value >> i) & 1 == 1;
        ctx.set_pixel_directed(i, if lit { on } else { off });
    }

    let width = len.min(BITS_WIDTH);
    ctx.runtime.step = if width == BITS_WIDTH {
        value.wrapping_add(1)
    } else {
        (value + 1) & ((1 << width) - 1)
    };
    if ctx.runtime.step == 0 {
        ctx.set_cycle();
    }
    ctx.speed() / 8
}

/// Each color slot wiped over the previous one like turning pages
///
/// Pages alternate direction; a cycle is one pass through all slots.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn flipbook<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let len = ctx.len();
    let page = usize::from(ctx.runtime.aux) % MAX_NUM_COLORS;
    let position = ctx.runtime.step as u16;
    let index = if page % 2 == 0 {
        position
    } else {
        len - 1 - position.min(len - 1)
    };
    ctx.set_pixel_directed(index, ctx.color(page));

    ctx.runtime.step += 1;
    if ctx.runtime.step >= u32::from(len) {
        ctx.runtime.step = 0;
        ctx.runtime.aux = ((page + 1) % MAX_NUM_COLORS) as u8;
        if ctx.runtime.aux == 0 {
            ctx.set_cycle();
        }
    }
    ctx.speed_div(u32::from(len))
}
