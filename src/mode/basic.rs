//! Whole-segment modes: solid colors, blinking, breathing and rainbows

use super::ModeContext;
use crate::color::{Color, color_blend, color_wheel, random_wheel_index};

const BREATH_MIN: u32 = 15;
const BREATH_MAX: u32 = 512 - BREATH_MIN;
const TRIFADE_STEPS: u32 = 768;

pub(super) fn static_color<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.fill_segment(ctx.color(0));
    ctx.set_cycle();
    ctx.speed()
}

pub(super) fn blink<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.blink(ctx.color(0), ctx.color(1), false)
}

pub(super) fn blink_rainbow<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = call_wheel(ctx);
    ctx.blink(color, ctx.color(1), false)
}

pub(super) fn strobe<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.blink(ctx.color(0), ctx.color(1), true)
}

pub(super) fn strobe_rainbow<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = call_wheel(ctx);
    ctx.blink(color, ctx.color(1), true)
}

/// Bursts of `2 * (speed / 100 + 1)` flashes followed by a pause
#[allow(clippy::cast_possible_truncation)]
pub(super) fn multi_strobe<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.fill_segment(ctx.color(1));
    let speed = u32::from(ctx.speed());
    let mut delay = 200 + (9 - speed % 10) * 100;
    let count = 2 * (speed / 100 + 1);
    if ctx.runtime.step < count {
        if ctx.runtime.step & 1 == 0 {
            ctx.fill_segment(ctx.color(0));
            delay = 20;
        } else {
            delay = 50;
        }
    }
    ctx.runtime.step = (ctx.runtime.step + 1) % (count + 1);
    if ctx.runtime.step == 0 {
        ctx.set_cycle();
    }
    delay as u16
}

/// "Standby" breathing between the background and the primary color
#[allow(clippy::cast_possible_truncation)]
pub(super) fn breath<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let mut lum = ctx.runtime.step;
    if lum > 255 {
        lum = 511 - lum;
    }
    let delay = match lum {
        BREATH_MIN => 970,
        0..=25 => 38,
        26..=50 => 36,
        51..=75 => 28,
        76..=100 => 20,
        101..=125 => 14,
        126..=150 => 11,
        _ => 10,
    };
    let color = color_blend(ctx.color(1), ctx.color(0), lum as u8);
    ctx.fill_segment(color);

    ctx.runtime.step += 2;
    if ctx.runtime.step > BREATH_MAX {
        ctx.runtime.step = BREATH_MIN;
        ctx.set_cycle();
    }
    delay
}

/// Triangle-wave fade between the primary and background colors
#[allow(clippy::cast_possible_truncation)]
pub(super) fn fade<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let mut lum = ctx.runtime.step;
    if lum > 255 {
        lum = 511 - lum;
    }
    let color = color_blend(ctx.color(0), ctx.color(1), lum as u8);
    ctx.fill_segment(color);

    ctx.runtime.step += 4;
    if ctx.runtime.step > 511 {
        ctx.runtime.step = 0;
        ctx.set_cycle();
    }
    ctx.speed() / 128
}

/// Fade through all three color slots in turn
#[allow(clippy::cast_possible_truncation)]
pub(super) fn trifade<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let step = ctx.runtime.step % TRIFADE_STEPS;
    let phase = (step / 256) as usize;
    let from = ctx.color(phase);
    let to = ctx.color((phase + 1) % 3);
    let color = color_blend(from, to, (step % 256) as u8);
    ctx.fill_segment(color);

    ctx.runtime.step = step + 4;
    if ctx.runtime.step >= TRIFADE_STEPS {
        ctx.runtime.step = 0;
        ctx.set_cycle();
    }
    ctx.speed() / 128
}

pub(super) fn color_wipe<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.color_wipe(ctx.color(0), ctx.color(1), false)
}

pub(super) fn color_wipe_inverse<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.color_wipe(ctx.color(1), ctx.color(0), false)
}

pub(super) fn color_wipe_reverse<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.color_wipe(ctx.color(0), ctx.color(1), true)
}

pub(super) fn color_wipe_reverse_inverse<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.color_wipe(ctx.color(1), ctx.color(0), true)
}

/// Wipe on a new random hue at the start of every half cycle
pub(super) fn color_wipe_random<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = half_cycle_wheel(ctx);
    ctx.color_wipe(color, color, false).saturating_mul(2)
}

/// Like [`color_wipe_random`] but sweeping back and forth
pub(super) fn color_sweep_random<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = half_cycle_wheel(ctx);
    ctx.color_wipe(color, color, true).saturating_mul(2)
}

pub(super) fn random_color<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.runtime.aux = random_wheel_index(ctx.random, ctx.runtime.aux);
    ctx.fill_segment(color_wheel(ctx.runtime.aux));
    ctx.set_cycle();
    ctx.speed()
}

/// Randomize every pixel once, then one random pixel per frame
pub(super) fn single_dynamic<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    if ctx.runtime.call_count == 0 {
        for i in 0..ctx.len() {
            let color = color_wheel(ctx.random.next_u8());
            ctx.set_pixel(i, color);
        }
    }
    let index = ctx.random.below_u16(ctx.len());
    let color = color_wheel(ctx.random.next_u8());
    ctx.set_pixel(index, color);
    ctx.set_cycle();
    ctx.speed()
}

pub(super) fn multi_dynamic<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    for i in 0..ctx.len() {
        let color = color_wheel(ctx.random.next_u8());
        ctx.set_pixel(i, color);
    }
    ctx.set_cycle();
    ctx.speed()
}

/// Whole segment cycling through the color wheel
#[allow(clippy::cast_possible_truncation)]
pub(super) fn rainbow<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.fill_segment(color_wheel(ctx.runtime.step as u8));
    advance_wheel_step(ctx);
    ctx.speed() / 256
}

/// Full rainbow spread over the segment, rotating
#[allow(clippy::cast_possible_truncation)]
pub(super) fn rainbow_cycle<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let len = u32::from(ctx.len());
    for i in 0..ctx.len() {
        let position = (u32::from(i) * 256 / len + ctx.runtime.step) & 0xFF;
        ctx.set_pixel(i, color_wheel(position as u8));
    }
    advance_wheel_step(ctx);
    ctx.speed() / 256
}

fn advance_wheel_step<const E: usize>(ctx: &mut ModeContext<'_, E>) {
    ctx.runtime.step = (ctx.runtime.step + 1) & 0xFF;
    if ctx.runtime.step == 0 {
        ctx.set_cycle();
    }
}

#[allow(clippy::cast_possible_truncation)]
fn call_wheel<const E: usize>(ctx: &ModeContext<'_, E>) -> Color {
    color_wheel(ctx.runtime.call_count as u8)
}

fn half_cycle_wheel<const E: usize>(ctx: &mut ModeContext<'_, E>) -> Color {
    if ctx.runtime.step % u32::from(ctx.len()) == 0 {
        ctx.runtime.aux = random_wheel_index(ctx.random, ctx.runtime.aux);
    }
    color_wheel(ctx.runtime.aux)
}
