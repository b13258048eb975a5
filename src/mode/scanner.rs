//! Moving-dot modes: scanners, comets and oscillators

use super::ModeContext;
use crate::color::{Color, color_wheel};

/// Oscillators drawn by the oscillator mode (two scratch slots each)
const OSCILLATORS: usize = 3;

pub(super) fn scan<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.scan(ctx.color(0), ctx.color(1), false)
}

pub(super) fn dual_scan<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.scan(ctx.color(0), ctx.color(1), true)
}

pub(super) fn larson_scanner<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = ctx.color(0);
    larson(ctx, color)
}

/// Larson scanner whose eye slowly walks the color wheel
pub(super) fn rainbow_larson<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = color_wheel(ctx.runtime.aux);
    ctx.runtime.aux = ctx.runtime.aux.wrapping_add(4);
    larson(ctx, color)
}

/// Fading trail bouncing between the segment ends
#[allow(clippy::cast_possible_truncation)]
fn larson<const E: usize>(ctx: &mut ModeContext<'_, E>, color: Color) -> u16 {
    ctx.fade_out();
    let len = u32::from(ctx.len());
    let step = ctx.runtime.step;
    let index = if step < len { step } else { len * 2 - step - 2 };
    ctx.set_pixel_directed(index as u16, color);

    ctx.runtime.step += 1;
    if ctx.runtime.step >= (len * 2).saturating_sub(2) {
        ctx.runtime.step = 0;
        ctx.set_cycle();
    }
    ctx.speed_div(len * 2)
}

#[allow(clippy::cast_possible_truncation)]
pub(super) fn comet<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.fade_out();
    ctx.set_pixel_directed(ctx.runtime.step as u16, ctx.color(0));
    ctx.runtime.step = (ctx.runtime.step + 1) % u32::from(ctx.len());
    if ctx.runtime.step == 0 {
        ctx.set_cycle();
    }
    ctx.speed_div(u32::from(ctx.len()))
}

/// Two scanner eyes crossing each other from opposite ends
///
/// The second eye uses the accent color when one is set.
pub(super) fn dual_larson<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.fade_out();
    let len = ctx.len();
    if ctx.runtime.aux == 0 {
        ctx.runtime.aux3 = ctx.runtime.aux3.saturating_add(1);
    } else {
        ctx.runtime.aux3 = ctx.runtime.aux3.saturating_sub(1);
    }
    let position = ctx.runtime.aux3;
    let mirrored = match ctx.color(2) {
        Color::BLACK => ctx.color(0),
        accent => accent,
    };
    ctx.set_pixel(position, ctx.color(0));
    ctx.set_pixel_at(i32::from(len) - 1 - i32::from(position), mirrored);

    if position == 0 || position >= len - 1 {
        ctx.runtime.aux ^= 1;
        if ctx.runtime.aux == 0 {
            ctx.set_cycle();
        }
    }
    ctx.speed_div(u32::from(len) * 2)
}

/// Pair of "eyes" that wander, pause and blink now and then
#[allow(clippy::cast_possible_truncation)]
pub(super) fn icu<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let half = ctx.len() / 2;
    let eyes = ctx.color(0);
    let mut dest = ctx.runtime.step as u16;

    draw_eyes(ctx, dest, half, eyes);
    if ctx.runtime.aux3 == dest {
        if ctx.random.below_u8(6) == 0 {
            draw_eyes(ctx, dest, half, Color::BLACK);
            return 200;
        }
        ctx.runtime.aux3 = ctx.random.below_u16(half);
        ctx.set_cycle();
        return 1000 + ctx.random.below_u16(2000);
    }

    draw_eyes(ctx, dest, half, Color::BLACK);
    if ctx.runtime.aux3 > dest {
        ctx.runtime.step += 1;
        dest += 1;
    } else {
        ctx.runtime.step -= 1;
        dest -= 1;
    }
    draw_eyes(ctx, dest, half, eyes);
    ctx.speed_div(u32::from(ctx.len()))
}

fn draw_eyes<const E: usize>(ctx: &mut ModeContext<'_, E>, position: u16, half: u16, color: Color) {
    ctx.set_pixel(position, color);
    ctx.set_pixel(position.saturating_add(half), color);
}

/// Up to `ENTITIES` comets launched at random over a fading background
///
/// Scratch slot value 0 marks an idle comet, `position + 1` an active one.
pub(super) fn multi_comet<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.fade_out();
    let len = ctx.len();
    let accent = ctx.color(2);
    for i in 0..E {
        let slot = ctx.runtime.scratch[i];
        if slot > 0 && slot - 1 < len {
            let color = if accent != Color::BLACK && i % 2 == 0 {
                accent
            } else {
                ctx.color(0)
            };
            ctx.set_pixel_directed(slot - 1, color);
            ctx.runtime.scratch[i] = slot.saturating_add(1);
        } else if ctx.random.below_u16(len) == 0 {
            ctx.runtime.scratch[i] = 1;
            ctx.set_cycle();
        } else {
            ctx.runtime.scratch[i] = 0;
        }
    }
    ctx.speed_div(u32::from(len))
}

/// Three colored bars bouncing independently, mixed where they overlap
///
/// Each oscillator keeps its pixel position and signed velocity in two
/// scratch slots, seeded on the first call.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub(super) fn oscillator<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let len = ctx.len();
    let count = OSCILLATORS.min(E / 2);
    if ctx.runtime.call_count == 0 {
        for i in 0..count {
            ctx.runtime.scratch[2 * i] = (u32::from(len) * (i as u32 + 1) / 4) as u16;
            let velocity = i as i16 + 1;
            let velocity = if i % 2 == 0 { velocity } else { -velocity };
            ctx.runtime.scratch[2 * i + 1] = velocity as u16;
        }
    }

    ctx.fill_segment(Color::BLACK);
    let width = i32::from((len / 8).max(1));
    let last = i32::from(len) - 1;
    for i in 0..count {
        let mut position = i32::from(ctx.runtime.scratch[2 * i]);
        let mut velocity = i32::from(ctx.runtime.scratch[2 * i + 1] as i16);
        if ctx.random.next_u8() < 8 {
            let magnitude = i32::from(ctx.random.range_u8(1, 4));
            velocity = if velocity < 0 { -magnitude } else { magnitude };
        }

        position += velocity;
        if position <= 0 {
            position = 0;
            velocity = velocity.abs();
            if i == 0 {
                ctx.set_cycle();
            }
        } else if position >= last {
            position = last;
            velocity = -velocity.abs();
        }
        ctx.runtime.scratch[2 * i] = position as u16;
        ctx.runtime.scratch[2 * i + 1] = velocity as i16 as u16;

        let color = ctx.correct(ctx.color(i));
        let from = position - width / 2;
        for pixel in from..from + width {
            if let Ok(pixel) = u16::try_from(pixel) {
                let mixed = Color(ctx.pixel(pixel).0 | color.0);
                ctx.set_pixel_raw(pixel, mixed);
            }
        }
    }
    ctx.speed() / 32
}
