//! Theater and block chase modes

use super::ModeContext;
use crate::color::{Color, color_wheel, random_wheel_index};

/// Flashes shown before a flash chase advances by one pixel
const FLASH_COUNT: u32 = 4;

pub(super) fn theater_chase<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.tricolor_chase(ctx.color(0), ctx.color(1), ctx.color(1))
}

pub(super) fn theater_chase_rainbow<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.runtime.aux = ctx.runtime.aux.wrapping_add(1);
    let color = color_wheel(ctx.runtime.aux);
    ctx.tricolor_chase(color, ctx.color(1), ctx.color(1))
}

pub(super) fn tricolor_chase<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.tricolor_chase(ctx.color(0), ctx.color(1), ctx.color(2))
}

pub(super) fn circus_combustus<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.tricolor_chase(Color::RED, Color::WHITE, Color::BLACK)
}

pub(super) fn chase_white<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.chase(ctx.color(1), ctx.color(0), ctx.color(0))
}

pub(super) fn chase_color<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.chase(ctx.color(0), Color::WHITE, Color::WHITE)
}

pub(super) fn chase_blackout<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.chase(ctx.color(0), Color::BLACK, Color::BLACK)
}

pub(super) fn bicolor_chase<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.chase(ctx.color(0), ctx.color(1), ctx.color(2))
}

/// White chase whose leading block takes a new random hue every lap
pub(super) fn chase_random<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    if ctx.runtime.step == 0 {
        ctx.runtime.aux = random_wheel_index(ctx.random, ctx.runtime.aux);
    }
    ctx.chase(color_wheel(ctx.runtime.aux), Color::WHITE, Color::WHITE)
}

pub(super) fn chase_rainbow<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = lap_wheel(ctx, ctx.runtime.step);
    ctx.chase(color, Color::WHITE, Color::WHITE)
}

pub(super) fn chase_blackout_rainbow<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = lap_wheel(ctx, ctx.runtime.step);
    ctx.chase(color, Color::BLACK, Color::BLACK)
}

/// White leading block followed by two rainbow blocks
#[allow(clippy::cast_possible_truncation)]
pub(super) fn chase_rainbow_white<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let len = u32::from(ctx.len());
    let n = ctx.runtime.step;
    let m = (n + 1) % len;
    let call = ctx.runtime.call_count & 0xFF;
    let second = color_wheel(((n * 256 / len + call) & 0xFF) as u8);
    let third = color_wheel(((m * 256 / len + call) & 0xFF) as u8);
    ctx.chase(Color::WHITE, second, third)
}

/// Background with a flashing pair of pixels travelling along it
pub(super) fn chase_flash<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let flash_step = ctx.runtime.call_count % (FLASH_COUNT * 2 + 1);
    if flash_step < FLASH_COUNT * 2 {
        let color = if flash_step % 2 == 0 {
            ctx.color(0)
        } else {
            ctx.color(1)
        };
        let (n, m) = flash_pair(ctx);
        ctx.set_pixel_directed(n, color);
        ctx.set_pixel_directed(m, color);
        return 30;
    }
    advance_flash(ctx);
    ctx.speed_div(u32::from(ctx.len()))
}

/// Random-hue fill that grows behind a white flashing pair
pub(super) fn chase_flash_random<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let flash_step = ctx.runtime.call_count % (FLASH_COUNT * 2 + 1);
    let color = color_wheel(ctx.runtime.aux);
    let (n, m) = flash_pair(ctx);
    for i in 0..n {
        ctx.set_pixel_directed(i, color);
    }

    if flash_step < FLASH_COUNT * 2 {
        if flash_step % 2 == 0 {
            ctx.set_pixel_directed(n, Color::WHITE);
            ctx.set_pixel_directed(m, Color::WHITE);
            20
        } else {
            ctx.set_pixel_directed(n, color);
            ctx.set_pixel_directed(m, Color::BLACK);
            30
        }
    } else {
        advance_flash(ctx);
        ctx.speed_div(u32::from(ctx.len()))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn flash_pair<const E: usize>(ctx: &ModeContext<'_, E>) -> (u16, u16) {
    let len = u32::from(ctx.len());
    let n = ctx.runtime.step % len;
    (n as u16, ((n + 1) % len) as u16)
}

fn advance_flash<const E: usize>(ctx: &mut ModeContext<'_, E>) {
    ctx.runtime.step = (ctx.runtime.step + 1) % u32::from(ctx.len());
    if ctx.runtime.step == 0 {
        ctx.runtime.aux = random_wheel_index(ctx.random, ctx.runtime.aux);
        ctx.set_cycle();
    }
}

/// Wheel color for a chase position, rotating with the call counter
#[allow(clippy::cast_possible_truncation)]
fn lap_wheel<const E: usize>(ctx: &ModeContext<'_, E>, position: u32) -> Color {
    let separation = (256 / u32::from(ctx.len())) & 0xFF;
    let index = ctx.runtime.call_count & 0xFF;
    color_wheel((position.wrapping_mul(separation).wrapping_add(index) & 0xFF) as u8)
}
