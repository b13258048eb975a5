//! Fireworks, flames and ballistic modes

use super::ModeContext;
use crate::color::{Color, color_wheel};
use crate::segment::MAX_NUM_COLORS;

/// Velocity lost per frame by a popcorn kernel, in 1/256 pixel units
const POPCORN_GRAVITY: i32 = 20;
/// Highest pixel a popcorn kernel position can address (8.8 fixed point)
const POPCORN_CEILING: u16 = 255;

pub(super) fn fireworks<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = random_slot_color(ctx);
    ctx.fireworks(color)
}

pub(super) fn fireworks_random<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let color = color_wheel(ctx.random.next_u8());
    ctx.fireworks(color)
}

pub(super) fn rainbow_fireworks<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.rainbow_fireworks()
}

pub(super) fn fire_flicker<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.fire_flicker(3)
}

pub(super) fn fire_flicker_soft<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.fire_flicker(6)
}

pub(super) fn fire_flicker_intense<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    ctx.fire_flicker(1)
}

/// Kernels that pop up from the segment's leading edge and fall back
///
/// Each kernel uses two scratch slots: height and signed velocity, both in
/// 1/256 pixel units. A kernel resting at height 0 may be relaunched.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub(super) fn popcorn<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let kernels = E / 2;
    let ceiling = ctx.len().min(POPCORN_CEILING);
    let peak = f32::from(ceiling) * 256.0;
    let launch_max = libm::sqrtf(2.0 * POPCORN_GRAVITY as f32 * peak) as u16;

    ctx.fill_segment(ctx.color(1));
    for k in 0..kernels {
        let mut height = i32::from(ctx.runtime.scratch[2 * k]);
        let mut velocity = i32::from(ctx.runtime.scratch[2 * k + 1] as i16);

        if height == 0 && velocity == 0 {
            if ctx.random.below_u8(16) != 0 {
                continue;
            }
            velocity = i32::from(ctx.random.range_u16(launch_max / 2, launch_max));
        }

        velocity -= POPCORN_GRAVITY;
        height += velocity;
        if height <= 0 {
            height = 0;
            velocity = 0;
            ctx.set_cycle();
        }
        ctx.runtime.scratch[2 * k] = height.min(i32::from(u16::MAX)) as u16;
        ctx.runtime.scratch[2 * k + 1] = velocity as i16 as u16;

        let color = match ctx.color(k % MAX_NUM_COLORS) {
            Color::BLACK => ctx.color(0),
            color => color,
        };
        ctx.set_pixel_directed((height >> 8) as u16, color);
    }
    ctx.speed() / 64
}

/// One of the non-black color slots, picked at random
///
/// Falls back to black when every slot is black.
#[allow(clippy::cast_possible_truncation)]
fn random_slot_color<const E: usize>(ctx: &mut ModeContext<'_, E>) -> Color {
    let colors = ctx.segment().colors;
    let lit = colors.iter().filter(|&&color| color != Color::BLACK).count();
    if lit == 0 {
        return Color::BLACK;
    }
    let pick = usize::from(ctx.random.below_u8(lit as u8));
    colors
        .into_iter()
        .filter(|&color| color != Color::BLACK)
        .nth(pick)
        .unwrap_or(Color::BLACK)
}
