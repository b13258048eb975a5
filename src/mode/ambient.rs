//! Data-driven and rhythmic modes

use super::ModeContext;
use crate::color::Color;

/// Frames in one heartbeat period
const HEARTBEAT_FRAMES: u32 = 40;
/// Frames at which the two beats of a heartbeat fire
const HEARTBEAT_BEATS: [u32; 2] = [0, 6];
/// Level meter zone boundaries in percent of the band length
const VU_WARN: u32 = 60;
const VU_PEAK: u32 = 90;

/// Level meter with one band per external data channel
///
/// Without an external source the meter follows a random walk in `aux`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn vu_meter<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let source = ctx.runtime.external_data().filter(|data| !data.is_empty());
    if source.is_none() {
        let delta = i16::from(ctx.random.below_u8(64)) - 32;
        ctx.runtime.aux = (i16::from(ctx.runtime.aux) + delta).clamp(0, 255) as u8;
    }
    let bands = source.map_or(1, |data| data.len());
    let len = u32::from(ctx.len());
    let band_len = (len / bands as u32).max(1);
    let background = ctx.color(1);

    for band in 0..bands {
        let level = source.map_or(ctx.runtime.aux, |data| data.level(band));
        let lit = band_len * u32::from(level) / 255;
        for j in 0..band_len {
            let index = band as u32 * band_len + j;
            if index >= len {
                break;
            }
            let color = if j >= lit {
                background
            } else {
                match j * 100 / band_len {
                    percent if percent < VU_WARN => Color::GREEN,
                    percent if percent < VU_PEAK => Color::YELLOW,
                    _ => Color::RED,
                }
            };
            ctx.set_pixel_directed(index as u16, color);
        }
    }
    ctx.set_cycle();
    ctx.speed()
}

/// Double pulse radiating outward from the segment center
pub(super) fn heartbeat<const E: usize>(ctx: &mut ModeContext<'_, E>) -> u16 {
    let len = ctx.len();
    let mid = len / 2;
    ctx.copy_pixels(mid + 1, mid, len - mid - 1);
    ctx.copy_pixels(0, 1, mid.saturating_sub(1));
    ctx.fade_out();

    if HEARTBEAT_BEATS.contains(&ctx.runtime.step) {
        let color = ctx.color(0);
        ctx.set_pixel(mid, color);
        if mid > 0 {
            ctx.set_pixel(mid - 1, color);
        }
    }

    ctx.runtime.step = (ctx.runtime.step + 1) % HEARTBEAT_FRAMES;
    if ctx.runtime.step == 0 {
        ctx.set_cycle();
    }
    ctx.speed_div(HEARTBEAT_FRAMES)
}
