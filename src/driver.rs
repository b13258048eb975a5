//! Hardware output abstraction

#[cfg(feature = "esp32-log")]
use esp_println::println;
use smart_leds::{RGB8, SmartLedsWrite, brightness};

use crate::color::Color;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The engine calls it once per service tick that produced output.
pub trait OutputDriver {
    /// Push a frame to the strip, scaled by `brightness`
    fn write(&mut self, pixels: &[Color], brightness: u8);
}

/// Output driver for any `smart-leds` compatible device
///
/// Drops the white channel and applies brightness with
/// [`smart_leds::brightness`]. Device errors are logged and the frame is
/// skipped.
pub struct SmartLedsOutput<W> {
    writer: W,
}

impl<W> SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn write(&mut self, pixels: &[Color], level: u8) {
        let frame = brightness(pixels.iter().map(|color| color.to_rgb()), level);
        if self.writer.write(frame).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[SmartLedsOutput.write] device rejected frame");
        }
    }
}
