#![no_std]

pub mod buffer;
pub mod color;
pub mod driver;
pub mod engine;
pub mod frame_scheduler;
pub mod gamma;
pub mod math8;
pub mod mode;
pub mod random;
pub mod segment;
pub mod signal;

pub use buffer::{FrameBuffer, PixelBuffer};
pub use color::{Color, Rgb};
pub use driver::{OutputDriver, SmartLedsOutput};
pub use engine::{LightEngine, LightEngineConfig, ShowFn};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use gamma::gamma8;
pub use mode::{CustomMode, ModeContext, ModeFn, ModeId};
pub use random::Random8;
pub use segment::{
    BlockSize, Direction, ExternalData, FadeRate, Runtime, Segment, SegmentOptions,
};
pub use signal::TriggerSignal;

pub use embassy_time::{Duration, Instant};
