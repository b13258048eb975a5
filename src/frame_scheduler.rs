//! Frame scheduling and timing utilities.
//!
//! Provides portable pacing for the segment engine without async/await or
//! platform-specific timers. The caller is responsible for sleeping between
//! ticks.

use embassy_time::{Duration, Instant};

use crate::buffer::PixelBuffer;
use crate::driver::OutputDriver;
use crate::engine::LightEngine;

/// Poll interval used when no segment is waiting on a deadline (stopped
/// engine or empty registry).
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// Whether the tick pushed a frame to the strip.
    pub rendered: bool,
    /// The instant the next segment becomes due.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if a segment is already due).
    pub sleep_duration: Duration,
}

/// Portable scheduler that drives a [`LightEngine`] from a host loop.
///
/// Every segment keeps its own deadline, so the scheduler does not run at a
/// fixed rate. Each tick services the engine and reports how long the caller
/// can sleep before the earliest segment needs another frame.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(engine);
/// scheduler.engine_mut().start();
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<
    B,
    D,
    const SEGMENTS: usize = 10,
    const ACTIVE: usize = 10,
    const ENTITIES: usize = 8,
> {
    engine: LightEngine<B, D, SEGMENTS, ACTIVE, ENTITIES>,
    idle_interval: Duration,
}

impl<B, D, const SEGMENTS: usize, const ACTIVE: usize, const ENTITIES: usize>
    FrameScheduler<B, D, SEGMENTS, ACTIVE, ENTITIES>
where
    B: PixelBuffer,
    D: OutputDriver,
{
    /// Create a new frame scheduler.
    ///
    /// Uses [`IDLE_POLL_INTERVAL`] while there is nothing to wait for.
    pub fn new(engine: LightEngine<B, D, SEGMENTS, ACTIVE, ENTITIES>) -> Self {
        Self::with_idle_interval(engine, IDLE_POLL_INTERVAL)
    }

    /// Create a new frame scheduler with a custom idle poll interval.
    pub fn with_idle_interval(
        engine: LightEngine<B, D, SEGMENTS, ACTIVE, ENTITIES>,
        idle_interval: Duration,
    ) -> Self {
        Self {
            engine,
            idle_interval,
        }
    }

    /// Service the engine once and return timing information.
    ///
    /// This method:
    /// 1. Runs every due segment and flushes the strip if anything changed
    /// 2. Finds the earliest pending segment deadline
    /// 3. Falls back to the idle interval when nothing is pending
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let rendered = self.engine.service(now);
        let sleep_duration = self
            .engine
            .time_to_next_frame(now)
            .unwrap_or(self.idle_interval);

        FrameResult {
            rendered,
            next_deadline: now + sleep_duration,
            sleep_duration,
        }
    }

    /// Get a reference to the engine.
    pub fn engine(&self) -> &LightEngine<B, D, SEGMENTS, ACTIVE, ENTITIES> {
        &self.engine
    }

    /// Get a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut LightEngine<B, D, SEGMENTS, ACTIVE, ENTITIES> {
        &mut self.engine
    }

    /// Release the engine.
    pub fn into_engine(self) -> LightEngine<B, D, SEGMENTS, ACTIVE, ENTITIES> {
        self.engine
    }
}
