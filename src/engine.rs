//! Segment engine: configuration, registry and the service tick

use embassy_time::{Duration, Instant};
#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::Vec;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::driver::OutputDriver;
use crate::gamma::{GammaFn, gamma8};
use crate::math8::scale8;
use crate::mode::{CustomMode, MAX_CUSTOM_MODES, MODE_COUNT, ModeContext, ModeFn, ModeId};
use crate::random::{DEFAULT_SEED, Random8};
use crate::segment::{
    ActiveRegistry, ExternalData, Runtime, SPEED_MIN, Segment, SegmentOptions, clamp_speed,
};
use crate::signal::TriggerSignal;

/// Brightness applied until the host changes it
pub const DEFAULT_BRIGHTNESS: u8 = 50;

/// Host replacement for the output driver flush
pub type ShowFn = fn(pixels: &[Color], brightness: u8);

/// Configuration for the light engine
#[derive(Clone, Copy)]
pub struct LightEngineConfig {
    /// Initial global brightness handed to the output with every frame
    pub brightness: u8,
    /// Initial random seed
    pub seed: u16,
    /// Channel correction used by segments with the gamma option
    pub gamma: GammaFn,
    /// Pause before every flush, letting the strip latch the previous frame
    pub settle: Duration,
}

impl Default for LightEngineConfig {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            seed: DEFAULT_SEED,
            gamma: gamma8,
            settle: Duration::from_millis(1),
        }
    }
}

/// Light Engine - owns the segments and drives their modes
///
/// `SEGMENTS` bounds the configured segments, `ACTIVE` the registry slots
/// (one runtime each) and `ENTITIES` the per-runtime scratch used by
/// multi-entity modes.
pub struct LightEngine<
    B,
    D,
    const SEGMENTS: usize = 10,
    const ACTIVE: usize = 10,
    const ENTITIES: usize = 8,
> {
    // External dependencies
    buffer: B,
    driver: D,
    custom_show: Option<ShowFn>,
    trigger_signal: Option<&'static TriggerSignal>,

    // Configuration
    segments: [Segment; SEGMENTS],
    segment_count: usize,
    custom_modes: [Option<CustomMode<ENTITIES>>; MAX_CUSTOM_MODES],
    gamma: GammaFn,
    settle: Duration,
    brightness: u8,

    // Internal state
    registry: ActiveRegistry<ACTIVE>,
    runtimes: [Runtime<ENTITIES>; ACTIVE],
    random: Random8,
    running: bool,
    triggered: bool,
}

impl<B, D, const SEGMENTS: usize, const ACTIVE: usize, const ENTITIES: usize>
    LightEngine<B, D, SEGMENTS, ACTIVE, ENTITIES>
where
    B: PixelBuffer,
    D: OutputDriver,
{
    /// Create a stopped engine with segment 0 spanning the whole buffer
    pub fn new(buffer: B, driver: D, config: &LightEngineConfig) -> Self {
        let mut engine = Self {
            buffer,
            driver,
            custom_show: None,
            trigger_signal: None,
            segments: [Segment::default(); SEGMENTS],
            segment_count: 0,
            custom_modes: [None; MAX_CUSTOM_MODES],
            gamma: config.gamma,
            settle: config.settle,
            brightness: config.brightness,
            registry: ActiveRegistry::new(),
            runtimes: core::array::from_fn(|_| Runtime::new()),
            random: Random8::new(config.seed),
            running: false,
            triggered: false,
        };
        let last = engine.last_pixel();
        engine.set_segment(0, Segment::new(0, last));
        engine
    }

    /// Advance every due segment and flush once if anything changed
    ///
    /// Returns whether a frame was pushed. A paused engine does nothing and
    /// keeps any pending trigger for the next running tick.
    #[allow(clippy::cast_possible_truncation)]
    pub fn service(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        if self.trigger_signal.is_some_and(TriggerSignal::take) {
            self.triggered = true;
        }

        let now_ms = now.as_millis() as u32;
        let mut did_show = false;
        for slot in 0..ACTIVE {
            let Some(segment) = self
                .registry
                .get(slot)
                .and_then(|index| self.segments.get(usize::from(index)).copied())
            else {
                continue;
            };
            let runtime = &mut self.runtimes[slot];
            runtime.clear_frame_cycle();
            if !self.triggered && !runtime.is_due(now_ms) {
                continue;
            }
            runtime.set_frame();
            did_show = true;

            let custom = segment
                .mode
                .custom_slot()
                .and_then(|index| self.custom_modes.get(index).copied().flatten());
            let mut ctx = ModeContext::new(
                &segment,
                runtime,
                &mut self.buffer,
                &mut self.random,
                self.gamma,
                self.triggered,
            );
            let delay = match custom {
                Some(custom) => (custom.func)(&mut ctx),
                None => segment.mode.run(&mut ctx),
            };

            let runtime = &mut self.runtimes[slot];
            runtime.next_due_time = now_ms.wrapping_add(u32::from(delay.max(SPEED_MIN)));
            runtime.call_count = runtime.call_count.wrapping_add(1);
        }

        if did_show {
            self.show();
        }
        self.triggered = false;
        did_show
    }

    /// Time until the earliest active segment is due
    ///
    /// `None` when the engine is stopped or has no active segment.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn time_to_next_frame(&self, now: Instant) -> Option<Duration> {
        if !self.running {
            return None;
        }
        if self.triggered || self.trigger_signal.is_some_and(TriggerSignal::is_raised) {
            return Some(Duration::from_millis(0));
        }
        let now_ms = now.as_millis() as u32;
        self.registry
            .iter()
            .map(|(slot, _)| {
                let runtime = &self.runtimes[slot];
                if runtime.is_due(now_ms) {
                    0
                } else {
                    runtime.next_due_time.wrapping_sub(now_ms)
                }
            })
            .min()
            .map(|ms| Duration::from_millis(u64::from(ms)))
    }

    /// Push the buffer to the strip through the custom show hook or the driver
    pub fn show(&mut self) {
        if self.settle.as_ticks() > 0 {
            embassy_time::block_for(self.settle);
        }
        match self.custom_show {
            Some(show) => show(self.buffer.pixels(), self.brightness),
            None => self.driver.write(self.buffer.pixels(), self.brightness),
        }
    }

    /// Reset every runtime and start servicing
    pub fn start(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[LightEngine.start] starting");
        self.reset_segment_runtimes();
        self.running = true;
    }

    /// Stop servicing and blank the strip
    pub fn stop(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[LightEngine.stop] stopping");
        self.running = false;
        self.buffer.clear();
        self.show();
    }

    /// Stop servicing, keeping the last frame on the strip
    pub fn pause(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[LightEngine.pause] pausing");
        self.running = false;
    }

    pub fn resume(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[LightEngine.resume] resuming");
        self.running = true;
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Force a frame on every active segment at the next running tick
    pub fn trigger(&mut self) {
        self.triggered = true;
    }

    pub const fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Sample `signal` at the start of every running tick
    pub fn attach_trigger(&mut self, signal: &'static TriggerSignal) {
        self.trigger_signal = Some(signal);
    }

    /// Configure segment `index` and activate it when a slot exists for it
    ///
    /// An already active segment keeps its slot and restarts its animation.
    ///
    /// Ignored when `index` is beyond the segment capacity.
    pub fn set_segment(&mut self, index: u8, segment: Segment) {
        if !self.store_segment(index, segment) {
            return;
        }
        if self.is_active(index) {
            self.reset_segment_runtime(index);
        } else if usize::from(index) < ACTIVE {
            self.add_active_segment(index);
        }
    }

    /// Configure segment `index` without scheduling it
    pub fn set_idle_segment(&mut self, index: u8, segment: Segment) {
        if self.store_segment(index, segment) {
            self.remove_active_segment(index);
        }
    }

    pub fn segment(&self, index: u8) -> Option<&Segment> {
        self.segments.get(usize::from(index))
    }

    /// Configured segments (active and idle)
    pub fn segments(&self) -> &[Segment] {
        &self.segments[..self.segment_count]
    }

    pub const fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Change the logical segment count, clamped to the capacity
    pub fn set_segment_count(&mut self, count: usize) {
        self.segment_count = count.min(SEGMENTS);
    }

    /// Drop every segment configuration and empty the registry
    pub fn reset_segments(&mut self) {
        self.segments = [Segment::default(); SEGMENTS];
        self.segment_count = 0;
        self.registry.clear();
        self.reset_segment_runtimes();
    }

    /// Schedule segment `index`, resetting its runtime
    ///
    /// Already active segments and a full registry are left untouched.
    pub fn add_active_segment(&mut self, index: u8) {
        if usize::from(index) >= SEGMENTS {
            return;
        }
        if let Some((slot, true)) = self.registry.add(index) {
            #[cfg(feature = "esp32-log")]
            println!("[LightEngine.add_active_segment] segment {} -> slot {}", index, slot);
            self.runtimes[slot].reset();
        }
    }

    /// Stop scheduling segment `index`; its configuration is kept
    pub fn remove_active_segment(&mut self, index: u8) {
        if let Some(_slot) = self.registry.remove(index) {
            #[cfg(feature = "esp32-log")]
            println!("[LightEngine.remove_active_segment] segment {} left slot {}", index, _slot);
        }
    }

    /// Replace `old` with `new` in its slot, letting the pending frame time stand
    ///
    /// Ignored when `new` is already active or `old` is not.
    pub fn swap_active_segment(&mut self, old: u8, new: u8) {
        if usize::from(new) >= SEGMENTS {
            return;
        }
        if let Some(slot) = self.registry.swap(old, new) {
            #[cfg(feature = "esp32-log")]
            println!("[LightEngine.swap_active_segment] slot {}: {} -> {}", slot, old, new);
            self.runtimes[slot].reset_animation();
        }
    }

    pub fn is_active(&self, index: u8) -> bool {
        self.registry.is_active(index)
    }

    /// Active segment indices in scheduling order
    pub fn active_segments(&self) -> Vec<u8, ACTIVE> {
        self.registry.iter().map(|(_, index)| index).collect()
    }

    /// Raw registry view, empty slots as [`INACTIVE_SEGMENT`](crate::segment::INACTIVE_SEGMENT)
    pub fn active_slots(&self) -> [u8; ACTIVE] {
        self.registry.to_raw()
    }

    /// Runtime of an active segment
    pub fn runtime(&self, index: u8) -> Option<&Runtime<ENTITIES>> {
        let slot = self.registry.slot_of(index)?;
        self.runtimes.get(slot)
    }

    /// Zero the runtime of an active segment; inactive segments are ignored
    pub fn reset_segment_runtime(&mut self, index: u8) {
        if let Some(slot) = self.registry.slot_of(index) {
            self.runtimes[slot].reset();
        }
    }

    pub fn reset_segment_runtimes(&mut self) {
        for runtime in &mut self.runtimes {
            runtime.reset();
        }
    }

    /// Whether the segment's mode ran during the last tick
    pub fn is_frame(&self, index: u8) -> bool {
        self.runtime(index).is_some_and(Runtime::is_frame)
    }

    /// Whether the segment's mode completed a cycle during the last tick
    pub fn is_cycle(&self, index: u8) -> bool {
        self.runtime(index).is_some_and(Runtime::is_cycle)
    }

    /// Attach an external level source to an active segment
    pub fn set_external_data(&mut self, index: u8, data: Option<ExternalData>) -> bool {
        let Some(slot) = self.registry.slot_of(index) else {
            return false;
        };
        self.runtimes[slot].set_external_data(data);
        true
    }

    /// Change a segment's mode, restarting its animation
    pub fn set_mode(&mut self, index: u8, mode: ModeId) {
        let Some(segment) = self.segments.get_mut(usize::from(index)) else {
            return;
        };
        #[cfg(feature = "esp32-log")]
        println!("[LightEngine.set_mode] segment {} -> {}", index, mode.as_str());
        segment.mode = mode;
        self.reset_segment_runtime(index);
    }

    /// Change a segment's mode by raw index, clamped to the table
    pub fn set_mode_raw(&mut self, index: u8, mode: u8) {
        self.set_mode(index, ModeId::from_raw_clamped(mode));
    }

    pub fn mode(&self, index: u8) -> Option<ModeId> {
        self.segment(index).map(|segment| segment.mode)
    }

    /// Set a segment's speed, clamped to the accepted range
    pub fn set_speed(&mut self, index: u8, speed: u16) {
        if let Some(segment) = self.segments.get_mut(usize::from(index)) {
            segment.speed = clamp_speed(speed);
        }
    }

    pub fn increase_speed(&mut self, index: u8, amount: u16) {
        if let Some(speed) = self.speed(index) {
            self.set_speed(index, speed.saturating_add(amount));
        }
    }

    pub fn decrease_speed(&mut self, index: u8, amount: u16) {
        if let Some(speed) = self.speed(index) {
            self.set_speed(index, speed.saturating_sub(amount));
        }
    }

    pub fn speed(&self, index: u8) -> Option<u16> {
        self.segment(index).map(|segment| segment.speed)
    }

    /// Set a segment's primary color
    pub fn set_color(&mut self, index: u8, color: Color) {
        if let Some(segment) = self.segments.get_mut(usize::from(index)) {
            segment.colors[0] = color;
        }
    }

    pub fn set_colors(&mut self, index: u8, colors: [Color; 3]) {
        if let Some(segment) = self.segments.get_mut(usize::from(index)) {
            segment.colors = colors;
        }
    }

    pub fn color(&self, index: u8) -> Option<Color> {
        self.segment(index).map(|segment| segment.colors[0])
    }

    pub fn colors(&self, index: u8) -> Option<[Color; 3]> {
        self.segment(index).map(|segment| segment.colors)
    }

    pub fn set_options(&mut self, index: u8, options: SegmentOptions) {
        if let Some(segment) = self.segments.get_mut(usize::from(index)) {
            segment.options = options;
        }
    }

    pub fn options(&self, index: u8) -> Option<SegmentOptions> {
        self.segment(index).map(|segment| segment.options)
    }

    /// Number of entries in the mode table
    pub const MODE_COUNT: usize = MODE_COUNT;

    /// Display name of a raw mode index (empty when out of range)
    ///
    /// Custom slots report the name they were registered with.
    pub fn mode_name(&self, mode: u8) -> &'static str {
        let Some(mode) = ModeId::from_raw(mode) else {
            return "";
        };
        mode.custom_slot()
            .and_then(|slot| self.custom_modes.get(slot).copied().flatten())
            .map_or(mode.as_str(), |custom| custom.name)
    }

    /// Assign a function to custom slot `slot`, returning its mode id
    pub fn set_custom_mode(
        &mut self,
        slot: usize,
        name: &'static str,
        func: ModeFn<ENTITIES>,
    ) -> Option<ModeId> {
        let mode = ModeId::custom(slot)?;
        #[cfg(feature = "esp32-log")]
        println!("[LightEngine.set_custom_mode] slot {} -> {}", slot, name);
        self.custom_modes[slot] = Some(CustomMode { name, func });
        Some(mode)
    }

    /// Replace the driver flush with a host function (`None` restores it)
    pub fn set_custom_show(&mut self, show: Option<ShowFn>) {
        self.custom_show = show;
    }

    /// Set brightness and flush immediately
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
        self.show();
    }

    pub fn increase_brightness(&mut self, amount: u8) {
        self.set_brightness(self.brightness.saturating_add(amount));
    }

    pub fn decrease_brightness(&mut self, amount: u8) {
        self.set_brightness(self.brightness.saturating_sub(amount));
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Change the logical strip length within the buffer capacity
    ///
    /// Runtimes restart and the strip is blanked. Segment 0 is refitted to
    /// the new length; every other segment is clipped to it.
    pub fn set_length(&mut self, length: usize) {
        self.reset_segment_runtimes();
        self.buffer.clear();
        self.buffer.resize(length.max(1));
        let last = self.last_pixel();
        for segment in &mut self.segments {
            segment.start = segment.start.min(last);
            segment.stop = segment.stop.min(last);
        }
        if let Some(first) = self.segments.first_mut() {
            first.stop = last;
        }
        self.show();
    }

    pub fn increase_length(&mut self, amount: usize) {
        self.set_length(self.length().saturating_add(amount));
    }

    pub fn decrease_length(&mut self, amount: usize) {
        self.set_length(self.length().saturating_sub(amount));
    }

    pub fn length(&self) -> usize {
        self.buffer.len()
    }

    /// Blank the buffer and restart every runtime
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.reset_segment_runtimes();
    }

    pub fn random8(&mut self) -> u8 {
        self.random.next_u8()
    }

    pub fn random16(&mut self) -> u16 {
        self.random.next_u16()
    }

    pub fn set_random_seed(&mut self, seed: u16) {
        self.random.set_seed(seed);
    }

    /// Sum of all channel values as they leave the engine (brightness applied)
    pub fn intensity_sum(&self) -> u32 {
        self.buffer
            .pixels()
            .iter()
            .flat_map(|color| [color.r(), color.g(), color.b(), color.w()])
            .map(|channel| u32::from(scale8(channel, self.brightness)))
            .sum()
    }

    pub const fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Store a normalized segment, growing the logical segment count
    fn store_segment(&mut self, index: u8, mut segment: Segment) -> bool {
        let last = self.last_pixel();
        let Some(slot) = self.segments.get_mut(usize::from(index)) else {
            return false;
        };
        segment.stop = segment.stop.min(last).max(segment.start);
        segment.speed = clamp_speed(segment.speed);
        *slot = segment;
        self.segment_count = self.segment_count.max(usize::from(index) + 1);
        true
    }

    #[allow(clippy::cast_possible_truncation)]
    fn last_pixel(&self) -> u16 {
        self.buffer.len().saturating_sub(1).min(usize::from(u16::MAX)) as u16
    }
}
