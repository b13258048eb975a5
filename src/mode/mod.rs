//! Mode library with stable, host-persisted indices
//!
//! Modes are plain functions of a [`ModeContext`] returning the delay in
//! milliseconds until the segment wants its next frame. The table is
//! append-only: hosts store the raw index, so existing entries never move.

mod ambient;
mod basic;
mod chase;
mod context;
mod fire;
mod helpers;
mod running;
mod scanner;
mod sparkle;

pub use context::ModeContext;
pub use helpers::STROBE_ON_TIME;

/// Number of runtime-registered custom mode slots
pub const MAX_CUSTOM_MODES: usize = 8;

/// Delay returned by an unassigned custom slot
pub const CUSTOM_MODE_STUB_DELAY: u16 = 1000;

/// Signature shared by builtin and custom modes
pub type ModeFn<const ENTITIES: usize> = fn(&mut ModeContext<'_, ENTITIES>) -> u16;

macro_rules! mode_table {
    ($($id:ident = $raw:literal => $name:literal,)+) => {
        /// Stable mode identifiers
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum ModeId {
            #[default]
            $($id = $raw,)+
        }

        impl ModeId {
            /// Every mode in index order
            pub const ALL: [Self; MODE_COUNT] = [$(Self::$id,)+];

            /// Display name
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$id => $name,)+
                }
            }
        }

        /// Number of entries in the mode table, custom slots included
        pub const MODE_COUNT: usize = [$($raw,)+].len();
    };
}

mode_table! {
    Static = 0 => "Static",
    Blink = 1 => "Blink",
    Breath = 2 => "Breath",
    ColorWipe = 3 => "Color Wipe",
    ColorWipeInverse = 4 => "Color Wipe Inverse",
    ColorWipeReverse = 5 => "Color Wipe Reverse",
    ColorWipeReverseInverse = 6 => "Color Wipe Reverse Inverse",
    ColorWipeRandom = 7 => "Color Wipe Random",
    RandomColor = 8 => "Random Color",
    SingleDynamic = 9 => "Single Dynamic",
    MultiDynamic = 10 => "Multi Dynamic",
    Rainbow = 11 => "Rainbow",
    RainbowCycle = 12 => "Rainbow Cycle",
    Scan = 13 => "Scan",
    DualScan = 14 => "Dual Scan",
    Fade = 15 => "Fade",
    TheaterChase = 16 => "Theater Chase",
    TheaterChaseRainbow = 17 => "Theater Chase Rainbow",
    RunningLights = 18 => "Running Lights",
    Twinkle = 19 => "Twinkle",
    TwinkleRandom = 20 => "Twinkle Random",
    TwinkleFade = 21 => "Twinkle Fade",
    TwinkleFadeRandom = 22 => "Twinkle Fade Random",
    Sparkle = 23 => "Sparkle",
    FlashSparkle = 24 => "Flash Sparkle",
    HyperSparkle = 25 => "Hyper Sparkle",
    Strobe = 26 => "Strobe",
    StrobeRainbow = 27 => "Strobe Rainbow",
    MultiStrobe = 28 => "Multi Strobe",
    BlinkRainbow = 29 => "Blink Rainbow",
    ChaseWhite = 30 => "Chase White",
    ChaseColor = 31 => "Chase Color",
    ChaseRandom = 32 => "Chase Random",
    ChaseRainbow = 33 => "Chase Rainbow",
    ChaseFlash = 34 => "Chase Flash",
    ChaseFlashRandom = 35 => "Chase Flash Random",
    ChaseRainbowWhite = 36 => "Chase Rainbow White",
    ChaseBlackout = 37 => "Chase Blackout",
    ChaseBlackoutRainbow = 38 => "Chase Blackout Rainbow",
    ColorSweepRandom = 39 => "Color Sweep Random",
    RunningColor = 40 => "Running Color",
    RunningRedBlue = 41 => "Running Red Blue",
    RunningRandom = 42 => "Running Random",
    LarsonScanner = 43 => "Larson Scanner",
    Comet = 44 => "Comet",
    Fireworks = 45 => "Fireworks",
    FireworksRandom = 46 => "Fireworks Random",
    MerryChristmas = 47 => "Merry Christmas",
    FireFlicker = 48 => "Fire Flicker",
    FireFlickerSoft = 49 => "Fire Flicker (soft)",
    FireFlickerIntense = 50 => "Fire Flicker (intense)",
    CircusCombustus = 51 => "Circus Combustus",
    Halloween = 52 => "Halloween",
    BicolorChase = 53 => "Bicolor Chase",
    TricolorChase = 54 => "Tricolor Chase",
    TwinkleFox = 55 => "TwinkleFOX",
    Rain = 56 => "Rain",
    BlockDissolve = 57 => "Block Dissolve",
    Icu = 58 => "ICU",
    DualLarson = 59 => "Dual Larson",
    RunningRandom2 = 60 => "Running Random2",
    FillerUp = 61 => "Filler Up",
    RainbowLarson = 62 => "Rainbow Larson",
    RainbowFireworks = 63 => "Rainbow Fireworks",
    Trifade = 64 => "Trifade",
    VuMeter = 65 => "VU Meter",
    Heartbeat = 66 => "Heartbeat",
    Bits = 67 => "Bits",
    MultiComet = 68 => "Multi Comet",
    Flipbook = 69 => "Flipbook",
    Popcorn = 70 => "Popcorn",
    Oscillator = 71 => "Oscillator",
    Custom0 = 72 => "Custom 0",
    Custom1 = 73 => "Custom 1",
    Custom2 = 74 => "Custom 2",
    Custom3 = 75 => "Custom 3",
    Custom4 = 76 => "Custom 4",
    Custom5 = 77 => "Custom 5",
    Custom6 = 78 => "Custom 6",
    Custom7 = 79 => "Custom 7",
}

/// Index of the first custom slot
pub const FIRST_CUSTOM_MODE: u8 = ModeId::Custom0 as u8;

impl ModeId {
    pub const fn from_raw(value: u8) -> Option<Self> {
        if (value as usize) < MODE_COUNT {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    /// Look up a mode, clamping out-of-range indices to the last entry
    pub const fn from_raw_clamped(value: u8) -> Self {
        match Self::from_raw(value) {
            Some(mode) => mode,
            None => Self::ALL[MODE_COUNT - 1],
        }
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == s)
    }

    /// Custom slot number when this is one of the custom entries
    pub const fn custom_slot(self) -> Option<usize> {
        let raw = self as u8;
        if raw >= FIRST_CUSTOM_MODE {
            Some((raw - FIRST_CUSTOM_MODE) as usize)
        } else {
            None
        }
    }

    /// Custom mode entry for slot `slot`
    pub const fn custom(slot: usize) -> Option<Self> {
        if slot < MAX_CUSTOM_MODES {
            Self::from_raw(FIRST_CUSTOM_MODE + slot as u8)
        } else {
            None
        }
    }

    /// Run a builtin mode; custom entries return the stub delay
    pub fn run<const ENTITIES: usize>(self, ctx: &mut ModeContext<'_, ENTITIES>) -> u16 {
        match self {
            Self::Static => basic::static_color(ctx),
            Self::Blink => basic::blink(ctx),
            Self::Breath => basic::breath(ctx),
            Self::ColorWipe => basic::color_wipe(ctx),
            Self::ColorWipeInverse => basic::color_wipe_inverse(ctx),
            Self::ColorWipeReverse => basic::color_wipe_reverse(ctx),
            Self::ColorWipeReverseInverse => basic::color_wipe_reverse_inverse(ctx),
            Self::ColorWipeRandom => basic::color_wipe_random(ctx),
            Self::RandomColor => basic::random_color(ctx),
            Self::SingleDynamic => basic::single_dynamic(ctx),
            Self::MultiDynamic => basic::multi_dynamic(ctx),
            Self::Rainbow => basic::rainbow(ctx),
            Self::RainbowCycle => basic::rainbow_cycle(ctx),
            Self::Scan => scanner::scan(ctx),
            Self::DualScan => scanner::dual_scan(ctx),
            Self::Fade => basic::fade(ctx),
            Self::TheaterChase => chase::theater_chase(ctx),
            Self::TheaterChaseRainbow => chase::theater_chase_rainbow(ctx),
            Self::RunningLights => running::running_lights(ctx),
            Self::Twinkle => sparkle::twinkle(ctx),
            Self::TwinkleRandom => sparkle::twinkle_random(ctx),
            Self::TwinkleFade => sparkle::twinkle_fade(ctx),
            Self::TwinkleFadeRandom => sparkle::twinkle_fade_random(ctx),
            Self::Sparkle => sparkle::sparkle(ctx),
            Self::FlashSparkle => sparkle::flash_sparkle(ctx),
            Self::HyperSparkle => sparkle::hyper_sparkle(ctx),
            Self::Strobe => basic::strobe(ctx),
            Self::StrobeRainbow => basic::strobe_rainbow(ctx),
            Self::MultiStrobe => basic::multi_strobe(ctx),
            Self::BlinkRainbow => basic::blink_rainbow(ctx),
            Self::ChaseWhite => chase::chase_white(ctx),
            Self::ChaseColor => chase::chase_color(ctx),
            Self::ChaseRandom => chase::chase_random(ctx),
            Self::ChaseRainbow => chase::chase_rainbow(ctx),
            Self::ChaseFlash => chase::chase_flash(ctx),
            Self::ChaseFlashRandom => chase::chase_flash_random(ctx),
            Self::ChaseRainbowWhite => chase::chase_rainbow_white(ctx),
            Self::ChaseBlackout => chase::chase_blackout(ctx),
            Self::ChaseBlackoutRainbow => chase::chase_blackout_rainbow(ctx),
            Self::ColorSweepRandom => basic::color_sweep_random(ctx),
            Self::RunningColor => running::running_color(ctx),
            Self::RunningRedBlue => running::running_red_blue(ctx),
            Self::RunningRandom => running::running_random(ctx),
            Self::LarsonScanner => scanner::larson_scanner(ctx),
            Self::Comet => scanner::comet(ctx),
            Self::Fireworks => fire::fireworks(ctx),
            Self::FireworksRandom => fire::fireworks_random(ctx),
            Self::MerryChristmas => running::merry_christmas(ctx),
            Self::FireFlicker => fire::fire_flicker(ctx),
            Self::FireFlickerSoft => fire::fire_flicker_soft(ctx),
            Self::FireFlickerIntense => fire::fire_flicker_intense(ctx),
            Self::CircusCombustus => chase::circus_combustus(ctx),
            Self::Halloween => running::halloween(ctx),
            Self::BicolorChase => chase::bicolor_chase(ctx),
            Self::TricolorChase => chase::tricolor_chase(ctx),
            Self::TwinkleFox => sparkle::twinkle_fox(ctx),
            Self::Rain => sparkle::rain(ctx),
            Self::BlockDissolve => sparkle::block_dissolve(ctx),
            Self::Icu => scanner::icu(ctx),
            Self::DualLarson => scanner::dual_larson(ctx),
            Self::RunningRandom2 => running::running_random2(ctx),
            Self::FillerUp => running::filler_up(ctx),
            Self::RainbowLarson => scanner::rainbow_larson(ctx),
            Self::RainbowFireworks => fire::rainbow_fireworks(ctx),
            Self::Trifade => basic::trifade(ctx),
            Self::VuMeter => ambient::vu_meter(ctx),
            Self::Heartbeat => ambient::heartbeat(ctx),
            Self::Bits => running::bits(ctx),
            Self::MultiComet => scanner::multi_comet(ctx),
            Self::Flipbook => running::flipbook(ctx),
            Self::Popcorn => fire::popcorn(ctx),
            Self::Oscillator => scanner::oscillator(ctx),
            Self::Custom0
            | Self::Custom1
            | Self::Custom2
            | Self::Custom3
            | Self::Custom4
            | Self::Custom5
            | Self::Custom6
            | Self::Custom7 => custom_stub(ctx),
        }
    }
}

/// Placeholder for custom slots that have no function assigned
pub fn custom_stub<const ENTITIES: usize>(_ctx: &mut ModeContext<'_, ENTITIES>) -> u16 {
    CUSTOM_MODE_STUB_DELAY
}

/// Host-registered mode occupying one of the custom slots
#[derive(Clone, Copy)]
pub struct CustomMode<const ENTITIES: usize> {
    pub name: &'static str,
    pub func: ModeFn<ENTITIES>,
}

impl<const ENTITIES: usize> core::fmt::Debug for CustomMode<ENTITIES> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CustomMode").field("name", &self.name).finish()
    }
}
