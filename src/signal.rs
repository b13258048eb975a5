//! Portable one-shot trigger for `no_std` environments.
//!
//! A latched flag built on `critical-section`, so an interrupt handler or
//! another execution context can request an immediate frame on every active
//! segment.

use core::cell::Cell;

use critical_section::Mutex;

/// Latched "render now" request.
///
/// Raising an already raised signal is a no-op; the engine consumes it at the
/// start of its next running tick.
pub struct TriggerSignal {
    raised: Mutex<Cell<bool>>,
}

impl TriggerSignal {
    /// Create a new lowered signal.
    pub const fn new() -> Self {
        Self {
            raised: Mutex::new(Cell::new(false)),
        }
    }

    /// Latch the signal.
    pub fn raise(&self) {
        critical_section::with(|cs| self.raised.borrow(cs).set(true));
    }

    /// Consume the signal, returning whether it was raised.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).replace(false))
    }

    /// Check the signal without consuming it.
    pub fn is_raised(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).get())
    }
}

impl Default for TriggerSignal {
    fn default() -> Self {
        Self::new()
    }
}
