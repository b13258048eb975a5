//! Active segment registry
//!
//! Maps scheduler slots to segment indices. A segment only receives runtime
//! cycles while it occupies a slot, and never occupies more than one.

/// Raw sentinel stored by hosts for an empty slot
pub const INACTIVE_SEGMENT: u8 = 255;

/// Fixed-capacity slot table of active segment indices
#[derive(Debug, Clone)]
pub struct ActiveRegistry<const ACTIVE: usize> {
    slots: [Option<u8>; ACTIVE],
}

impl<const ACTIVE: usize> Default for ActiveRegistry<ACTIVE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ACTIVE: usize> ActiveRegistry<ACTIVE> {
    pub const fn new() -> Self {
        Self {
            slots: [None; ACTIVE],
        }
    }

    pub const fn capacity(&self) -> usize {
        ACTIVE
    }

    /// Segment index held by `slot`
    pub fn get(&self, slot: usize) -> Option<u8> {
        self.slots.get(slot).copied().flatten()
    }

    /// Slot occupied by `segment`, if it is active
    pub fn slot_of(&self, segment: u8) -> Option<usize> {
        self.slots.iter().position(|&entry| entry == Some(segment))
    }

    pub fn is_active(&self, segment: u8) -> bool {
        self.slot_of(segment).is_some()
    }

    /// Place `segment` in the first free slot
    ///
    /// Returns the slot and whether it was newly claimed. An already active
    /// segment keeps its slot; a full table yields `None`.
    pub fn add(&mut self, segment: u8) -> Option<(usize, bool)> {
        if let Some(slot) = self.slot_of(segment) {
            return Some((slot, false));
        }
        let slot = self.slots.iter().position(Option::is_none)?;
        self.slots[slot] = Some(segment);
        Some((slot, true))
    }

    /// Free the slot held by `segment`, returning it
    pub fn remove(&mut self, segment: u8) -> Option<usize> {
        let slot = self.slot_of(segment)?;
        self.slots[slot] = None;
        Some(slot)
    }

    /// Move `new` into the slot held by `old`
    ///
    /// No-op (returns `None`) when `old` is inactive or `new` is already
    /// active somewhere.
    pub fn swap(&mut self, old: u8, new: u8) -> Option<usize> {
        if self.is_active(new) {
            return None;
        }
        let slot = self.slot_of(old)?;
        self.slots[slot] = Some(new);
        Some(slot)
    }

    pub fn clear(&mut self) {
        self.slots = [None; ACTIVE];
    }

    /// Number of occupied slots
    pub fn count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Occupied slots in scheduling order as `(slot, segment)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.map(|segment| (slot, segment)))
    }

    /// Host-facing byte view, empty slots as [`INACTIVE_SEGMENT`]
    pub fn to_raw(&self) -> [u8; ACTIVE] {
        self.slots.map(|entry| entry.unwrap_or(INACTIVE_SEGMENT))
    }
}
