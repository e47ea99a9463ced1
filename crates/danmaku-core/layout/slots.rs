//! Vertical slot allocation for top- and bottom-anchored comments
//!
//! Each fixed motion class owns a [`SlotRegistry`] recording, per slot
//! index, the time at which the slot becomes free again. Allocation first
//! evicts every slot that is free by the new comment's start time, then
//! picks a slot from what remains.
//!
//! # Algorithm
//!
//! After eviction, with `count` occupied slots and `max` the highest
//! occupied index:
//!
//! 1. no occupied slots: slot 0
//! 2. `count == max`: the lowest occupied slot is reused
//! 3. otherwise the first unoccupied index below `count`, falling back to
//!    `count` when `0..count` is fully packed
//!
//! Rule 2 can hand out a slot that is still occupied. Line placement on a
//! crowded screen depends on it, so it is kept as is.

use log::trace;

/// Slot index to free-at time mapping for one fixed motion class
///
/// Stored as a dense vector indexed by slot; `None` marks a free slot.
/// Slot indices stay small (bounded by the number of concurrently visible
/// fixed comments), so the vector never grows large.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotRegistry {
    slots: Vec<Option<f64>>,
}

impl SlotRegistry {
    /// Create an empty registry
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of occupied slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no slot is occupied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Time at which `slot` becomes free, if it is occupied
    #[must_use]
    pub fn free_at(&self, slot: usize) -> Option<f64> {
        self.slots.get(slot).copied().flatten()
    }

    /// Iterate occupied slots in index order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, free_at)| free_at.map(|time| (slot, time)))
    }

    /// Drop every slot that is free by `start_time`
    ///
    /// A slot freeing exactly at `start_time` is evicted: intervals are
    /// half-open. Returns the number of evicted slots.
    pub fn evict_expired(&mut self, start_time: f64) -> usize {
        let mut evicted = 0;
        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if let Some(free_at) = *entry {
                if free_at <= start_time {
                    trace!("slot {slot} freed at {free_at:.2}s, evicted for {start_time:.2}s");
                    *entry = None;
                    evicted += 1;
                }
            }
        }
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
        evicted
    }

    /// Evict expired slots and pick the slot for a comment starting at `start_time`
    ///
    /// The registry is not marked as occupied; call [`SlotRegistry::occupy`]
    /// with the returned slot once the comment's end time is known.
    pub fn choose_slot(&mut self, start_time: f64) -> usize {
        self.evict_expired(start_time);

        let count = self.len();
        let (Some(min), Some(max)) = (self.min_slot(), self.max_slot()) else {
            return 0;
        };

        if count == max {
            return min;
        }

        (0..count)
            .find(|&slot| self.free_at(slot).is_none())
            .unwrap_or(count)
    }

    /// Mark `slot` as occupied until `free_at`, replacing any previous entry
    pub fn occupy(&mut self, slot: usize, free_at: f64) {
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot] = Some(free_at);
    }

    /// Forget every occupied slot
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    fn min_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_some)
    }

    fn max_slot(&self) -> Option<usize> {
        self.slots.iter().rposition(Option::is_some)
    }
}

/// Registry pair for the two fixed motion classes
///
/// Top and bottom comments never share slots. One pair must be used per
/// conversion; reusing a pair across comment lists leaks placements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotRegistries {
    pub top: SlotRegistry,
    pub bottom: SlotRegistry,
}

impl SlotRegistries {
    /// Create an empty pair
    #[must_use]
    pub const fn new() -> Self {
        Self {
            top: SlotRegistry::new(),
            bottom: SlotRegistry::new(),
        }
    }
}
