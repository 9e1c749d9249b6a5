//! Pending-event ledger.
//!
//! Per-pin accumulation state for gestures in progress. Owned exclusively
//! by the cooperative context; no locking. Backed by a fixed array keyed by
//! pin number, so lookup is O(1) and nothing allocates.
//!
//! Invariant: at most one [`PendingEvent`] exists per pin at any time.
//! That is what allows pin-keyed lookup instead of a queue of overlapping
//! gestures.

use crate::edge::{Edge, Pin, MAX_PINS};

/// In-progress gesture accumulator for one pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingEvent {
    /// Millisecond timestamp of the last accepted edge on this pin.
    pub last_activity_ms: u32,

    /// Completed press/release repeats (counts rising edges, not raw
    /// edges). 0 while the first press is still down.
    pub repeat_count: u8,
}

/// Per-pin map of unresolved gestures.
pub struct PendingLedger {
    entries: [Option<PendingEvent>; MAX_PINS],
}

impl PendingLedger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            entries: [None; MAX_PINS],
        }
    }

    /// Apply one dequeued edge.
    ///
    /// - No entry + falling edge: open a fresh entry (`repeat_count` 0).
    /// - No entry + rising edge: dropped; it is the tail of a gesture
    ///   whose start was already resolved or never observed.
    /// - Entry exists: refresh `last_activity_ms`; a rising edge also
    ///   completes one press/release repeat.
    ///
    /// Returns `true` if the edge changed ledger state.
    pub fn record_edge(&mut self, edge: Edge, now_ms: u32) -> bool {
        let idx = edge.pin as usize;
        if idx >= MAX_PINS {
            return false;
        }

        match &mut self.entries[idx] {
            Some(pending) => {
                pending.last_activity_ms = now_ms;
                if edge.direction.is_release() {
                    pending.repeat_count = pending.repeat_count.saturating_add(1);
                }
                true
            }
            slot @ None => {
                if edge.direction.is_press() {
                    *slot = Some(PendingEvent {
                        last_activity_ms: now_ms,
                        repeat_count: 0,
                    });
                    true
                } else {
                    // Orphaned release
                    false
                }
            }
        }
    }

    /// Get the pending entry for a pin, if any.
    #[inline]
    pub fn get(&self, pin: Pin) -> Option<&PendingEvent> {
        self.entries.get(pin as usize).and_then(|e| e.as_ref())
    }

    /// Remove and return the entry for a pin (gesture resolved).
    #[inline]
    pub fn resolve(&mut self, pin: Pin) -> Option<PendingEvent> {
        self.entries.get_mut(pin as usize).and_then(|e| e.take())
    }

    /// Iterate over all pins with a pending entry.
    pub fn iter(&self) -> impl Iterator<Item = (Pin, PendingEvent)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| entry.map(|e| (idx as Pin, e)))
    }

    /// Number of unresolved gestures.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// True if no gestures are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }
}

impl Default for PendingLedger {
    fn default() -> Self {
        Self::new()
    }
}
