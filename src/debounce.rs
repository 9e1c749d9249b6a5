//! Per-pin debounce governor.
//!
//! Prevents one mechanical bounce from being seen as multiple edges. Each
//! pin has a binary lock: the first raw transition sets it and passes
//! through; every further transition while it is held is suppressed,
//! regardless of direction. Locks are released once per dispatch tick after
//! the settle window elapses.
//!
//! The gate is consulted from interrupt context and released from
//! cooperative context, so the lock table is atomics only, the same lock-free
//! boundary discipline as [`EdgeQueue`](crate::queue::EdgeQueue).

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::edge::{Pin, MAX_PINS};

/// Per-pin debounce lock table.
///
/// # Concurrency
///
/// - `try_accept` runs in interrupt context (sets locks)
/// - `release_expired` runs in cooperative context (clears locks)
/// - Both touch only atomics; a clear racing a check is benign (the edge
///   is either suppressed this bounce or accepted as a fresh one)
pub struct DebounceGate {
    /// Lock flags, one per pin.
    locked: [AtomicBool; MAX_PINS],

    /// Millisecond timestamp at which each lock was set.
    ///
    /// Only meaningful while the corresponding flag is set.
    lock_set_at: [AtomicU32; MAX_PINS],

    /// Raw transitions suppressed while a lock was held.
    suppressed: AtomicU32,
}

impl DebounceGate {
    /// Create a new gate with all locks clear.
    pub const fn new() -> Self {
        const UNLOCKED: AtomicBool = AtomicBool::new(false);
        const ZERO: AtomicU32 = AtomicU32::new(0);

        Self {
            locked: [UNLOCKED; MAX_PINS],
            lock_set_at: [ZERO; MAX_PINS],
            suppressed: AtomicU32::new(0),
        }
    }

    /// Gate check for one raw transition (interrupt context).
    ///
    /// Returns `true` if the edge should be captured: the lock was clear
    /// and is now set with timestamp `now_ms`. Returns `false` if the pin
    /// is still settling (or out of range) and the transition must be
    /// discarded.
    ///
    /// # Timing
    ///
    /// Completes in O(1), never blocks, never allocates.
    #[inline]
    pub fn try_accept(&self, pin: Pin, now_ms: u32) -> bool {
        let idx = pin as usize;
        if idx >= MAX_PINS {
            return false;
        }

        if self.locked[idx].load(Ordering::Acquire) {
            self.suppressed.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // Timestamp first, then flag: a release racing this publish sees
        // either no lock or a fully initialized one.
        self.lock_set_at[idx].store(now_ms, Ordering::Relaxed);
        self.locked[idx].store(true, Ordering::Release);
        true
    }

    /// Clear every lock held longer than `debounce_ms` (cooperative
    /// context, once per dispatch tick).
    ///
    /// Elapsed time must be computed as now minus set-time; `wrapping_sub`
    /// keeps the comparison correct across u32 wraparound.
    pub fn release_expired(&self, now_ms: u32, debounce_ms: u32) {
        for idx in 0..MAX_PINS {
            if !self.locked[idx].load(Ordering::Acquire) {
                continue;
            }

            let set_at = self.lock_set_at[idx].load(Ordering::Relaxed);
            if now_ms.wrapping_sub(set_at) > debounce_ms {
                self.locked[idx].store(false, Ordering::Release);
            }
        }
    }

    /// True if the pin's lock is currently held.
    #[inline]
    pub fn is_locked(&self, pin: Pin) -> bool {
        let idx = pin as usize;
        idx < MAX_PINS && self.locked[idx].load(Ordering::Acquire)
    }

    /// Count of raw transitions suppressed by held locks.
    #[inline]
    pub fn suppressed(&self) -> u32 {
        self.suppressed.load(Ordering::Relaxed)
    }

    /// Reset the suppression counter (e.g., after reporting).
    #[inline]
    pub fn reset_suppressed(&self) {
        self.suppressed.store(0, Ordering::Relaxed);
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new()
    }
}
