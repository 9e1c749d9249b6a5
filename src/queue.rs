//! Lock-free FIFO edge queue.
//!
//! The only structure shared between interrupt and cooperative context.
//! The ISR pushes captured edges; the dispatch tick drains them.
//!
//! # Architecture
//!
//! ```text
//! GPIO ISR ──────▶ EdgeQueue ──────▶ dispatch tick
//!                  (lock-free)
//!                  (FIFO)
//! ```
//!
//! FIFO order is deliberate: edges from different pins that land in the
//! same drain are dispatched in chronological order, so cross-pin fairness
//! holds. (Per-pin ordering would survive a LIFO too, because a pin cannot
//! raise a second edge until its debounce lock clears, but we don't rely
//! on that.)
//!
//! # Rules
//!
//! - Push is O(1), never blocks, never allocates.
//! - A full ring drops the new edge and counts it.
//! - Single producer (ISRs are serialized on the target core),
//!   single consumer (the dispatch tick).

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::edge::Edge;

/// Default queue capacity in edges.
///
/// With a 100 ms debounce lock per pin, even a dozen buttons cannot raise
/// more than a handful of edges between ticks; 64 leaves ample headroom.
pub const DEFAULT_QUEUE_SIZE: usize = 64;

/// Lock-free SPSC ring buffer for captured edges.
///
/// # Safety
///
/// Uses `UnsafeCell` internally but is safe to use because:
/// - Single producer (the ISR; interrupts do not nest on the target)
/// - Single consumer (the cooperative dispatch tick)
/// - Indices are coordinated with acquire/release atomics
///
/// # Memory Ordering
///
/// - Producer writes the slot, then stores `write_idx` with `Release`
/// - Consumer loads `write_idx` with `Acquire` before reading the slot
/// - This ensures the consumer sees the slot contents of every published
///   index
pub struct EdgeQueue<const N: usize = DEFAULT_QUEUE_SIZE> {
    /// Ring buffer of edges.
    slots: UnsafeCell<[Edge; N]>,

    /// Next write index (monotonically increasing, wraps via mask).
    write_idx: AtomicU32,

    /// Next read index (monotonically increasing, wraps via mask).
    read_idx: AtomicU32,

    /// Edges dropped because the ring was full.
    dropped: AtomicU32,
}

// SAFETY: Single producer, single consumer, atomic index coordination.
// No mutable aliasing possible within the architectural rules.
unsafe impl<const N: usize> Sync for EdgeQueue<N> {}
unsafe impl<const N: usize> Send for EdgeQueue<N> {}

impl<const N: usize> EdgeQueue<N> {
    /// Mask for wrapping index to buffer size.
    /// N must be a power of 2.
    const MASK: usize = N - 1;

    /// Create a new empty queue.
    ///
    /// # Panics
    ///
    /// Panics at compile time if N is not a power of 2.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Queue size must be power of 2");

        Self {
            slots: UnsafeCell::new([Edge::EMPTY; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push an edge (interrupt context).
    ///
    /// Returns `true` if queued, `false` if dropped (ring full).
    ///
    /// # Timing
    ///
    /// Completes in O(1), never blocks, never allocates.
    #[inline]
    pub fn push(&self, edge: Edge) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // SAFETY: Single producer; the slot at `write` is not visible to
        // the consumer until write_idx is published below.
        unsafe {
            (*self.slots.get())[(write as usize) & Self::MASK] = edge;
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Pop the oldest edge (cooperative context).
    ///
    /// Returns `None` when the queue is empty.
    #[inline]
    pub fn pop(&self) -> Option<Edge> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        // SAFETY: Single consumer; the producer never touches a slot
        // between read_idx and write_idx.
        let edge = unsafe { (*self.slots.get())[(read as usize) & Self::MASK] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(edge)
    }

    /// Number of edges waiting to be drained.
    #[inline]
    pub fn len(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }

    /// True if no edges are waiting.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count of edges dropped because the ring was full.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset the dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Buffer capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for EdgeQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
