//! Gesture engine: edge capture and the cooperative dispatch tick.
//!
//! # Architecture
//!
//! ```text
//! GPIO ISR ──▶ DebounceGate ──▶ EdgeQueue ──▶ dispatch_tick
//!              (gate check)     (lock-free)       │
//!                                                 ├─▶ PendingLedger
//!                                                 ├─▶ classify()
//!                                                 └─▶ HandlerTable callbacks
//! ```
//!
//! [`capture_edge`] is the entire interrupt-context path: O(1), atomics
//! only, no allocation, no logging. Everything else runs in cooperative
//! context: a single logical thread invoking [`GestureEngine::dispatch_tick`]
//! once per control-loop iteration, never re-entered, so the ledger and
//! handler table need no locking.
//!
//! The engine borrows its queue and gate rather than owning globals, so
//! multiple independent instances can coexist and tests run deterministic
//! engines side by side.

use crate::classify::{classify, Resolution};
use crate::config::GestureConfig;
use crate::debounce::DebounceGate;
use crate::edge::{Edge, EdgeDirection, LevelSource, Pin, MAX_PINS};
use crate::handlers::{
    ClickCallback, HandlerTable, MultiClickCallback, PressHoldCallback, RegisterError,
};
use crate::ledger::PendingLedger;
use crate::queue::{EdgeQueue, DEFAULT_QUEUE_SIZE};

/// Capture one raw transition (interrupt context).
///
/// This is the whole ISR body: consult the debounce gate, derive the
/// direction from the level read inside the handler, enqueue. Returns
/// `true` if an edge was queued.
///
/// If the ring is full the edge is dropped and counted, but the debounce
/// lock stays set: the overflow burst that filled the ring is exactly the
/// noise the lock should keep suppressing, and it expires on the next
/// tick past the settle window as usual.
///
/// # Timing
///
/// Completes in O(1), never blocks, never allocates. Safe to call from an
/// interrupt handler that may preempt the dispatch tick at any instruction
/// boundary.
#[inline]
pub fn capture_edge<const N: usize>(
    queue: &EdgeQueue<N>,
    gate: &DebounceGate,
    pin: Pin,
    pin_low: bool,
    now_ms: u32,
) -> bool {
    if !gate.try_accept(pin, now_ms) {
        return false;
    }
    queue.push(Edge::new(pin, EdgeDirection::from_level_low(pin_low)))
}

/// Per-pin gesture recognition engine.
///
/// Owns the registration table and pending-event ledger; borrows the
/// ISR-shared queue and debounce gate.
///
/// # Example
///
/// ```ignore
/// static QUEUE: EdgeQueue = EdgeQueue::new();
/// static GATE: DebounceGate = DebounceGate::new();
///
/// let mut engine = GestureEngine::new(&QUEUE, &GATE, GestureConfig::default());
/// engine.on_click(15, Box::new(|| log::info!("play/pause")))?;
///
/// loop {
///     engine.dispatch_tick(millis(), &levels);
///     delay_ms(10);
/// }
/// ```
pub struct GestureEngine<'a, const N: usize = DEFAULT_QUEUE_SIZE> {
    queue: &'a EdgeQueue<N>,
    gate: &'a DebounceGate,
    config: GestureConfig,
    handlers: HandlerTable,
    ledger: PendingLedger,
}

impl<'a, const N: usize> GestureEngine<'a, N> {
    /// Create an engine over a shared queue and gate.
    pub fn new(queue: &'a EdgeQueue<N>, gate: &'a DebounceGate, config: GestureConfig) -> Self {
        Self {
            queue,
            gate,
            config,
            handlers: HandlerTable::new(),
            ledger: PendingLedger::new(),
        }
    }

    /// Register a single-click callback for a pin.
    ///
    /// Call during initialization, before the first dispatch tick. At most
    /// one handler per gesture kind per pin.
    pub fn on_click(&mut self, pin: Pin, cb: ClickCallback) -> Result<(), RegisterError> {
        self.handlers.register_click(pin, cb)
    }

    /// Register a multi-click callback for a pin. The callback receives
    /// the number of completed press/release repeats (always > 1).
    pub fn on_multi_click(&mut self, pin: Pin, cb: MultiClickCallback) -> Result<(), RegisterError> {
        self.handlers.register_multi_click(pin, cb)
    }

    /// Register a press-hold callback for a pin.
    pub fn on_press_hold(&mut self, pin: Pin, cb: PressHoldCallback) -> Result<(), RegisterError> {
        self.handlers.register_press_hold(pin, cb)
    }

    /// Run one dispatch tick (cooperative context).
    ///
    /// Must be invoked exactly once per iteration of the host control
    /// loop. This is the only entry point that fires gesture callbacks;
    /// they execute synchronously on the caller's context.
    ///
    /// Order per tick:
    /// 1. Release debounce locks held past the settle window.
    /// 2. Drain the edge queue (FIFO) into the ledger.
    /// 3. Classify every pending entry against elapsed time and the live
    ///    pin level; fire and remove, or leave pending.
    pub fn dispatch_tick(&mut self, now_ms: u32, levels: &impl LevelSource) {
        self.gate.release_expired(now_ms, self.config.debounce_ms);

        while let Some(edge) = self.queue.pop() {
            self.ledger.record_edge(edge, now_ms);
        }

        for pin in 0..MAX_PINS as Pin {
            let Some(pending) = self.ledger.get(pin).copied() else {
                continue;
            };

            let resolution = classify(
                &self.config,
                &pending,
                levels.is_low(pin),
                now_ms,
                self.handlers.registered(pin),
            );

            if resolution.resolves() {
                self.ledger.resolve(pin);
            }

            match resolution {
                Resolution::FirePressHold => self.handlers.fire_press_hold(pin),
                Resolution::FireMultiClick(n) => self.handlers.fire_multi_click(pin, n),
                Resolution::FireClick => self.handlers.fire_click(pin),
                Resolution::Discard | Resolution::Keep => {}
            }
        }
    }

    /// Current timing configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the timing configuration (between ticks).
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Number of gestures currently pending.
    pub fn pending(&self) -> usize {
        self.ledger.len()
    }

    /// Edges lost to queue overflow since boot (or last reset).
    pub fn dropped_edges(&self) -> u32 {
        self.queue.dropped()
    }

    /// Raw transitions suppressed by the debounce gate.
    pub fn suppressed_edges(&self) -> u32 {
        self.gate.suppressed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedLevels {
        low: [bool; MAX_PINS],
    }

    impl FixedLevels {
        fn all_high() -> Self {
            Self {
                low: [false; MAX_PINS],
            }
        }

        fn set_low(&mut self, pin: Pin, low: bool) {
            self.low[pin as usize] = low;
        }
    }

    impl LevelSource for FixedLevels {
        fn is_low(&self, pin: Pin) -> bool {
            self.low[pin as usize]
        }
    }

    #[test]
    fn test_capture_respects_debounce() {
        let queue = EdgeQueue::<16>::new();
        let gate = DebounceGate::new();

        assert!(capture_edge(&queue, &gate, 7, true, 0));
        // Bounce at t=50: suppressed by the held lock
        assert!(!capture_edge(&queue, &gate, 7, false, 50));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_capture_on_full_queue_keeps_lock() {
        let queue = EdgeQueue::<4>::new();
        let gate = DebounceGate::new();

        for pin in 0..4 {
            assert!(capture_edge(&queue, &gate, pin, true, 0));
        }

        // Fifth pin: edge dropped, lock still claimed and expires normally
        assert!(!capture_edge(&queue, &gate, 4, true, 0));
        assert_eq!(queue.dropped(), 1);
        assert!(gate.is_locked(4));

        gate.release_expired(101, 100);
        assert!(!gate.is_locked(4));
    }

    #[test]
    fn test_tick_drains_queue_into_ledger() {
        let queue = EdgeQueue::<16>::new();
        let gate = DebounceGate::new();
        let mut engine = GestureEngine::new(&queue, &gate, GestureConfig::default());

        let mut levels = FixedLevels::all_high();
        levels.set_low(7, true);

        capture_edge(&queue, &gate, 7, true, 0);
        engine.dispatch_tick(10, &levels);

        assert!(queue.is_empty());
        assert_eq!(engine.pending(), 1);
    }

    #[test]
    fn test_click_fires_and_clears_pending() {
        let queue = EdgeQueue::<16>::new();
        let gate = DebounceGate::new();
        let mut engine = GestureEngine::new(&queue, &gate, GestureConfig::default());

        let clicks = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&clicks);
        engine
            .on_click(7, Box::new(move || {
                c.fetch_add(1, Ordering::Relaxed);
            }))
            .unwrap();

        let mut levels = FixedLevels::all_high();

        // Press
        levels.set_low(7, true);
        capture_edge(&queue, &gate, 7, true, 0);
        engine.dispatch_tick(10, &levels);

        // Release past the debounce window
        levels.set_low(7, false);
        gate.release_expired(150, 100);
        capture_edge(&queue, &gate, 7, false, 150);
        engine.dispatch_tick(160, &levels);

        assert_eq!(clicks.load(Ordering::Relaxed), 1);
        assert_eq!(engine.pending(), 0);
    }

    #[test]
    fn test_stats_counters() {
        let queue = EdgeQueue::<4>::new();
        let gate = DebounceGate::new();
        let engine = GestureEngine::new(&queue, &gate, GestureConfig::default());

        capture_edge(&queue, &gate, 1, true, 0);
        // Same pin inside the settle window: suppressed
        capture_edge(&queue, &gate, 1, false, 10);

        assert_eq!(engine.suppressed_edges(), 1);
        assert_eq!(engine.dropped_edges(), 0);
    }
}
