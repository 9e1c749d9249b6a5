//! # rust-ble-remote
//!
//! Button gesture recognition engine for an ESP32 BLE media remote.
//!
//! ## Architecture
//!
//! Raw GPIO transitions are captured in interrupt context, gated by a
//! per-pin debounce lock, and queued through a lock-free FIFO ring. A
//! cooperative dispatch tick drains the ring into a per-pin pending-event
//! ledger and classifies each entry into click, multi-click, or
//! press-and-hold callbacks:
//!
//! - ISR path touches only atomics: [`capture_edge`] is O(1),
//!   allocation-free, non-blocking
//! - Everything else runs on a single cooperative thread, no locking
//! - No gesture is lost or duplicated across the boundary
//!
//! The library is pure logic with no hardware dependencies and is fully
//! testable on host; the firmware binary wires it to ESP-IDF.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod classify;
pub mod config;
pub mod debounce;
pub mod edge;
pub mod engine;
pub mod handlers;
pub mod ledger;
pub mod logging;
pub mod queue;

pub use classify::Resolution;
pub use config::GestureConfig;
pub use debounce::DebounceGate;
pub use edge::{Edge, EdgeDirection, LevelSource, Pin, MAX_PINS};
pub use engine::{capture_edge, GestureEngine};
pub use handlers::{GestureKind, RegisterError};
pub use ledger::{PendingEvent, PendingLedger};
pub use logging::LogStream;
pub use queue::EdgeQueue;
