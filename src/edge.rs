//! Module: edge
//!
//! Purpose: Edge types for the gesture engine. An [`Edge`] is one electrical
//! transition on a monitored GPIO pin, captured in interrupt context and
//! consumed exactly once by the pending-event ledger.
//!
//! Safety: Safe. No unsafe blocks. Copy types only.

/// GPIO pin identifier.
///
/// Small unsigned integer, stable for process lifetime. Valid pins are
/// `0..MAX_PINS`; anything else is rejected at registration and ignored
/// at capture.
pub type Pin = u8;

/// Number of pin slots in the fixed per-pin tables.
///
/// Covers GPIO0..GPIO47 (ESP32-S3 has 48 GPIOs, original ESP32 uses 40).
pub const MAX_PINS: usize = 48;

/// Direction of an electrical transition.
///
/// Buttons are wired active-low (pull-up, pressed shorts to ground), so a
/// falling edge is a press and a rising edge is a release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EdgeDirection {
    /// Level went low → high (button released).
    Rising = 0,
    /// Level went high → low (button pressed).
    Falling = 1,
}

impl EdgeDirection {
    /// Derive the direction from the level read *after* the transition.
    ///
    /// The ISR reads the level synchronously inside the handler; further
    /// transitions may already have occurred, so the direction reflects
    /// where the pin ended up, not which edge triggered the interrupt.
    #[inline]
    pub const fn from_level_low(pin_low: bool) -> Self {
        if pin_low {
            EdgeDirection::Falling
        } else {
            EdgeDirection::Rising
        }
    }

    /// True for a press (falling) edge.
    #[inline]
    pub const fn is_press(self) -> bool {
        matches!(self, EdgeDirection::Falling)
    }

    /// True for a release (rising) edge.
    #[inline]
    pub const fn is_release(self) -> bool {
        matches!(self, EdgeDirection::Rising)
    }
}

/// A single captured edge.
///
/// Produced in interrupt context, queued, consumed once by the ledger.
/// Size: 2 bytes, Copy, fits a lock-free ring slot.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Pin the transition occurred on.
    pub pin: Pin,
    /// Direction derived from the live level at capture time.
    pub direction: EdgeDirection,
}

impl Edge {
    /// Placeholder value for ring buffer initialization.
    pub const EMPTY: Self = Self {
        pin: 0,
        direction: EdgeDirection::Rising,
    };

    /// Create a new edge record.
    #[inline]
    pub const fn new(pin: Pin, direction: EdgeDirection) -> Self {
        Self { pin, direction }
    }
}

/// Instantaneous pin level access.
///
/// The classifier reads live levels once per dispatch tick to decide
/// whether a pending gesture is still held. Firmware implements this over
/// `gpio_get_level`; tests implement it over a plain array. Hardware is
/// assumed always readable, so there is no error path.
pub trait LevelSource {
    /// True if the pin is electrically low (button held).
    fn is_low(&self, pin: Pin) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_size() {
        // Ring slots should stay compact
        assert_eq!(core::mem::size_of::<Edge>(), 2);
    }

    #[test]
    fn test_direction_from_level() {
        assert_eq!(EdgeDirection::from_level_low(true), EdgeDirection::Falling);
        assert_eq!(EdgeDirection::from_level_low(false), EdgeDirection::Rising);
    }

    #[test]
    fn test_direction_predicates() {
        assert!(EdgeDirection::Falling.is_press());
        assert!(!EdgeDirection::Falling.is_release());
        assert!(EdgeDirection::Rising.is_release());
        assert!(!EdgeDirection::Rising.is_press());
    }

    #[test]
    fn test_edge_new() {
        let edge = Edge::new(7, EdgeDirection::Falling);
        assert_eq!(edge.pin, 7);
        assert_eq!(edge.direction, EdgeDirection::Falling);
    }
}
