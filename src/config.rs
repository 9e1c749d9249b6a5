//! Gesture timing configuration.
//!
//! These four windows are the knobs governing button feel. They are tunable
//! per device, not protocol constants.

/// Default debounce settle window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u32 = 100;

/// Default multi-click window in milliseconds.
///
/// A release followed by this much quiet resolves the gesture.
pub const DEFAULT_MULTI_CLICK_WINDOW_MS: u32 = 300;

/// Default press-hold threshold in milliseconds.
pub const DEFAULT_PRESS_HOLD_MS: u32 = 1000;

/// Default absolute pending-event timeout in milliseconds.
///
/// Any gesture still unresolved after this much inactivity is discarded.
pub const DEFAULT_EVENT_TIMEOUT_MS: u32 = 2000;

/// Gesture engine timing configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureConfig {
    /// Minimum settle interval after an accepted edge. Raw transitions
    /// inside this window are suppressed as switch bounce.
    pub debounce_ms: u32,

    /// Quiet time after a release before a click/multi-click resolves.
    pub multi_click_window_ms: u32,

    /// How long a pin must stay held (with no completed repeats) before
    /// press-hold fires.
    pub press_hold_ms: u32,

    /// Absolute inactivity bound after which a pending gesture is
    /// discarded without firing anything.
    pub event_timeout_ms: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            multi_click_window_ms: DEFAULT_MULTI_CLICK_WINDOW_MS,
            press_hold_ms: DEFAULT_PRESS_HOLD_MS,
            event_timeout_ms: DEFAULT_EVENT_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_windows() {
        let config = GestureConfig::default();
        assert_eq!(config.debounce_ms, 100);
        assert_eq!(config.multi_click_window_ms, 300);
        assert_eq!(config.press_hold_ms, 1000);
        assert_eq!(config.event_timeout_ms, 2000);
    }
}
