//! Gesture classifier.
//!
//! Pure logic, no hardware dependencies. Consumes a pending entry, the
//! pin's live level, and elapsed time; produces a resolution. Fully
//! testable on host.
//!
//! # States
//!
//! Per pin: **Idle** (no ledger entry) and **Pending** (entry present).
//! Idle is both initial and terminal per gesture cycle. Every resolution
//! other than [`Resolution::Keep`] returns the pin to Idle.

use crate::config::GestureConfig;
use crate::handlers::Registered;
use crate::ledger::PendingEvent;

/// Outcome of evaluating one pending entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Fire the press-hold callback; entry resolved.
    FirePressHold,
    /// Fire the multi-click callback with the repeat count; entry resolved.
    FireMultiClick(u8),
    /// Fire the click callback; entry resolved.
    FireClick,
    /// Resolved with nothing to fire (timeout, or no matching handler).
    Discard,
    /// Still pending; evaluate again next tick.
    Keep,
}

impl Resolution {
    /// True unless the entry stays pending.
    #[inline]
    pub fn resolves(self) -> bool {
        !matches!(self, Resolution::Keep)
    }
}

/// Evaluate one pending entry against elapsed time and live pin level.
///
/// Precedence, first match wins:
///
/// 1. Press-hold: handler registered, no completed repeats, held past the
///    hold threshold, pin still low. Hold outranks multi-click even when
///    earlier repeats were possible; it is a distinct, higher-priority
///    gesture.
/// 2. Click/multi-click window: a multi-click or press-hold handler is
///    registered, pin released, and the multi-click window has passed
///    since the last edge. More than one completed repeat fires
///    multi-click; otherwise a registered click handler fires click.
/// 3. Fast path: only a click handler is registered and the pin is
///    released: resolve immediately rather than waiting out the
///    multi-click window. This materially changes perceived latency for
///    single-click-only pins.
/// 4. Absolute timeout: discard silently, whatever the state.
///
/// A pin with no registered handlers just accumulates until the timeout
/// reclaims it. After press-hold fires, the still-low pin raises no edges,
/// so no fresh entry opens until an explicit release and press arrive.
pub fn classify(
    config: &GestureConfig,
    pending: &PendingEvent,
    pin_low: bool,
    now_ms: u32,
    registered: Registered,
) -> Resolution {
    let elapsed = now_ms.wrapping_sub(pending.last_activity_ms);

    // 1. Press-hold: finger still down past the threshold
    if registered.press_hold
        && pending.repeat_count == 0
        && elapsed > config.press_hold_ms
        && pin_low
    {
        return Resolution::FirePressHold;
    }

    // 2. Released, and the multi-click window has gone quiet
    if (registered.multi_click || registered.press_hold)
        && !pin_low
        && elapsed > config.multi_click_window_ms
    {
        if pending.repeat_count > 1 && registered.multi_click {
            return Resolution::FireMultiClick(pending.repeat_count);
        }
        if registered.click {
            return Resolution::FireClick;
        }
        return Resolution::Discard;
    }

    // 3. Fast path for single-click-only pins: resolve on release
    if !registered.multi_click && !registered.press_hold && !pin_low && registered.click {
        return Resolution::FireClick;
    }

    // 4. Absolute timeout
    if elapsed > config.event_timeout_ms {
        return Resolution::Discard;
    }

    Resolution::Keep
}
