//! Per-pin gesture callback registration table.
//!
//! One callback per gesture kind per pin, installed at startup before the
//! dispatch tick first runs. Callbacks are boxed closures, so they can
//! capture state; boxing happens at registration time, never in interrupt
//! context. Registering a second handler of the same kind on a pin is a
//! caller programming error and is rejected explicitly rather than
//! silently overwriting the first.

use alloc::boxed::Box;

use crate::edge::{Pin, MAX_PINS};

/// Callback fired on a resolved single click.
pub type ClickCallback = Box<dyn FnMut() + Send>;

/// Callback fired on a resolved multi-click, with the repeat count.
pub type MultiClickCallback = Box<dyn FnMut(u8) + Send>;

/// Callback fired on a press held past the hold threshold.
pub type PressHoldCallback = Box<dyn FnMut() + Send>;

/// Gesture kinds, for registration errors and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Click,
    MultiClick,
    PressHold,
}

impl GestureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GestureKind::Click => "click",
            GestureKind::MultiClick => "multi-click",
            GestureKind::PressHold => "press-hold",
        }
    }
}

/// Registration failure.
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterError {
    /// A handler of this kind already exists for the pin. The existing
    /// handler stays active.
    AlreadyRegistered { pin: Pin, kind: GestureKind },

    /// Pin number outside the supported range.
    InvalidPin(Pin),
}

impl core::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegisterError::AlreadyRegistered { pin, kind } => {
                write!(f, "pin {} already has a {} handler", pin, kind.as_str())
            }
            RegisterError::InvalidPin(pin) => write!(f, "pin {} out of range", pin),
        }
    }
}

/// Handlers registered for one pin.
#[derive(Default)]
struct Handler {
    click: Option<ClickCallback>,
    multi_click: Option<MultiClickCallback>,
    press_hold: Option<PressHoldCallback>,
}

/// Which handler kinds a pin has registered.
///
/// Snapshot consumed by the classifier; keeps the classification function
/// pure (no access to the callbacks themselves).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registered {
    pub click: bool,
    pub multi_click: bool,
    pub press_hold: bool,
}

/// Per-pin callback table.
pub struct HandlerTable {
    slots: [Handler; MAX_PINS],
}

impl HandlerTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| Handler::default()),
        }
    }

    /// Register a single-click callback for a pin.
    pub fn register_click(&mut self, pin: Pin, cb: ClickCallback) -> Result<(), RegisterError> {
        let slot = self.slot_mut(pin)?;
        if slot.click.is_some() {
            return Err(RegisterError::AlreadyRegistered {
                pin,
                kind: GestureKind::Click,
            });
        }
        slot.click = Some(cb);
        Ok(())
    }

    /// Register a multi-click callback for a pin.
    pub fn register_multi_click(
        &mut self,
        pin: Pin,
        cb: MultiClickCallback,
    ) -> Result<(), RegisterError> {
        let slot = self.slot_mut(pin)?;
        if slot.multi_click.is_some() {
            return Err(RegisterError::AlreadyRegistered {
                pin,
                kind: GestureKind::MultiClick,
            });
        }
        slot.multi_click = Some(cb);
        Ok(())
    }

    /// Register a press-hold callback for a pin.
    pub fn register_press_hold(
        &mut self,
        pin: Pin,
        cb: PressHoldCallback,
    ) -> Result<(), RegisterError> {
        let slot = self.slot_mut(pin)?;
        if slot.press_hold.is_some() {
            return Err(RegisterError::AlreadyRegistered {
                pin,
                kind: GestureKind::PressHold,
            });
        }
        slot.press_hold = Some(cb);
        Ok(())
    }

    /// Which kinds are registered for a pin.
    pub fn registered(&self, pin: Pin) -> Registered {
        match self.slots.get(pin as usize) {
            Some(slot) => Registered {
                click: slot.click.is_some(),
                multi_click: slot.multi_click.is_some(),
                press_hold: slot.press_hold.is_some(),
            },
            None => Registered::default(),
        }
    }

    /// Fire the click callback for a pin, if registered.
    pub fn fire_click(&mut self, pin: Pin) {
        if let Some(cb) = self.slots.get_mut(pin as usize).and_then(|s| s.click.as_mut()) {
            cb();
        }
    }

    /// Fire the multi-click callback for a pin, if registered.
    pub fn fire_multi_click(&mut self, pin: Pin, repeats: u8) {
        if let Some(cb) = self
            .slots
            .get_mut(pin as usize)
            .and_then(|s| s.multi_click.as_mut())
        {
            cb(repeats);
        }
    }

    /// Fire the press-hold callback for a pin, if registered.
    pub fn fire_press_hold(&mut self, pin: Pin) {
        if let Some(cb) = self
            .slots
            .get_mut(pin as usize)
            .and_then(|s| s.press_hold.as_mut())
        {
            cb();
        }
    }

    fn slot_mut(&mut self, pin: Pin) -> Result<&mut Handler, RegisterError> {
        self.slots
            .get_mut(pin as usize)
            .ok_or(RegisterError::InvalidPin(pin))
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_empty_table() {
        let table = HandlerTable::new();
        assert_eq!(table.registered(7), Registered::default());
    }

    #[test]
    fn test_register_and_fire_click() {
        let mut table = HandlerTable::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);

        table
            .register_click(7, Box::new(move || {
                h.fetch_add(1, Ordering::Relaxed);
            }))
            .unwrap();

        assert!(table.registered(7).click);
        table.fire_click(7);
        table.fire_click(7);
        assert_eq!(hits.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_callback_mutates_moved_state() {
        // A callback that owns a driver-like value and calls a `&mut self`
        // method on it, as the firmware's LED click handler does
        struct FakeLed {
            on: bool,
            toggles: Arc<AtomicUsize>,
        }

        impl FakeLed {
            fn toggle(&mut self) {
                self.on = !self.on;
                self.toggles.fetch_add(1, Ordering::Relaxed);
            }
        }

        let toggles = Arc::new(AtomicUsize::new(0));
        let mut table = HandlerTable::new();
        let mut led = FakeLed {
            on: false,
            toggles: Arc::clone(&toggles),
        };

        table
            .register_click(7, Box::new(move || {
                led.toggle();
            }))
            .unwrap();

        table.fire_click(7);
        table.fire_click(7);
        assert_eq!(toggles.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_multi_click_receives_repeat_count() {
        let mut table = HandlerTable::new();
        let last = Arc::new(AtomicUsize::new(0));
        let l = Arc::clone(&last);

        table
            .register_multi_click(7, Box::new(move |n| {
                l.store(n as usize, Ordering::Relaxed);
            }))
            .unwrap();

        table.fire_multi_click(7, 3);
        assert_eq!(last.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_double_registration_rejected() {
        let mut table = HandlerTable::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let h = Arc::clone(&hits);
        table
            .register_click(7, Box::new(move || {
                h.fetch_add(1, Ordering::Relaxed);
            }))
            .unwrap();

        let err = table
            .register_click(7, Box::new(|| panic!("second handler must not install")))
            .unwrap_err();
        assert_eq!(
            err,
            RegisterError::AlreadyRegistered {
                pin: 7,
                kind: GestureKind::Click
            }
        );

        // First handler stays active
        table.fire_click(7);
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_kinds_independent_on_one_pin() {
        let mut table = HandlerTable::new();
        table.register_click(7, Box::new(|| {})).unwrap();
        table.register_press_hold(7, Box::new(|| {})).unwrap();

        let reg = table.registered(7);
        assert!(reg.click);
        assert!(!reg.multi_click);
        assert!(reg.press_hold);
    }

    #[test]
    fn test_invalid_pin() {
        let mut table = HandlerTable::new();
        let err = table.register_click(200, Box::new(|| {})).unwrap_err();
        assert_eq!(err, RegisterError::InvalidPin(200));
    }

    #[test]
    fn test_fire_unregistered_is_noop() {
        let mut table = HandlerTable::new();
        table.fire_click(7);
        table.fire_multi_click(7, 2);
        table.fire_press_hold(7);
    }
}
