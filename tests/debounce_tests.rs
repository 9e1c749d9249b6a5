//! Debounce gate tests

use rust_ble_remote::{DebounceGate, Pin, MAX_PINS};

#[test]
fn test_accept_then_suppress() {
    let gate = DebounceGate::new();

    assert!(gate.try_accept(7, 0));
    assert!(!gate.try_accept(7, 1));
    assert!(!gate.try_accept(7, 99));
    assert_eq!(gate.suppressed(), 2);
}

#[test]
fn test_suppression_is_direction_blind() {
    // The lock is per-pin, not per-edge: rapid re-bounces inside the
    // settle window are suppressed no matter which way they go. The gate
    // never sees directions at all; every raw notification while locked
    // is discarded.
    let gate = DebounceGate::new();

    assert!(gate.try_accept(7, 0));
    for t in [10, 20, 30, 40, 50] {
        assert!(!gate.try_accept(7, t));
    }
    assert_eq!(gate.suppressed(), 5);
}

#[test]
fn test_release_boundary_is_strict() {
    let gate = DebounceGate::new();
    assert!(gate.try_accept(7, 1000));

    // Exactly the threshold: still held (comparison is strictly greater)
    gate.release_expired(1100, 100);
    assert!(gate.is_locked(7));

    gate.release_expired(1101, 100);
    assert!(!gate.is_locked(7));
}

#[test]
fn test_reaccept_after_release() {
    let gate = DebounceGate::new();

    assert!(gate.try_accept(7, 0));
    gate.release_expired(150, 100);
    assert!(gate.try_accept(7, 150));

    // New lock timestamp applies
    gate.release_expired(200, 100);
    assert!(gate.is_locked(7));
    gate.release_expired(251, 100);
    assert!(!gate.is_locked(7));
}

#[test]
fn test_pins_locked_independently() {
    let gate = DebounceGate::new();

    assert!(gate.try_accept(1, 0));
    assert!(gate.try_accept(2, 50));

    // Pin 1 expires first
    gate.release_expired(101, 100);
    assert!(!gate.is_locked(1));
    assert!(gate.is_locked(2));

    gate.release_expired(151, 100);
    assert!(!gate.is_locked(2));
}

#[test]
fn test_expiry_across_wraparound() {
    let gate = DebounceGate::new();

    let start = u32::MAX - 30;
    assert!(gate.try_accept(9, start));

    // 80 ms later (past the wrap point): still settling
    gate.release_expired(start.wrapping_add(80), 100);
    assert!(gate.is_locked(9));

    gate.release_expired(start.wrapping_add(101), 100);
    assert!(!gate.is_locked(9));
}

#[test]
fn test_out_of_range_pin() {
    let gate = DebounceGate::new();

    assert!(!gate.try_accept(MAX_PINS as Pin, 0));
    assert!(!gate.try_accept(255, 0));
    assert!(!gate.is_locked(255));
}

#[test]
fn test_suppressed_counter_reset() {
    let gate = DebounceGate::new();

    gate.try_accept(7, 0);
    gate.try_accept(7, 10);
    assert_eq!(gate.suppressed(), 1);

    gate.reset_suppressed();
    assert_eq!(gate.suppressed(), 0);
}
