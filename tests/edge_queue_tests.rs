//! Edge queue tests

use rust_ble_remote::{Edge, EdgeDirection, EdgeQueue};

#[test]
fn test_queue_starts_empty() {
    let queue: EdgeQueue<16> = EdgeQueue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.pop(), None);
    assert_eq!(queue.capacity(), 16);
}

#[test]
fn test_cross_pin_fifo_fairness() {
    // Edges from different pins arriving in rapid succession must drain
    // in chronological order, not most-recent-first
    let queue: EdgeQueue<16> = EdgeQueue::new();

    queue.push(Edge::new(15, EdgeDirection::Falling));
    queue.push(Edge::new(18, EdgeDirection::Falling));
    queue.push(Edge::new(19, EdgeDirection::Falling));
    queue.push(Edge::new(15, EdgeDirection::Rising));

    assert_eq!(queue.pop().unwrap().pin, 15);
    assert_eq!(queue.pop().unwrap().pin, 18);
    assert_eq!(queue.pop().unwrap().pin, 19);
    let last = queue.pop().unwrap();
    assert_eq!(last.pin, 15);
    assert_eq!(last.direction, EdgeDirection::Rising);
}

#[test]
fn test_full_queue_drops_and_counts() {
    let queue: EdgeQueue<4> = EdgeQueue::new();

    for pin in 0..4 {
        assert!(queue.push(Edge::new(pin, EdgeDirection::Falling)));
    }
    assert!(!queue.push(Edge::new(4, EdgeDirection::Falling)));
    assert!(!queue.push(Edge::new(5, EdgeDirection::Falling)));

    assert_eq!(queue.dropped(), 2);
    assert_eq!(queue.len(), 4);

    queue.reset_dropped();
    assert_eq!(queue.dropped(), 0);
}

#[test]
fn test_sustained_wrap_preserves_order() {
    let queue: EdgeQueue<8> = EdgeQueue::new();

    // Many times the capacity, interleaving push and pop
    for round in 0..100u8 {
        queue.push(Edge::new(round, EdgeDirection::Falling));
        queue.push(Edge::new(round, EdgeDirection::Rising));

        let first = queue.pop().unwrap();
        let second = queue.pop().unwrap();
        assert_eq!(first, Edge::new(round, EdgeDirection::Falling));
        assert_eq!(second, Edge::new(round, EdgeDirection::Rising));
    }

    assert!(queue.is_empty());
    assert_eq!(queue.dropped(), 0);
}

#[test]
fn test_drain_to_empty_and_refill() {
    let queue: EdgeQueue<4> = EdgeQueue::new();

    queue.push(Edge::new(1, EdgeDirection::Falling));
    queue.push(Edge::new(2, EdgeDirection::Falling));
    while queue.pop().is_some() {}

    // Full capacity available again
    for pin in 0..4 {
        assert!(queue.push(Edge::new(pin, EdgeDirection::Rising)));
    }
    assert_eq!(queue.len(), 4);
}
