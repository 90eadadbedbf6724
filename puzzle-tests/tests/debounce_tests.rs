//! Integration Tests für die Taster-Entprellung
//!
//! Property-Tests über zufällige Pegelfolgen

use embassy_time::{Duration, Instant};
use proptest::prelude::*;
use puzzle_core::{EdgeEvent, InputDebouncer};

// ============================================================================
// Tests: ohne Entprellung
// ============================================================================

proptest! {
    /// Jeder Pegelwechsel wird genau einmal gemeldet
    #[test]
    fn test_every_level_change_reported_once(levels in proptest::collection::vec(any::<bool>(), 0..200)) {
        let mut button = InputDebouncer::new(Duration::from_ticks(0));
        let mut previous = true;
        let mut expected_presses = 0;
        let mut expected_releases = 0;
        let mut presses = 0;
        let mut releases = 0;

        for (step, &level) in levels.iter().enumerate() {
            if level != previous {
                if level {
                    expected_releases += 1;
                } else {
                    expected_presses += 1;
                }
                previous = level;
            }

            match button.poll(level, Instant::from_millis(step as u64 * 10)) {
                EdgeEvent::Pressed => presses += 1,
                EdgeEvent::Released => releases += 1,
                EdgeEvent::None => {}
            }

            prop_assert_eq!(button.is_held(), !level);
        }

        prop_assert_eq!(presses, expected_presses);
        prop_assert_eq!(releases, expected_releases);
    }

    /// Flanken wechseln sich immer ab (nie zwei Pressed hintereinander)
    #[test]
    fn test_edges_alternate(levels in proptest::collection::vec(any::<bool>(), 0..200), gap in 1u64..40) {
        let mut button = InputDebouncer::new(Duration::from_millis(20));
        let mut last_edge = EdgeEvent::Released;

        for (step, &level) in levels.iter().enumerate() {
            let edge = button.poll(level, Instant::from_millis(step as u64 * gap));
            if edge != EdgeEvent::None {
                prop_assert_ne!(edge, last_edge);
                last_edge = edge;
            }
            prop_assert_eq!(button.is_held(), last_edge == EdgeEvent::Pressed);
        }
    }
}

// ============================================================================
// Tests: mit Entprellung
// ============================================================================

#[test]
fn test_idle_high_produces_no_edges() {
    let mut button = InputDebouncer::default();

    for step in 0..100 {
        assert_eq!(button.poll(true, Instant::from_millis(step * 10)), EdgeEvent::None);
    }
    assert!(!button.is_held());
    assert!(button.level());
}

#[test]
fn test_bouncy_press_counts_once() {
    let mut button = InputDebouncer::new(Duration::from_millis(20));
    let samples = [
        (0, false),
        (2, true),
        (4, false),
        (6, true),
        (8, false),
        (50, false),
        (100, true),
        (103, false),
        (106, true),
        (200, true),
    ];

    let edges: Vec<EdgeEvent> = samples
        .iter()
        .map(|&(ms, level)| button.poll(level, Instant::from_millis(ms)))
        .filter(|edge| *edge != EdgeEvent::None)
        .collect();

    assert_eq!(edges, vec![EdgeEvent::Pressed, EdgeEvent::Released]);
    assert!(!button.is_held());
}

#[test]
fn test_held_button_stays_held() {
    let mut button = InputDebouncer::new(Duration::from_millis(20));
    assert_eq!(button.poll(false, Instant::from_millis(0)), EdgeEvent::Pressed);

    for step in 1..50 {
        assert_eq!(button.poll(false, Instant::from_millis(step * 10)), EdgeEvent::None);
        assert!(button.is_held());
    }
}
