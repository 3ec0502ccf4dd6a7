/*!
 * Window Predicate Tests
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sched_weight::scheduler::{in_window, window_bounds, WindowGate};

#[test]
fn test_literal_cases() {
    assert!(in_window(90, 90, 45));
    assert!(!in_window(10, 0, 20));
    assert!(!in_window(45, 90, 45));
    assert!(!in_window(135, 90, 45));
    assert!(in_window(350, -10, 5));
}

#[test]
fn test_gate_matches_predicate() {
    let gate = WindowGate::new(270, 30, 500);
    for now in (0..360).step_by(5) {
        assert_eq!(gate.admits(now), in_window(now, 270, 30), "now = {}", now);
    }
}

proptest! {
    #[test]
    fn prop_bounds_are_normalized(degree in any::<i32>(), range in any::<i32>()) {
        let (a, b) = window_bounds(degree, range);
        prop_assert!((0..360).contains(&a));
        prop_assert!((0..360).contains(&b));
    }

    #[test]
    fn prop_strictly_between_bounds(
        now in -1000i32..1000,
        degree in -1000i32..1000,
        range in -400i32..400,
    ) {
        let (a, b) = window_bounds(degree, range);
        let expected = a.min(b) < now && now < a.max(b);
        prop_assert_eq!(in_window(now, degree, range), expected);
    }

    #[test]
    fn prop_degree_is_periodic(now in 0i32..360, degree in -720i32..720, range in 0i32..180) {
        prop_assert_eq!(in_window(now, degree, range), in_window(now, degree + 360, range));
    }

    #[test]
    fn prop_total_over_extremes(now in any::<i32>(), degree in any::<i32>(), range in any::<i32>()) {
        let first = in_window(now, degree, range);
        prop_assert_eq!(first, in_window(now, degree, range));
    }
}
