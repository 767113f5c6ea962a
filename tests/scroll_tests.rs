// Host-side tests for the scroll velocity tracker.

use fisheye_core::constants::{DEACTIVATE_BELOW_VELOCITY, VELOCITY_SMOOTHING};
use fisheye_core::scroll::{ScrollTransition, ScrollVelocityTracker};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(10);
const THRESHOLD: f32 = 0.08;

#[test]
fn activates_once_per_burst() {
    let mut t = ScrollVelocityTracker::new();
    assert_eq!(t.on_scroll(10.0, THRESHOLD), Some(ScrollTransition::Activated));
    assert_eq!(t.on_scroll(-25.0, THRESHOLD), None);
    assert_eq!(t.on_scroll(10.0, THRESHOLD), None);
    assert!(t.is_active());
    assert!((t.target() - 0.2).abs() < 1e-6);
}

#[test]
fn non_finite_velocity_is_ignored() {
    let mut t = ScrollVelocityTracker::new();
    assert_eq!(t.on_scroll(f32::NAN, THRESHOLD), None);
    assert_eq!(t.target(), 0.0);
}

#[test]
fn quiet_period_decays_then_deactivates() {
    let mut t = ScrollVelocityTracker::new();
    t.on_scroll(10.0, THRESHOLD);

    let mut deactivated_at = None;
    let mut last = f32::MAX;
    for frame in 1..=80 {
        let transition = t.tick(FRAME);
        if frame > 5 {
            assert!(t.current() <= last, "decay must not rise");
        }
        last = t.current();
        if transition == Some(ScrollTransition::Deactivated) {
            deactivated_at = Some(frame);
            break;
        }
    }
    // 50ms idle, then a 500ms decay
    assert_eq!(deactivated_at, Some(54));
    assert!(!t.is_active());
    assert!(t.current() < DEACTIVATE_BELOW_VELOCITY);
    assert!(!t.is_decaying());
}

#[test]
fn new_scroll_cancels_decay() {
    let mut t = ScrollVelocityTracker::new();
    t.on_scroll(10.0, THRESHOLD);
    for _ in 0..10 {
        t.tick(FRAME);
    }
    assert!(t.is_decaying());
    t.on_scroll(10.0, THRESHOLD);
    assert!(!t.is_decaying());
    let before = t.current();
    t.tick(FRAME);
    let expected = before + (0.2 - before) * VELOCITY_SMOOTHING;
    assert!((t.current() - expected).abs() < 1e-6);
    assert!(t.is_active());
}

#[test]
fn decay_without_activation_stays_silent() {
    let mut t = ScrollVelocityTracker::new();
    assert_eq!(t.on_scroll(2.0, THRESHOLD), None);
    for _ in 0..80 {
        assert_eq!(t.tick(FRAME), None);
    }
    assert_eq!(t.current(), 0.0);
}
