//! Scroll-velocity signal with threshold-triggered activation.
//!
//! Scroll events set a target velocity; every frame the current velocity
//! eases toward it. After a short quiet period the velocity decays to zero,
//! and the tracker deactivates once that decay lands below the cut-off.

use crate::constants::{
    DEACTIVATE_BELOW_VELOCITY, FILTER_ACTIVE_ABOVE, FILTER_SHADOW_GAIN, FILTER_SHADOW_MAX_PX,
    SCROLL_IDLE_DELAY, SCROLL_VELOCITY_SCALE, VELOCITY_DECAY_DURATION, VELOCITY_SMOOTHING,
};
use crate::easing::Ease;
use crate::resize::Debounce;
use crate::tween::{step_slot, Tween};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollTransition {
    Activated,
    Deactivated,
}

#[derive(Clone, Debug)]
pub struct ScrollVelocityTracker {
    current: f32,
    target: f32,
    active: bool,
    idle: Debounce,
    decay: Option<Tween>,
}

impl Default for ScrollVelocityTracker {
    fn default() -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            active: false,
            idle: Debounce::new(SCROLL_IDLE_DELAY),
            decay: None,
        }
    }
}

impl ScrollVelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one scroll event. Returns `Activated` when the target velocity
    /// crosses `threshold` while inactive.
    pub fn on_scroll(&mut self, velocity: f32, threshold: f32) -> Option<ScrollTransition> {
        if !velocity.is_finite() {
            return None;
        }
        self.target = velocity.abs() * SCROLL_VELOCITY_SCALE;
        self.decay = None;
        self.idle.trigger();
        if self.target > threshold && !self.active {
            self.active = true;
            return Some(ScrollTransition::Activated);
        }
        None
    }

    /// Advance one frame.
    pub fn tick(&mut self, dt: Duration) -> Option<ScrollTransition> {
        if self.idle.tick(dt) {
            self.decay = Some(Tween::new(
                self.current,
                0.0,
                VELOCITY_DECAY_DURATION,
                Ease::Power2Out,
            ));
        }

        if self.decay.is_none() {
            self.current += (self.target - self.current) * VELOCITY_SMOOTHING;
            return None;
        }

        let v = step_slot(&mut self.decay, dt)?;
        self.current = v;
        self.target = v;
        if self.decay.is_none() && self.active && self.current < DEACTIVATE_BELOW_VELOCITY {
            self.active = false;
            return Some(ScrollTransition::Deactivated);
        }
        None
    }

    /// Drop-shadow offset in px for the grayscale filter, or `None` when the
    /// velocity is too small to show.
    pub fn filter_strength(&self) -> Option<f32> {
        (self.current > FILTER_ACTIVE_ABOVE)
            .then(|| (self.current * FILTER_SHADOW_GAIN).min(FILTER_SHADOW_MAX_PX))
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_decaying(&self) -> bool {
        self.decay.is_some()
    }
}

/// Turns the page scroll offset sampled once per frame into velocity events.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollSampler {
    last: Option<f64>,
}

impl ScrollSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Velocity in CSS px per frame, or `None` if the offset did not move.
    pub fn step(&mut self, offset: f64) -> Option<f32> {
        let prev = self.last.replace(offset)?;
        let delta = offset - prev;
        (delta != 0.0 && delta.is_finite()).then_some(delta as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(10);

    #[test]
    fn current_eases_toward_target() {
        let mut t = ScrollVelocityTracker::new();
        t.on_scroll(10.0, 0.08);
        t.tick(FRAME);
        assert!((t.current() - 0.2 * VELOCITY_SMOOTHING).abs() < 1e-6);
    }

    #[test]
    fn below_threshold_stays_inactive() {
        let mut t = ScrollVelocityTracker::new();
        assert_eq!(t.on_scroll(-3.0, 0.08), None);
        assert!((t.target() - 0.06).abs() < 1e-6);
        assert!(!t.is_active());
    }

    #[test]
    fn filter_shadow_is_capped() {
        let mut t = ScrollVelocityTracker::new();
        assert_eq!(t.filter_strength(), None);
        t.on_scroll(100.0, 0.08);
        for _ in 0..3 {
            t.tick(FRAME);
        }
        assert_eq!(t.filter_strength(), Some(FILTER_SHADOW_MAX_PX));
    }

    #[test]
    fn sampler_reports_deltas_only() {
        let mut s = ScrollSampler::new();
        assert_eq!(s.step(100.0), None);
        assert_eq!(s.step(100.0), None);
        assert_eq!(s.step(112.5), Some(12.5));
        assert_eq!(s.step(90.0), Some(-22.5));
    }
}
