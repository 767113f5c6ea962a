use crate::easing::Ease;
use std::time::Duration;

/// A single eased transition of one scalar from `from` to `to`.
///
/// Tweens are plain values owned by whatever they animate; cancelling one is
/// dropping it, so an owner holding `Option<Tween>` can never have two ramps
/// in flight for the same field.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    ease: Ease,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            ease,
        }
    }

    /// Advance by `dt` and return the new value.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }
}

/// Advance an optional tween in place; clears the slot once it completes.
///
/// Returns the current value, or `None` when no tween is running.
pub fn step_slot(slot: &mut Option<Tween>, dt: Duration) -> Option<f32> {
    let tween = slot.as_mut()?;
    let v = tween.advance(dt);
    if tween.is_finished() {
        *slot = None;
    }
    Some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_eases_and_reaches_target_exactly() {
        let mut t = Tween::new(0.0, 1.0, Duration::from_millis(100), Ease::Power2Out);
        let v = t.advance(Duration::from_millis(50));
        assert!((v - 0.75).abs() < 1e-6);
        assert!(!t.is_finished());
        let v = t.advance(Duration::from_millis(80));
        assert_eq!(v, 1.0);
        assert!(t.is_finished());
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let t = Tween::new(0.3, 0.9, Duration::ZERO, Ease::Power2Out);
        assert!(t.is_finished());
        assert_eq!(t.value(), 0.9);
    }

    #[test]
    fn step_slot_clears_completed_tween() {
        let mut slot = Some(Tween::new(1.0, 0.0, Duration::from_millis(20), Ease::Power2Out));
        assert!(step_slot(&mut slot, Duration::from_millis(10)).is_some());
        assert!(slot.is_some());
        assert_eq!(step_slot(&mut slot, Duration::from_millis(10)), Some(0.0));
        assert!(slot.is_none());
        assert_eq!(step_slot(&mut slot, Duration::from_millis(10)), None);
    }
}
