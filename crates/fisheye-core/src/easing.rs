//! Easing curves used by intensity ramps, crossfades and velocity decay.

/// Easing curve mapping linear progress `t` in \[0, 1\] to eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    /// Quadratic ease-out.
    Power2Out,
    /// CSS `cubic-bezier(x1, y1, x2, y2)` timing function.
    CubicBezier(f32, f32, f32, f32),
}

/// `cubic-bezier(0.23, 1, 0.32, 1)`: the curve shared by hover, title and
/// fisheye ramps.
pub const EASE_OUT_QUINT_LIKE: Ease = Ease::CubicBezier(0.23, 1.0, 0.32, 1.0);

impl Ease {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Ease::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::CubicBezier(x1, y1, x2, y2) => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                let s = solve_bezier_x(t, x1, x2);
                bezier_component(s, y1, y2)
            }
        }
    }
}

// One axis of a cubic bezier anchored at 0 and 1.
#[inline]
fn bezier_component(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[inline]
fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

// Find the curve parameter whose x equals `x`: Newton steps, then bisection
// when the slope flattens out.
fn solve_bezier_x(x: f32, x1: f32, x2: f32) -> f32 {
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_component(s, x1, x2) - x;
        if err.abs() < 1e-6 {
            return s;
        }
        let d = bezier_slope(s, x1, x2);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let v = bezier_component(s, x1, x2);
        if (v - x).abs() < 1e-6 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for ease in [Ease::Power2Out, EASE_OUT_QUINT_LIKE] {
            assert!(ease.apply(0.0).abs() < 1e-5, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-5, "{ease:?} at 1");
        }
    }

    #[test]
    fn bezier_is_front_loaded_and_monotonic() {
        let mid = EASE_OUT_QUINT_LIKE.apply(0.5);
        assert!(mid > 0.9, "expected strong ease-out, got {mid}");
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = EASE_OUT_QUINT_LIKE.apply(i as f32 / 100.0);
            assert!(v + 1e-5 >= prev, "not monotonic at step {i}");
            assert!(v <= 1.0 + 1e-5);
            prev = v;
        }
    }

    #[test]
    fn linear_bezier_matches_linear() {
        let linear = Ease::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((linear.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Ease::Power2Out.apply(-1.0), 0.0);
        assert_eq!(Ease::Power2Out.apply(2.0), 1.0);
    }
}
