//! Easing curves
//!
//! Each curve remaps normalized progress `t` in `[0, 1]`. All curves are pure
//! and total: inputs outside `[0, 1]` still produce a finite value (polynomial
//! curves extrapolate, cubic-bezier curves are pinned to their endpoints).

use std::f32::consts::PI;

/// An easing curve
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// `t`
    #[default]
    Linear,
    /// `1 - (1 - t)^2`
    Decelerate,
    /// `cos((t + 1)π) / 2 + 0.5`
    AccelerateDecelerate,
    /// Pulls back past the target before settling on it; larger tension
    /// gives a sharper bounce.
    Overshoot { tension: f32 },
    /// Two-control-point cubic bezier `(x1, y1, x2, y2)` anchored at `(0, 0)` and `(1, 1)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Material "standard" curve: quick start, gentle landing
    pub const FAST_OUT_SLOW_IN: Easing = Easing::CubicBezier(0.4, 0.0, 0.2, 1.0);

    /// Slow start, fast landing
    pub const SLOW_OUT_FAST_IN: Easing = Easing::CubicBezier(0.8, 0.0, 0.4, 1.0);

    /// Default overshoot tension
    pub const DEFAULT_TENSION: f32 = 2.0;

    /// Overshoot with the given tension
    pub const fn overshoot(tension: f32) -> Easing {
        Easing::Overshoot { tension }
    }

    /// Apply the easing to progress `t`
    pub fn apply(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Easing::Overshoot { tension } => {
                let u = t - 1.0;
                u * u * ((tension + 1.0) * u + tension) + 1.0
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// Whether the curve can leave `[0, 1]` for inputs inside `[0, 1]`
    pub fn overshoots(&self) -> bool {
        match *self {
            Easing::Overshoot { tension } => tension > 0.0,
            Easing::CubicBezier(_, y1, _, y2) => {
                !(0.0..=1.0).contains(&y1) || !(0.0..=1.0).contains(&y2)
            }
            _ => false,
        }
    }
}

/// Evaluate a cubic bezier easing at `fraction`
///
/// Solves `x(s) = fraction` for the curve parameter with Newton-Raphson,
/// falling back to bisection, then returns `y(s)`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, s: f32| ((a * s + b) * s + c) * s;
    let derivative = |a: f32, b: f32, c: f32, s: f32| (3.0 * a * s + 2.0 * b) * s + c;

    let mut s = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, s) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = derivative(ax, bx, cx, s);
        if dx.abs() < 1e-6 {
            break;
        }
        s = (s - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        let mut lo = 0.0;
        let mut hi = 1.0;
        s = fraction;
        for _ in 0..24 {
            let delta = sample(ax, bx, cx, s) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                hi = s;
            } else {
                lo = s;
            }
            s = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::Decelerate,
        Easing::AccelerateDecelerate,
        Easing::overshoot(Easing::DEFAULT_TENSION),
        Easing::overshoot(4.0),
        Easing::FAST_OUT_SLOW_IN,
        Easing::SLOW_OUT_FAST_IN,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_overshoot_endpoints_any_tension() {
        for tension in [0.0, 0.5, 1.0, 1.5, 2.0, 4.0, 10.0] {
            let easing = Easing::overshoot(tension);
            assert!(easing.apply(0.0).abs() < 1e-5);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_overshoot_exceeds_target() {
        let easing = Easing::overshoot(4.0);
        let peak = (1..100)
            .map(|i| easing.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
        assert!(easing.overshoots());
        assert!(!Easing::Decelerate.overshoots());
    }

    #[test]
    fn test_decelerate_shape() {
        assert!((Easing::Decelerate.apply(0.5) - 0.75).abs() < 1e-6);
        assert!((Easing::Linear.apply(0.3) - 0.3).abs() < 1e-6);
        assert!((Easing::AccelerateDecelerate.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_bezier_monotonic() {
        for easing in [Easing::FAST_OUT_SLOW_IN, Easing::SLOW_OUT_FAST_IN] {
            let mut previous = 0.0;
            for i in 0..=100 {
                let value = easing.apply(i as f32 / 100.0);
                assert!(value + 1e-4 >= previous, "{easing:?} at step {i}");
                previous = value;
            }
        }
        // Slow start: barely moved a quarter of the way in
        assert!(Easing::SLOW_OUT_FAST_IN.apply(0.25) < 0.1);
        // Quick start: well past linear by the halfway point
        assert!(Easing::FAST_OUT_SLOW_IN.apply(0.5) > 0.7);
    }

    #[test]
    fn test_out_of_range_inputs_are_defined() {
        for easing in ALL {
            for t in [-1.0, -0.25, 1.25, 3.0] {
                assert!(easing.apply(t).is_finite(), "{easing:?} at {t}");
            }
        }
        assert_eq!(Easing::FAST_OUT_SLOW_IN.apply(-0.5), 0.0);
        assert_eq!(Easing::FAST_OUT_SLOW_IN.apply(1.5), 1.0);
        assert!((Easing::Linear.apply(1.5) - 1.5).abs() < 1e-6);
    }
}
