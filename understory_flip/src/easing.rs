// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves and transition timing.
//!
//! Surfaces receive a [`Transition`] with every scheduled animation and are free
//! to drive it however their toolkit prefers (a CSS transition, a per-frame
//! interpolation, ...). [`Easing::sample`] is provided for surfaces that
//! interpolate themselves:
//!
//! ```
//! use understory_flip::Easing;
//!
//! assert_eq!(Easing::Linear.sample(0.25), 0.25);
//! assert_eq!(Easing::Standard.sample(0.0), 0.0);
//! assert_eq!(Easing::Standard.sample(1.0), 1.0);
//! // The standard curve front-loads motion.
//! assert!(Easing::Standard.sample(0.5) > 0.5);
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Default transition duration for reorder animations, in milliseconds.
pub const DEFAULT_DURATION_MS: u32 = 300;

/// An easing curve mapping linear progress in `[0, 1]` to eased progress.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Easing {
    /// Identity curve.
    Linear,
    /// Material "standard" curve, `cubic-bezier(0.4, 0, 0.2, 1)`.
    #[default]
    Standard,
    /// CSS `ease`, `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    Ease,
    /// Arbitrary cubic Bézier with control points `(x1, y1)` and `(x2, y2)`.
    ///
    /// `x1` and `x2` are expected to lie in `[0, 1]` so the curve is a function of time.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Control points `(x1, y1, x2, y2)` of this curve.
    pub const fn control_points(self) -> (f64, f64, f64, f64) {
        match self {
            Self::Linear => (0.0, 0.0, 1.0, 1.0),
            Self::Standard => (0.4, 0.0, 0.2, 1.0),
            Self::Ease => (0.25, 0.1, 0.25, 1.0),
            Self::CubicBezier(x1, y1, x2, y2) => (x1, y1, x2, y2),
        }
    }

    /// Sample the curve at linear progress `t`.
    ///
    /// `t` is clamped to `[0, 1]`; the endpoints map exactly to `0.0` and `1.0`.
    pub fn sample(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        if let Self::Linear = self {
            return t;
        }
        let (x1, y1, x2, y2) = self.control_points();
        let s = solve_parameter(x1, x2, t);
        bezier(y1, y2, s)
    }
}

/// Timing for one scheduled animation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transition {
    /// Duration in milliseconds.
    pub duration_ms: u32,
    /// Easing curve.
    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::Standard,
        }
    }
}

impl Transition {
    /// A transition with the given duration and the default easing.
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    /// Replace the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

// One coordinate of a cubic Bézier anchored at 0 and 1.
fn bezier(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

// Find the curve parameter whose x coordinate is `x`.
fn solve_parameter(x1: f64, x2: f64, x: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    let mut s = x;
    for _ in 0..8 {
        let err = bezier(x1, x2, s) - x;
        if err.abs() < EPSILON {
            return s;
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    // Newton stalled; bisect.
    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let value = bezier(x1, x2, s);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    s
}
