//! Vector and field geometry helpers
//!
//! Positions and velocities are plain `(x, y)` tuples in field units.
//! Every normalization is guarded: a zero-length input yields the zero
//! vector, never NaN.

use serde::{Deserialize, Serialize};

/// 2D vector / point in field units
pub type Vec2 = (f32, f32);

/// Lengths below this are treated as zero
pub const EPSILON: f32 = 0.0001;

#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    (a.0 + b.0, a.1 + b.1)
}

#[inline]
pub fn sub(a: Vec2, b: Vec2) -> Vec2 {
    (a.0 - b.0, a.1 - b.1)
}

#[inline]
pub fn scale(v: Vec2, s: f32) -> Vec2 {
    (v.0 * s, v.1 * s)
}

#[inline]
pub fn length(v: Vec2) -> f32 {
    (v.0 * v.0 + v.1 * v.1).sqrt()
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    length(sub(a, b))
}

#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    ((a.0 + b.0) * 0.5, (a.1 + b.1) * 0.5)
}

/// Unit vector along `v`, or `(0, 0)` when `v` has no length.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let len = length(v);
    if len < EPSILON {
        (0.0, 0.0)
    } else {
        (v.0 / len, v.1 / len)
    }
}

/// Unit vector for a heading in radians.
#[inline]
pub fn from_angle(angle: f32) -> Vec2 {
    (angle.cos(), angle.sin())
}

/// Heading of `v` in radians, `atan2(y, x)`.
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.1.atan2(v.0)
}

/// Smallest signed difference `a - b`, wrapped into `[-PI, PI]`.
pub fn angle_diff(a: f32, b: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut d = (a - b) % TAU;
    if d > PI {
        d -= TAU;
    } else if d < -PI {
        d += TAU;
    }
    d
}

/// Axis-aligned rectangle, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Shrink by `margin` on every side. Collapses to the center line when
    /// the margin exceeds half the extent, so `clamp` stays well defined.
    pub fn inset(&self, margin: f32) -> Self {
        let cx = (self.min.0 + self.max.0) * 0.5;
        let cy = (self.min.1 + self.max.1) * 0.5;
        let min_x = (self.min.0 + margin).min(cx);
        let max_x = (self.max.0 - margin).max(cx);
        let min_y = (self.min.1 + margin).min(cy);
        let max_y = (self.max.1 - margin).max(cy);
        Self { min: (min_x, min_y), max: (max_x, max_y) }
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        (p.0.clamp(self.min.0, self.max.0), p.1.clamp(self.min.1, self.max.1))
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.0 >= self.min.0 && p.0 <= self.max.0 && p.1 >= self.min.1 && p.1 <= self.max.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(normalize((0.0, 0.0)), (0.0, 0.0));
        assert_eq!(normalize((0.00001, 0.0)), (0.0, 0.0));
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = normalize((3.0, 4.0));
        assert!((n.0 - 0.6).abs() < 1e-6);
        assert!((n.1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_distance() {
        assert!((distance((0.0, 0.0), (3.0, 4.0)) - 5.0).abs() < 1e-6);
        assert_eq!(distance((2.0, 2.0), (2.0, 2.0)), 0.0);
    }

    #[test]
    fn test_angle_diff_wraps() {
        use std::f32::consts::PI;
        let d = angle_diff(PI - 0.1, -PI + 0.1);
        assert!((d + 0.2).abs() < 1e-5);
        assert!(angle_diff(0.3, 0.1) > 0.0);
    }

    #[test]
    fn test_rect_inset_and_clamp() {
        let field = Rect::new((0.0, 0.0), (800.0, 500.0));
        let inner = field.inset(30.0);
        assert_eq!(inner.min, (30.0, 30.0));
        assert_eq!(inner.max, (770.0, 470.0));
        assert_eq!(inner.clamp((-100.0, 900.0)), (30.0, 470.0));
        assert!(inner.contains((400.0, 250.0)));
        assert!(!inner.contains((10.0, 250.0)));
    }

    #[test]
    fn test_rect_inset_collapses_instead_of_inverting() {
        let small = Rect::new((0.0, 0.0), (40.0, 40.0));
        let inner = small.inset(30.0);
        assert_eq!(inner.min, (20.0, 20.0));
        assert_eq!(inner.max, (20.0, 20.0));
        assert_eq!(inner.clamp((100.0, -5.0)), (20.0, 20.0));
    }

    mod proptests {
        use crate::engine::geometry::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: clamping always lands inside the rectangle
            #[test]
            fn prop_clamp_inside(
                x in -2000.0f32..2000.0f32,
                y in -2000.0f32..2000.0f32,
                margin in 0.0f32..300.0f32
            ) {
                let rect = Rect::new((0.0, 0.0), (800.0, 500.0)).inset(margin);
                prop_assert!(rect.contains(rect.clamp((x, y))));
            }

            /// Property: normalize never produces NaN and is unit or zero
            #[test]
            fn prop_normalize_guarded(x in -1000.0f32..1000.0f32, y in -1000.0f32..1000.0f32) {
                let n = normalize((x, y));
                prop_assert!(n.0.is_finite() && n.1.is_finite());
                let len = length(n);
                prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-4);
            }
        }
    }
}
