/// Vector arithmetic helpers shared by the transform and occlusion code
///
/// Addition, subtraction, scaling, dot and cross products come straight from
/// nalgebra. This module adds the few operations the occlusion tests need on
/// top of them.
use nalgebra::{Point3, Vector3};

pub type Point = Point3<f64>;
pub type Vector = Vector3<f64>;

/// Winding of three points as seen along a reference normal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Colinear,
    Clockwise,
    CounterClockwise,
}

/// Unit vector in the direction of `v`.
///
/// `v` must be non-zero. A zero vector yields NaN components.
pub fn unit(v: &Vector) -> Vector {
    debug_assert!(v.norm() > 0.0, "unit vector of a zero-length vector");
    v / v.norm()
}

pub fn midpoint(p0: &Point, p1: &Point) -> Point {
    nalgebra::center(p0, p1)
}

/// Point at parameter `t` on the segment from `p0` to `p1`
pub fn lerp(p0: &Point, p1: &Point, t: f64) -> Point {
    p0 + (p1 - p0) * t
}

/// Orientation of `p0, p1, p2` relative to `normal`.
///
/// The sign of `normal · ((p1 - p0) × (p2 - p0))` decides the winding; an
/// exact zero means the points are colinear.
pub fn orientation(p0: &Point, p1: &Point, p2: &Point, normal: &Vector) -> Orientation {
    let turn = normal.dot(&(p1 - p0).cross(&(p2 - p0)));

    if turn < 0.0 {
        Orientation::Clockwise
    } else if turn > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Colinear
    }
}

/// Whether `p` lies inside the axis-aligned box spanned by `p0` and `p1`.
///
/// Only meaningful when the three points are already known to be colinear.
pub fn on_segment(p0: &Point, p1: &Point, p: &Point) -> bool {
    (0..3).all(|i| p[i] <= p0[i].max(p1[i]) && p[i] >= p0[i].min(p1[i]))
}
