/// Per-point visibility strategies
use std::f64::consts::FRAC_PI_3;
use std::fmt;
use std::str::FromStr;

use crate::convex::ConvexOcclusion;
use crate::geometry::Edge;
use crate::shape::Shape;
use crate::vector::Point;

/// Decides whether a point is hidden from the center of projection
pub trait Occluder {
    /// `origin` is the edge the point was sampled from, if any. Faces bounded
    /// by that edge cannot hide the point. Vertex tests pass `None`.
    fn is_hidden(&self, shape: &Shape, point: &Point, origin: Option<&Edge>) -> bool;
}

/// Reports every point as hidden.
///
/// Callers that want everything drawn as visible must skip the occlusion
/// test entirely rather than use this strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOcclusion;

impl Occluder for NoOcclusion {
    fn is_hidden(&self, _shape: &Shape, _point: &Point, _origin: Option<&Edge>) -> bool {
        true
    }
}

/// Angle heuristic: a point is hidden when the directions towards the shape's
/// center and towards the center of projection are closer than 60 degrees.
///
/// Ignores the actual faces, so silhouettes come out approximate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateOcclusion;

impl ApproximateOcclusion {
    /// Angle at `point` between the center and the center of projection.
    ///
    /// A point on the center itself has no direction and yields NaN.
    pub fn view_angle(shape: &Shape, point: &Point) -> f64 {
        let to_center = shape.center() - point;
        let to_viewer = shape.center_of_projection() - point;

        let cos = to_center.dot(&to_viewer) / (to_center.norm() * to_viewer.norm());
        cos.clamp(-1.0, 1.0).acos()
    }

    /// Strictly below π/3 is hidden; NaN compares false and stays visible.
    pub fn hidden_at(theta: f64) -> bool {
        theta < FRAC_PI_3
    }
}

impl Occluder for ApproximateOcclusion {
    fn is_hidden(&self, shape: &Shape, point: &Point, _origin: Option<&Edge>) -> bool {
        Self::hidden_at(Self::view_angle(shape, point))
    }
}

/// Occlusion strategy chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OcclusionMode {
    #[default]
    None,
    Approximate,
    /// Ray-cast against faces; hidden points are not drawn.
    Convex,
    /// Same decision as `Convex`, but hidden points are drawn dimmed.
    ConvexRearVisible,
}

impl OcclusionMode {
    pub const ALL: [OcclusionMode; 4] = [
        OcclusionMode::None,
        OcclusionMode::Approximate,
        OcclusionMode::Convex,
        OcclusionMode::ConvexRearVisible,
    ];

    /// Next mode in the cycle, wrapping back to `None`
    pub fn next(self) -> Self {
        match self {
            OcclusionMode::None => OcclusionMode::Approximate,
            OcclusionMode::Approximate => OcclusionMode::Convex,
            OcclusionMode::Convex => OcclusionMode::ConvexRearVisible,
            OcclusionMode::ConvexRearVisible => OcclusionMode::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OcclusionMode::None => "none",
            OcclusionMode::Approximate => "approximate",
            OcclusionMode::Convex => "convex",
            OcclusionMode::ConvexRearVisible => "convex-rear-visible",
        }
    }

    pub fn is_convex(self) -> bool {
        matches!(self, OcclusionMode::Convex | OcclusionMode::ConvexRearVisible)
    }

    /// Whether hidden samples are drawn on the behind layer
    pub fn draws_hidden(self) -> bool {
        self != OcclusionMode::Convex
    }

    pub fn occluder(self) -> &'static dyn Occluder {
        match self {
            OcclusionMode::None => &NoOcclusion,
            OcclusionMode::Approximate => &ApproximateOcclusion,
            OcclusionMode::Convex | OcclusionMode::ConvexRearVisible => &ConvexOcclusion,
        }
    }

    pub fn is_hidden(self, shape: &Shape, point: &Point, origin: Option<&Edge>) -> bool {
        self.occluder().is_hidden(shape, point, origin)
    }
}

impl fmt::Display for OcclusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OcclusionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown occlusion mode: {s}"))
    }
}
