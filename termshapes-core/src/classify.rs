/// Whole-edge visibility classification for convex occlusion
///
/// On a convex solid an edge whose two endpoints and midpoint are all visible
/// is visible along its whole length, and an edge with both endpoints hidden
/// is hidden along its whole length. Only the remaining edges need every
/// sample tested.
use crate::convex::ConvexOcclusion;
use crate::geometry::Edge;
use crate::occlusion::{OcclusionMode, Occluder};
use crate::shape::Shape;
use crate::vector::midpoint;

/// Visibility of an edge for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOcclusion {
    UniformVisible,
    UniformHidden,
    /// Samples must be tested one by one.
    Mixed,
}

impl EdgeOcclusion {
    /// The shared hidden flag of every sample, if the edge is uniform
    pub fn uniform_hidden(self) -> Option<bool> {
        match self {
            EdgeOcclusion::UniformVisible => Some(false),
            EdgeOcclusion::UniformHidden => Some(true),
            EdgeOcclusion::Mixed => None,
        }
    }
}

/// Classify `edge` using at most three probes.
///
/// Non-convex modes are always `Mixed`; their per-point tests are cheap.
pub fn classify_edge(shape: &Shape, mode: OcclusionMode, edge: &Edge) -> EdgeOcclusion {
    if !mode.is_convex() {
        return EdgeOcclusion::Mixed;
    }

    let (p0, p1) = shape.edge_points(edge);
    let hidden0 = ConvexOcclusion.is_hidden(shape, &p0, Some(edge));
    let hidden1 = ConvexOcclusion.is_hidden(shape, &p1, Some(edge));

    match (hidden0, hidden1) {
        (false, false) => {
            let mid = midpoint(&p0, &p1);
            if ConvexOcclusion.is_hidden(shape, &mid, Some(edge)) {
                EdgeOcclusion::Mixed
            } else {
                EdgeOcclusion::UniformVisible
            }
        }
        (true, true) => EdgeOcclusion::UniformHidden,
        _ => EdgeOcclusion::Mixed,
    }
}
