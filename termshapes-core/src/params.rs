/// Rendering parameters and command step sizes
use std::f64::consts::PI;
use std::time::Duration;

use crate::vector::{Point, Vector};

/// Parameters shared by shape construction and frame rendering.
#[derive(Debug, Clone)]
pub struct RenderParams {
    /// Projection scale constant: a shape of radius ~1 fits the viewport.
    pub scale: f64,

    /// Edge density given to freshly built shapes.
    pub edge_density: usize,

    /// Center of projection given to freshly built shapes.
    pub center_of_projection: Point,

    /// Maximum vertices accepted from a description.
    pub max_vertices: usize,

    /// Maximum edges accepted from a description.
    pub max_edges: usize,

    /// Maximum faces accepted from a description.
    pub max_faces: usize,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            scale: 0.4,
            edge_density: 50,
            center_of_projection: Point::new(0.0, 0.0, 10000.0),
            max_vertices: 1024 * 10,
            max_edges: 1024 * 10,
            max_faces: 1024 * 10,
        }
    }
}

impl RenderParams {
    /// Fewer samples per edge, for large shapes or slow terminals.
    #[must_use]
    pub fn coarse() -> Self {
        Self {
            edge_density: 20,
            ..Default::default()
        }
    }

    /// More samples per edge, for large terminals.
    #[must_use]
    pub fn fine() -> Self {
        Self {
            edge_density: 120,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_edge_density(mut self, edge_density: usize) -> Self {
        self.edge_density = edge_density;
        self
    }
}

/// Increments applied by the interactive commands.
#[derive(Debug, Clone)]
pub struct StepSizes {
    /// Rotation step in radians.
    pub angle: f64,

    /// Translation step in shape units.
    pub distance: f64,

    /// Scale-up factor; scaling down uses its reciprocal.
    pub scale: f64,

    /// Per-axis angles applied on every autorotate tick.
    pub autorotate_direction: Vector,

    /// Time between autorotate ticks.
    pub autorotate_interval: Duration,
}

impl Default for StepSizes {
    fn default() -> Self {
        Self {
            angle: PI / 200.0,
            distance: 0.1,
            scale: 1.1,
            autorotate_direction: Vector::new(PI / 80.0, PI / 120.0, PI / 60.0),
            autorotate_interval: Duration::from_millis(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_only_change_density() {
        let base = RenderParams::default();
        let coarse = RenderParams::coarse();
        assert!(coarse.edge_density < base.edge_density);
        assert_eq!(coarse.center_of_projection, base.center_of_projection);
        assert!(RenderParams::fine().edge_density > base.edge_density);
    }
}
