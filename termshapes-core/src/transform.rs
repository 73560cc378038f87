/// Rigid transforms applied in place to a shape's vertices
use std::time::Duration;

use crate::geometry::Axis;
use crate::shape::Shape;
use crate::vector::Vector;

/// Per-tick rotation applied by the autorotate timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoRotate {
    /// Angle in radians about x, y and z for each tick.
    pub direction: Vector,
    pub interval: Duration,
}

impl AutoRotate {
    pub fn new(direction: Vector, interval: Duration) -> Self {
        Self { direction, interval }
    }

    /// Rotate about x, then y, then z by the direction's components
    pub fn step(&self, shape: &mut Shape) {
        for axis in Axis::ALL {
            Transform::rotate(shape, self.direction[axis.index()], axis);
        }
    }
}

/// Transform operations on a shape.
///
/// Every operation moves the vertices and then recomputes all face normals,
/// so normals always match the current positions.
pub struct Transform;

impl Transform {
    /// Rotate by `theta` radians about an axis through the shape's center.
    ///
    /// Only the coordinate pair orthogonal to `axis` changes.
    pub fn rotate(shape: &mut Shape, theta: f64, axis: Axis) {
        let (fst, snd) = axis.rotation_plane();
        let (sin, cos) = theta.sin_cos();
        let cfst = shape.center[fst];
        let csnd = shape.center[snd];

        for v in &mut shape.vertices {
            let dfst = v[fst] - cfst;
            let dsnd = v[snd] - csnd;

            v[fst] = dfst * cos - dsnd * sin + cfst;
            v[snd] = dsnd * cos + dfst * sin + csnd;
        }

        shape.update_normals();
    }

    /// Scale every vertex about the center by `factor`.
    ///
    /// A zero factor collapses the shape onto its center; a negative factor
    /// inverts it through the center.
    pub fn scale(shape: &mut Shape, factor: f64) {
        let center = shape.center;
        for v in &mut shape.vertices {
            *v = center + (*v - center) * factor;
        }

        shape.update_normals();
    }

    /// Move the center and every vertex by `distance` along `axis`
    pub fn translate(shape: &mut Shape, distance: f64, axis: Axis) {
        let i = axis.index();
        shape.center[i] += distance;
        for v in &mut shape.vertices {
            v[i] += distance;
        }

        shape.update_normals();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RenderParams;
    use crate::vector::Point;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn cube() -> Shape {
        Shape::cube(&RenderParams::default())
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let mut shape = cube();
        Transform::rotate(&mut shape, FRAC_PI_2, Axis::Z);
        // (1, 1, 1) -> (-1, 1, 1)
        assert_relative_eq!(shape.vertices()[0], Point::new(-1.0, 1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_leaves_axis_component() {
        let mut shape = cube();
        Transform::rotate(&mut shape, 0.7, Axis::Y);
        for (moved, original) in shape.vertices().iter().zip(cube().vertices()) {
            assert_eq!(moved.y, original.y);
        }
    }

    #[test]
    fn test_rotation_about_offset_center() {
        let mut shape = cube();
        Transform::translate(&mut shape, 3.0, Axis::X);
        Transform::rotate(&mut shape, FRAC_PI_2, Axis::Z);
        assert_eq!(shape.center(), Point::new(3.0, 0.0, 0.0));
        // (4, 1, 1) about (3, 0) -> (2, 1, 1)
        assert_relative_eq!(shape.vertices()[0], Point::new(2.0, 1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_updates_normals() {
        let mut shape = cube();
        Transform::rotate(&mut shape, 0.3, Axis::X);
        let vertices = shape.vertices().to_vec();
        for face in shape.faces() {
            assert_relative_eq!(face.normal, face.calculate_normal(&vertices), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_scale_zero_collapses_to_center() {
        let mut shape = cube();
        Transform::translate(&mut shape, -2.0, Axis::Z);
        Transform::scale(&mut shape, 0.0);
        for v in shape.vertices() {
            assert_eq!(*v, shape.center());
        }
    }

    #[test]
    fn test_negative_scale_inverts() {
        let mut shape = cube();
        Transform::scale(&mut shape, -1.0);
        assert_eq!(shape.vertices()[0], Point::new(-1.0, -1.0, -1.0));
        assert_eq!(shape.center(), Point::origin());
    }

    #[test]
    fn test_autorotate_step_matches_individual_rotations() {
        let direction = Vector::new(0.1, 0.2, 0.3);
        let mut stepped = cube();
        AutoRotate::new(direction, Duration::from_millis(60)).step(&mut stepped);

        let mut manual = cube();
        Transform::rotate(&mut manual, 0.1, Axis::X);
        Transform::rotate(&mut manual, 0.2, Axis::Y);
        Transform::rotate(&mut manual, 0.3, Axis::Z);

        assert_eq!(stepped.vertices(), manual.vertices());
    }
}
