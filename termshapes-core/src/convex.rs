/// Ray-cast occlusion for convex polyhedra
///
/// A point is hidden when the segment from it to the center of projection
/// passes through a face of the shape in front of it. Each face is tested by
/// intersecting the segment with the face's plane and then running a crossing
/// count point-in-polygon test on the intersection.
use crate::geometry::{Edge, Face};
use crate::occlusion::Occluder;
use crate::shape::Shape;
use crate::vector::{lerp, on_segment, orientation, Orientation, Point, Vector};

/// Distance, in plane coordinates, of the auxiliary point used by the
/// point-in-polygon crossing count.
pub const FAR_DISTANCE: f64 = 10000.0;

/// Segment parameters within this distance of either end are not treated as
/// hits. This keeps a point from being hidden by the planes it lies on.
pub const SEGMENT_EPSILON: f64 = 1e-9;

/// Plane `normal · X = d` through a face
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub normal: Vector,
    pub d: f64,
}

impl Plane {
    /// Plane through the face's first vertex with the face's current normal
    pub fn of_face(face: &Face, vertices: &[Point]) -> Self {
        let normal = face.normal;
        let d = normal.dot(&vertices[face.indices[0]].coords);
        Self { normal, d }
    }

    /// Parameter `t` where `from + t (to - from)` meets the plane.
    ///
    /// `None` when the line is parallel to the plane or the plane is
    /// degenerate (zero normal).
    pub fn line_parameter(&self, from: &Point, to: &Point) -> Option<f64> {
        let denom = self.normal.dot(&(to - from));
        if denom == 0.0 {
            return None;
        }
        let t = (self.d - self.normal.dot(&from.coords)) / denom;
        t.is_finite().then_some(t)
    }

    /// A point on the plane far off to one side.
    ///
    /// Two coordinates are fixed at (`FAR_DISTANCE`, 0) and the plane equation
    /// is solved for the coordinate with the largest normal component. For
    /// planes not parallel to z that component is usually z, giving
    /// (10000, 0, z).
    pub fn far_point(&self) -> Point {
        let n = self.normal;
        let solve = if n.z.abs() >= n.x.abs() && n.z.abs() >= n.y.abs() {
            2
        } else if n.x.abs() >= n.y.abs() {
            0
        } else {
            1
        };
        let fixed = (solve + 1) % 3;
        let zeroed = (solve + 2) % 3;

        let mut far = Point::origin();
        far[fixed] = FAR_DISTANCE;
        far[zeroed] = 0.0;
        far[solve] = (self.d - n[fixed] * FAR_DISTANCE) / n[solve];
        far
    }
}

/// Whether segment `f0 f1` crosses segment `p q`, all four points coplanar
/// with the plane whose normal is `normal`.
fn segments_cross(f0: &Point, f1: &Point, p: &Point, q: &Point, normal: &Vector) -> bool {
    let o0 = orientation(f0, f1, p, normal);
    let o1 = orientation(f0, f1, q, normal);
    let o2 = orientation(p, q, f0, normal);
    let o3 = orientation(p, q, f1, normal);

    if o0 != o1 && o2 != o3 {
        return true;
    }

    (o0 == Orientation::Colinear && on_segment(f0, f1, p))
        || (o1 == Orientation::Colinear && on_segment(f0, f1, q))
        || (o2 == Orientation::Colinear && on_segment(p, q, f0))
        || (o3 == Orientation::Colinear && on_segment(p, q, f1))
}

/// Crossing-count containment test of `point` within a face.
///
/// `point` must lie on the face's plane. A point on the boundary counts as
/// inside.
pub fn point_in_face(vertices: &[Point], face: &Face, point: &Point, plane: &Plane) -> bool {
    let far = plane.far_point();
    let mut crossings = 0usize;

    for (i, j) in face.boundary() {
        let f0 = &vertices[i];
        let f1 = &vertices[j];

        if !segments_cross(f0, f1, point, &far, &plane.normal) {
            continue;
        }

        if orientation(f0, point, f1, &plane.normal) == Orientation::Colinear {
            return on_segment(f0, f1, point);
        }

        crossings += 1;
    }

    crossings % 2 == 1
}

/// Where the segment from `point` to the center of projection passes
/// through `face`, if it does.
pub fn face_intersection(shape: &Shape, face: &Face, point: &Point) -> Option<Point> {
    let vertices = shape.vertices();
    let cop = shape.center_of_projection();
    let plane = Plane::of_face(face, vertices);

    let t = plane.line_parameter(point, &cop)?;
    if t <= SEGMENT_EPSILON || t >= 1.0 - SEGMENT_EPSILON {
        return None;
    }

    let inter = lerp(point, &cop, t);
    point_in_face(vertices, face, &inter, &plane).then_some(inter)
}

/// Face ray-casting strategy. Exact only for convex shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvexOcclusion;

impl Occluder for ConvexOcclusion {
    fn is_hidden(&self, shape: &Shape, point: &Point, origin: Option<&Edge>) -> bool {
        shape
            .faces()
            .iter()
            .filter(|face| origin.map_or(true, |edge| !face.has_edge(edge)))
            .filter_map(|face| face_intersection(shape, face, point))
            .any(|inter| point.z < inter.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Axis;
    use crate::params::RenderParams;
    use crate::transform::Transform;

    fn cube() -> Shape {
        Shape::cube(&RenderParams::default())
    }

    fn square() -> (Vec<Point>, Face) {
        let vertices = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(2.0, 2.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        ];
        let face = Face::new(vec![0, 1, 2, 3], &vertices);
        (vertices, face)
    }

    #[test]
    fn test_far_point_lies_on_plane() {
        let plane = Plane {
            normal: Vector::new(1.0, 2.0, 4.0),
            d: 3.0,
        };
        let far = plane.far_point();
        assert_eq!(far.x, FAR_DISTANCE);
        assert_eq!(far.y, 0.0);
        assert!((plane.normal.dot(&far.coords) - plane.d).abs() < 1e-6);
    }

    #[test]
    fn test_far_point_for_vertical_plane() {
        let plane = Plane {
            normal: Vector::new(1.0, 0.0, 0.0),
            d: 1.0,
        };
        let far = plane.far_point();
        assert!(far.coords.iter().all(|c| c.is_finite()));
        assert_eq!(far.x, 1.0);
    }

    #[test]
    fn test_parallel_line_has_no_parameter() {
        let plane = Plane {
            normal: Vector::z(),
            d: 1.0,
        };
        let from = Point::new(0.0, 0.0, 0.0);
        let to = Point::new(5.0, 5.0, 0.0);
        assert_eq!(plane.line_parameter(&from, &to), None);
    }

    #[test]
    fn test_point_in_face() {
        let (vertices, face) = square();
        let plane = Plane::of_face(&face, &vertices);

        assert!(point_in_face(&vertices, &face, &Point::new(1.0, 1.0, 0.0), &plane));
        assert!(point_in_face(&vertices, &face, &Point::new(0.1, 1.9, 0.0), &plane));
        assert!(!point_in_face(&vertices, &face, &Point::new(3.0, 1.0, 0.0), &plane));
        assert!(!point_in_face(&vertices, &face, &Point::new(-1.0, 1.0, 0.0), &plane));
        assert!(!point_in_face(&vertices, &face, &Point::new(1.0, 2.5, 0.0), &plane));
    }

    #[test]
    fn test_point_on_boundary_is_inside() {
        let (vertices, face) = square();
        let plane = Plane::of_face(&face, &vertices);
        assert!(point_in_face(&vertices, &face, &Point::new(0.0, 1.0, 0.0), &plane));
    }

    #[test]
    fn test_cube_vertices() {
        let shape = cube();
        for v in shape.vertices() {
            let hidden = ConvexOcclusion.is_hidden(&shape, v, None);
            assert_eq!(hidden, v.z < 0.0, "vertex {v:?}");
        }
    }

    #[test]
    fn test_front_edge_samples_visible() {
        let shape = cube();
        // Edge 0-1 runs along the top of the front face.
        let edge = shape.edges()[0];
        let (a, b) = shape.edge_points(&edge);
        for k in 0..=10 {
            let p = lerp(&a, &b, k as f64 / 10.0);
            assert!(!ConvexOcclusion.is_hidden(&shape, &p, Some(&edge)));
        }
    }

    #[test]
    fn test_back_edge_samples_hidden() {
        let shape = cube();
        // Edge 11 is 6-7 on the back face.
        let edge = shape.edges()[11];
        let (a, b) = shape.edge_points(&edge);
        for k in 1..10 {
            let p = lerp(&a, &b, k as f64 / 10.0);
            assert!(ConvexOcclusion.is_hidden(&shape, &p, Some(&edge)));
        }
    }

    #[test]
    fn test_rotated_cube_front_vertex_visible() {
        let mut shape = cube();
        Transform::rotate(&mut shape, 0.4, Axis::Y);
        Transform::rotate(&mut shape, 0.3, Axis::X);
        let nearest = shape
            .vertices()
            .iter()
            .copied()
            .fold(Point::new(0.0, 0.0, f64::MIN), |best, v| if v.z > best.z { v } else { best });
        let farthest = shape
            .vertices()
            .iter()
            .copied()
            .fold(Point::new(0.0, 0.0, f64::MAX), |best, v| if v.z < best.z { v } else { best });

        assert!(!ConvexOcclusion.is_hidden(&shape, &nearest, None));
        assert!(ConvexOcclusion.is_hidden(&shape, &farthest, None));
    }

    #[test]
    fn test_shape_without_faces_hides_nothing() {
        let shape = Shape::parse("2,1\n0,0,-5\n0,0,5\n0,1\n", &RenderParams::default()).unwrap();
        assert!(!ConvexOcclusion.is_hidden(&shape, &Point::new(0.0, 0.0, -5.0), None));
    }
}
