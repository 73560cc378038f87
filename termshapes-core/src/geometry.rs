/// Topology primitives: edges, faces and coordinate axes
use std::fmt;

use crate::vector::{Point, Vector};

/// An edge as a pair of indices into the shape's vertex list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// True when this edge joins `i` and `j` in either direction
    pub fn joins(&self, i: usize, j: usize) -> bool {
        (self.a == i && self.b == j) || (self.a == j && self.b == i)
    }
}

/// A planar polygon traced by an ordered loop of vertex indices
#[derive(Debug, Clone)]
pub struct Face {
    pub indices: Vec<usize>,
    pub normal: Vector,
}

impl Face {
    /// Build a face and derive its normal from the current vertex positions.
    ///
    /// The caller guarantees the loop has at least three in-range indices.
    pub fn new(indices: Vec<usize>, vertices: &[Point]) -> Self {
        let normal = Self::normal_of(&indices, vertices);
        Self { indices, normal }
    }

    /// Normal from the first three listed vertices: (v0 - v1) × (v0 - v2).
    ///
    /// Colinear leading vertices produce a zero normal, which makes every
    /// ray test against this face fail its plane intersection.
    pub fn calculate_normal(&self, vertices: &[Point]) -> Vector {
        Self::normal_of(&self.indices, vertices)
    }

    pub fn update_normal(&mut self, vertices: &[Point]) {
        self.normal = self.calculate_normal(vertices);
    }

    fn normal_of(indices: &[usize], vertices: &[Point]) -> Vector {
        let v0 = vertices[indices[0]];
        let v1 = vertices[indices[1]];
        let v2 = vertices[indices[2]];

        (v0 - v1).cross(&(v0 - v2))
    }

    /// Consecutive vertex pairs around the loop, closing back to the start
    pub fn boundary(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }

    /// Whether `edge` is one of this face's boundary edges
    pub fn has_edge(&self, edge: &Edge) -> bool {
        self.boundary().any(|(i, j)| edge.joins(i, j))
    }
}

/// Coordinate axis used by rotate and translate commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The ordered coordinate pair rotated about this axis.
    ///
    /// Rotating about x turns (y, z), about y turns (z, x), about z turns (x, y).
    pub fn rotation_plane(self) -> (usize, usize) {
        match self {
            Axis::X => (1, 2),
            Axis::Y => (2, 0),
            Axis::Z => (0, 1),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}
