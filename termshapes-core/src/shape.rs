/// The shape model: a vertex arena with index-based edges and faces
use std::path::{Path, PathBuf};

use tracing::info;

use crate::description::{parse_description, ShapeDescription};
use crate::error::{LoadError, LoadResult, Section};
use crate::geometry::{Edge, Face};
use crate::params::RenderParams;
use crate::vector::Point;

/// Where a shape was built from, so it can be rebuilt identically
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeSource {
    /// The built-in cube.
    DefaultCube,
    /// A description file on disk, re-read on every rebuild.
    File(PathBuf),
    /// A description held in memory.
    Description(ShapeDescription),
}

/// A solid (or wireframe) described by vertices, edges and faces.
///
/// Edge and face indices always refer to existing vertices. Topology is fixed
/// after construction; only vertex positions and the center move.
#[derive(Debug, Clone)]
pub struct Shape {
    pub(crate) vertices: Vec<Point>,
    edges: Vec<Edge>,
    pub(crate) faces: Vec<Face>,
    pub(crate) center: Point,
    center_of_projection: Point,
    edge_density: usize,
    source: ShapeSource,
}

impl Shape {
    /// Validate a description and publish it as a shape.
    ///
    /// Nothing is returned unless every index checks out, so a failure
    /// leaves no partially built shape behind.
    pub fn from_description(
        desc: &ShapeDescription,
        params: &RenderParams,
        source: ShapeSource,
    ) -> LoadResult<Self> {
        let num_vertices = desc.vertices.len();
        let limits = [
            (Section::Vertices, num_vertices, params.max_vertices),
            (Section::Edges, desc.edges.len(), params.max_edges),
            (Section::Faces, desc.faces.len(), params.max_faces),
        ];
        for (section, count, max) in limits {
            if count > max {
                return Err(LoadError::TooMany { section, count, max });
            }
        }

        let mut edges = Vec::new();
        edges
            .try_reserve_exact(desc.edges.len())
            .map_err(|_| LoadError::Allocation {
                section: Section::Edges,
                count: desc.edges.len(),
            })?;
        for (i, &(a, b)) in desc.edges.iter().enumerate() {
            for index in [a, b] {
                if index >= num_vertices {
                    return Err(LoadError::EdgeIndexOutOfRange {
                        edge: i,
                        index,
                        num_vertices,
                    });
                }
            }
            if a == b {
                return Err(LoadError::DegenerateEdge { edge: i, index: a });
            }
            edges.push(Edge::new(a, b));
        }

        let mut faces = Vec::new();
        faces
            .try_reserve_exact(desc.faces.len())
            .map_err(|_| LoadError::Allocation {
                section: Section::Faces,
                count: desc.faces.len(),
            })?;
        for (i, indices) in desc.faces.iter().enumerate() {
            if indices.len() < 3 {
                return Err(LoadError::FaceTooSmall {
                    face: i,
                    len: indices.len(),
                });
            }
            if let Some(&index) = indices.iter().find(|&&index| index >= num_vertices) {
                return Err(LoadError::FaceIndexOutOfRange {
                    face: i,
                    index,
                    num_vertices,
                });
            }
            faces.push(Face::new(indices.clone(), &desc.vertices));
        }

        Ok(Self {
            vertices: desc.vertices.clone(),
            edges,
            faces,
            center: Point::origin(),
            center_of_projection: params.center_of_projection,
            edge_density: params.edge_density,
            source,
        })
    }

    /// Parse and validate a description held in memory
    pub fn parse(text: &str, params: &RenderParams) -> LoadResult<Self> {
        let desc = parse_description(text, limits(params))?;
        Self::from_description(&desc, params, ShapeSource::Description(desc.clone()))
    }

    /// Load a description file
    pub fn load(path: impl AsRef<Path>, params: &RenderParams) -> LoadResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let desc = parse_description(&text, limits(params))?;
        let shape = Self::from_description(&desc, params, ShapeSource::File(path.to_path_buf()))?;

        info!(
            path = %path.display(),
            vertices = shape.vertices.len(),
            edges = shape.edges.len(),
            faces = shape.faces.len(),
            "loaded shape"
        );
        Ok(shape)
    }

    /// The default solid: a cube of half-width 1 centered at the origin
    pub fn cube(params: &RenderParams) -> Self {
        let desc = cube_description();
        // The built-in description is known to be valid.
        match Self::from_description(&desc, params, ShapeSource::DefaultCube) {
            Ok(shape) => shape,
            Err(e) => unreachable!("built-in cube failed validation: {e}"),
        }
    }

    /// Build a fresh copy of this shape from its original source.
    ///
    /// `self` is untouched; the caller swaps the result in only on success.
    pub fn rebuild(&self, params: &RenderParams) -> LoadResult<Self> {
        match &self.source {
            ShapeSource::DefaultCube => Ok(Self::cube(params)),
            ShapeSource::File(path) => Self::load(path, params),
            ShapeSource::Description(desc) => {
                Self::from_description(desc, params, self.source.clone())
            }
        }
    }

    /// Current geometry in description form
    pub fn to_description(&self) -> ShapeDescription {
        ShapeDescription {
            vertices: self.vertices.clone(),
            edges: self.edges.iter().map(|e| (e.a, e.b)).collect(),
            faces: self.faces.iter().map(|f| f.indices.clone()).collect(),
        }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn center_of_projection(&self) -> Point {
        self.center_of_projection
    }

    pub fn edge_density(&self) -> usize {
        self.edge_density
    }

    pub fn set_edge_density(&mut self, edge_density: usize) {
        self.edge_density = edge_density;
    }

    pub fn source(&self) -> &ShapeSource {
        &self.source
    }

    /// Endpoint positions of an edge
    pub fn edge_points(&self, edge: &Edge) -> (Point, Point) {
        (self.vertices[edge.a], self.vertices[edge.b])
    }

    /// Recompute every face normal from the current vertex positions
    pub(crate) fn update_normals(&mut self) {
        let vertices = &self.vertices;
        for face in &mut self.faces {
            face.update_normal(vertices);
        }
    }
}

fn limits(params: &RenderParams) -> (usize, usize, usize) {
    (params.max_vertices, params.max_edges, params.max_faces)
}

fn cube_description() -> ShapeDescription {
    ShapeDescription {
        vertices: vec![
            Point::new(1.0, 1.0, 1.0),
            Point::new(-1.0, 1.0, 1.0),
            Point::new(1.0, -1.0, 1.0),
            Point::new(-1.0, -1.0, 1.0),
            Point::new(1.0, 1.0, -1.0),
            Point::new(-1.0, 1.0, -1.0),
            Point::new(1.0, -1.0, -1.0),
            Point::new(-1.0, -1.0, -1.0),
        ],
        edges: vec![
            (0, 1),
            (0, 2),
            (0, 4),
            (1, 3),
            (1, 5),
            (2, 3),
            (2, 6),
            (3, 7),
            (4, 5),
            (4, 6),
            (5, 7),
            (6, 7),
        ],
        faces: vec![
            vec![0, 1, 3, 2],
            vec![4, 6, 7, 5],
            vec![0, 4, 5, 1],
            vec![2, 3, 7, 6],
            vec![0, 2, 6, 4],
            vec![1, 5, 7, 3],
        ],
    }
}
