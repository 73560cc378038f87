/// Error types for loading shapes and producing frames
use std::path::PathBuf;
use thiserror::Error;

/// Section of a shape description being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The `num_vertices,num_edges[,num_faces]` header line.
    Header,
    /// Vertex coordinate lines.
    Vertices,
    /// Edge index-pair lines.
    Edges,
    /// Face index-loop lines.
    Faces,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::Vertices => "vertices",
            Section::Edges => "edges",
            Section::Faces => "faces",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while building a shape.
///
/// A failed load never touches a shape that is already in memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The description file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A line did not have the expected shape.
    #[error("Malformed {section} line {line}: {text:?}")]
    Malformed {
        /// Section being read.
        section: Section,
        /// 1-based line number in the description.
        line: usize,
        /// Offending line content.
        text: String,
    },

    /// The description ended before all declared items were read.
    #[error("Expected {expected} {section}, found {found}")]
    ShortRead {
        /// Section being read.
        section: Section,
        /// Count declared by the header.
        expected: usize,
        /// Count actually present.
        found: usize,
    },

    /// A declared count is above the configured limit.
    #[error("Number of {section} ({count}) exceeds maximum {max}")]
    TooMany {
        /// Section whose count is too large.
        section: Section,
        /// Declared count.
        count: usize,
        /// Configured limit.
        max: usize,
    },

    /// An edge refers to a vertex that does not exist.
    #[error("Edge {edge} index {index} out of bounds for {num_vertices} vertices")]
    EdgeIndexOutOfRange {
        /// Position of the edge in the edge list.
        edge: usize,
        /// Offending vertex index.
        index: usize,
        /// Number of vertices in the shape.
        num_vertices: usize,
    },

    /// An edge joins a vertex to itself.
    #[error("Edge {edge} joins vertex {index} to itself")]
    DegenerateEdge {
        /// Position of the edge in the edge list.
        edge: usize,
        /// Repeated vertex index.
        index: usize,
    },

    /// A face refers to a vertex that does not exist.
    #[error("Face {face} index {index} out of bounds for {num_vertices} vertices")]
    FaceIndexOutOfRange {
        /// Position of the face in the face list.
        face: usize,
        /// Offending vertex index.
        index: usize,
        /// Number of vertices in the shape.
        num_vertices: usize,
    },

    /// A face lists fewer than three vertices.
    #[error("Face {face} has {len} vertices, at least 3 required")]
    FaceTooSmall {
        /// Position of the face in the face list.
        face: usize,
        /// Number of vertices listed.
        len: usize,
    },

    /// Storage for the shape could not be reserved.
    #[error("Could not allocate storage for {count} {section}")]
    Allocation {
        /// Section being allocated.
        section: Section,
        /// Requested element count.
        count: usize,
    },
}

/// Errors raised while producing a frame.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Sample buffers could not be resized for a new edge density.
    #[error("Could not reserve sample buffers for {samples} samples")]
    BufferReserve {
        /// Requested number of samples.
        samples: usize,
    },
}

/// Fatal errors surfaced to the driving loop.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Rebuilding the shape from its source failed.
    #[error("Shape reset failed: {0}")]
    Reset(#[from] LoadError),

    /// A frame still failed after the shape was reset.
    #[error("Frame failed after reset: {0}")]
    Frame(#[from] FrameError),

    /// A frame could not be produced and the shape could not be reset.
    #[error("Frame failed ({frame}) and shape reset failed ({reset})")]
    Unrecoverable {
        /// The frame error that triggered the reset.
        frame: FrameError,
        /// The reset failure.
        reset: LoadError,
    },
}

/// Result type for shape loading.
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Result type for frame production.
pub type FrameResult<T> = std::result::Result<T, FrameError>;

/// Result type for session commands.
pub type SessionResult<T> = std::result::Result<T, SessionError>;
