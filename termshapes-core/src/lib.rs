/// termshapes core library - shape geometry, occlusion and text-grid projection
///
/// This library holds everything between a shape description and the glyphs
/// a terminal draws: the vertex/edge/face model, rigid transforms, occlusion
/// tests, half-cell projection and per-frame cell deduplication.

pub mod classify;
pub mod convex;
pub mod dedup;
pub mod description;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod glyph;
pub mod occlusion;
pub mod params;
pub mod projection;
pub mod session;
pub mod shape;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use classify::{classify_edge, EdgeOcclusion};
pub use convex::ConvexOcclusion;
pub use dedup::{CellDeduplicator, Coverage, Layer};
pub use description::ShapeDescription;
pub use error::{FrameError, LoadError, SessionError};
pub use frame::{Frame, FrameRenderer, RenderOptions};
pub use geometry::{Axis, Edge, Face};
pub use glyph::GlyphSet;
pub use occlusion::{ApproximateOcclusion, NoOcclusion, OcclusionMode, Occluder};
pub use params::{RenderParams, StepSizes};
pub use projection::{Half, ScreenCell, Viewport};
pub use session::{Command, Session};
pub use shape::{Shape, ShapeSource};
pub use transform::{AutoRotate, Transform};
pub use vector::{Point, Vector};
