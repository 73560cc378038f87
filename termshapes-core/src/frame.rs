/// Per-frame pipeline: sample edges, classify, project and deduplicate
use tracing::debug;

use crate::classify::{classify_edge, EdgeOcclusion};
use crate::dedup::{CellDeduplicator, CellLayer, Layer};
use crate::error::{FrameError, FrameResult};
use crate::glyph::GlyphSet;
use crate::occlusion::OcclusionMode;
use crate::projection::{ScreenCell, Viewport};
use crate::shape::Shape;
use crate::vector::{lerp, Point};

/// What to draw and how
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub mode: OcclusionMode,
    pub print_edges: bool,
    pub print_vertices: bool,
    pub glyphs: GlyphSet,
}

impl RenderOptions {
    /// Defaults for a freshly built shape: edges on, vertex labels only
    /// when there are no edges to draw.
    pub fn for_shape(shape: &Shape) -> Self {
        Self {
            mode: OcclusionMode::None,
            print_edges: true,
            print_vertices: shape.edges().is_empty(),
            glyphs: GlyphSet::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub samples: usize,
    pub occlusion_tests: usize,
    pub uniform_edges: usize,
}

/// One rendered frame, ready for a drawing backend.
///
/// `behind` is drawn first (dimmed), then `front`, then `labels`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub front: Vec<(ScreenCell, char)>,
    pub behind: Vec<(ScreenCell, char)>,
    pub labels: Vec<(ScreenCell, String)>,
    pub stats: FrameStats,
}

/// Evenly spaced samples from `a` to `b`: `density + 1` points including
/// both endpoints, or just `a` when `density` is zero.
pub fn edge_samples(a: Point, b: Point, density: usize) -> impl Iterator<Item = Point> {
    (0..=density).map(move |k| {
        if density == 0 {
            a
        } else {
            lerp(&a, &b, k as f64 / density as f64)
        }
    })
}

/// Reusable buffers for producing frames
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    viewport: Viewport,
    samples: Vec<Point>,
    cells: CellDeduplicator,
    /// Edge density and edge count the buffers were sized for.
    prepared: Option<(usize, usize)>,
}

impl FrameRenderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            samples: Vec::new(),
            cells: CellDeduplicator::new(),
            prepared: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.prepared = None;
        }
    }

    /// Resize the sample buffers if the shape's edge density or edge count
    /// changed since the last frame.
    pub fn prepare(&mut self, shape: &Shape) -> FrameResult<()> {
        let density = shape.edge_density();
        let num_edges = shape.edges().len();
        if self.prepared == Some((density, num_edges)) {
            return Ok(());
        }
        self.prepared = None;

        let per_edge = density
            .checked_add(1)
            .ok_or(FrameError::BufferReserve { samples: usize::MAX })?;
        let total = num_edges
            .checked_add(1)
            .and_then(|n| n.checked_mul(per_edge))
            .ok_or(FrameError::BufferReserve { samples: usize::MAX })?;
        let screen = usize::from(self.viewport.width) * usize::from(self.viewport.height);

        self.samples = Vec::new();
        self.samples
            .try_reserve_exact(per_edge)
            .map_err(|_| FrameError::BufferReserve { samples: per_edge })?;
        self.cells = CellDeduplicator::new();
        self.cells.try_reserve(total.min(screen))?;

        debug!(density, num_edges, per_edge, "resized sample buffers");
        self.prepared = Some((density, num_edges));
        Ok(())
    }

    pub fn render(&mut self, shape: &Shape, options: &RenderOptions) -> FrameResult<Frame> {
        self.prepare(shape)?;
        self.cells.clear();

        let mut stats = FrameStats::default();
        if options.print_edges {
            self.render_edges(shape, options.mode, &mut stats);
        }

        let labels = if options.print_vertices {
            self.vertex_labels(shape, options.mode)
        } else {
            Vec::new()
        };

        let frame = Frame {
            front: glyph_cells(self.cells.front(), &options.glyphs),
            behind: glyph_cells(self.cells.behind(), &options.glyphs),
            labels,
            stats,
        };

        debug!(
            mode = %options.mode,
            samples = stats.samples,
            occlusion_tests = stats.occlusion_tests,
            uniform_edges = stats.uniform_edges,
            front = frame.front.len(),
            behind = frame.behind.len(),
            "rendered frame"
        );
        Ok(frame)
    }

    fn render_edges(&mut self, shape: &Shape, mode: OcclusionMode, stats: &mut FrameStats) {
        let density = shape.edge_density();

        // Last edge first, so earlier edges claim shared cells later.
        for edge in shape.edges().iter().rev() {
            let state = classify_edge(shape, mode, edge);
            if state != EdgeOcclusion::Mixed {
                stats.uniform_edges += 1;
            }

            let (a, b) = shape.edge_points(edge);
            self.samples.clear();
            self.samples.extend(edge_samples(a, b, density));

            for sample in &self.samples {
                stats.samples += 1;

                let Some(projected) = self.viewport.project_visible(sample) else {
                    continue;
                };
                if self.cells.is_redundant(projected.cell, projected.half, mode.draws_hidden()) {
                    continue;
                }

                let hidden = match state.uniform_hidden() {
                    Some(hidden) => hidden,
                    None => {
                        stats.occlusion_tests += 1;
                        mode.is_hidden(shape, sample, Some(edge))
                    }
                };

                if hidden && !mode.draws_hidden() {
                    continue;
                }

                let layer = if hidden { Layer::Behind } else { Layer::Front };
                self.cells.insert(layer, projected.cell, projected.half);
            }
        }
    }

    /// Index labels for each vertex, highest index first so lower indices are
    /// drawn on top where they overlap.
    fn vertex_labels(&self, shape: &Shape, mode: OcclusionMode) -> Vec<(ScreenCell, String)> {
        shape
            .vertices()
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, v)| mode == OcclusionMode::None || !mode.is_hidden(shape, v, None))
            .filter_map(|(i, v)| {
                self.viewport
                    .project_visible(v)
                    .map(|projected| (projected.cell, i.to_string()))
            })
            .collect()
    }
}

fn glyph_cells(layer: &CellLayer, glyphs: &GlyphSet) -> Vec<(ScreenCell, char)> {
    layer
        .iter()
        .map(|(cell, coverage)| (cell, glyphs.glyph(coverage)))
        .collect()
}
