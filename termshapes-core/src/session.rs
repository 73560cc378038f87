/// Command surface for a driving loop: owns the shape, the render options
/// and the frame buffers
use tracing::{info, warn};

use crate::error::{LoadResult, SessionError, SessionResult};
use crate::frame::{Frame, FrameRenderer, RenderOptions};
use crate::geometry::Axis;
use crate::params::{RenderParams, StepSizes};
use crate::projection::Viewport;
use crate::shape::Shape;
use crate::transform::{AutoRotate, Transform};

/// A single user or timer action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Rotate { angle: f64, axis: Axis },
    Scale(f64),
    Translate { distance: f64, axis: Axis },
    CycleOcclusion,
    TogglePrintVertices,
    TogglePrintEdges,
    IncreaseDensity,
    /// Stops at zero.
    DecreaseDensity,
    /// Rebuild the shape from its source and restore the initial options.
    Reset,
    /// Start (`Some`) or stop (`None`) the autorotate timer.
    AutoRotate(Option<AutoRotate>),
    /// Stop autorotation if running, otherwise start it with the default step.
    ToggleAutoRotate,
}

pub struct Session {
    shape: Shape,
    params: RenderParams,
    steps: StepSizes,
    options: RenderOptions,
    initial_options: RenderOptions,
    renderer: FrameRenderer,
    autorotate: Option<AutoRotate>,
}

impl Session {
    pub fn new(shape: Shape, params: RenderParams, steps: StepSizes, width: u16, height: u16) -> Self {
        let options = RenderOptions::for_shape(&shape);
        let renderer = FrameRenderer::new(Viewport::new(width, height, params.scale));
        Self {
            shape,
            params,
            steps,
            options,
            initial_options: options,
            renderer,
            autorotate: None,
        }
    }

    /// Replace the options; a reset returns to these.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self.initial_options = options;
        self
    }

    pub fn apply(&mut self, command: Command) -> SessionResult<()> {
        match command {
            Command::Rotate { angle, axis } => Transform::rotate(&mut self.shape, angle, axis),
            Command::Scale(factor) => Transform::scale(&mut self.shape, factor),
            Command::Translate { distance, axis } => {
                Transform::translate(&mut self.shape, distance, axis)
            }
            Command::CycleOcclusion => {
                self.options.mode = self.options.mode.next();
                info!(mode = %self.options.mode, "occlusion mode changed");
            }
            Command::TogglePrintVertices => {
                self.options.print_vertices = !self.options.print_vertices;
            }
            Command::TogglePrintEdges => self.options.print_edges = !self.options.print_edges,
            Command::IncreaseDensity => {
                let density = self.shape.edge_density().saturating_add(1);
                self.shape.set_edge_density(density);
            }
            Command::DecreaseDensity => {
                let density = self.shape.edge_density().saturating_sub(1);
                self.shape.set_edge_density(density);
            }
            Command::Reset => self.reset()?,
            Command::AutoRotate(autorotate) => self.autorotate = autorotate,
            Command::ToggleAutoRotate => {
                self.autorotate = match self.autorotate {
                    Some(_) => None,
                    None => Some(AutoRotate::new(
                        self.steps.autorotate_direction,
                        self.steps.autorotate_interval,
                    )),
                };
            }
        }
        Ok(())
    }

    /// Advance the autorotate timer by one tick. Returns whether the shape
    /// moved.
    pub fn tick(&mut self) -> bool {
        match self.autorotate {
            Some(autorotate) => {
                autorotate.step(&mut self.shape);
                true
            }
            None => false,
        }
    }

    /// Rebuild the shape from its source and restore the initial options.
    ///
    /// On failure the current shape is kept.
    pub fn reset(&mut self) -> SessionResult<()> {
        self.rebuild()?;
        Ok(())
    }

    fn rebuild(&mut self) -> LoadResult<()> {
        self.shape = self.shape.rebuild(&self.params)?;
        self.options = self.initial_options;
        self.autorotate = None;
        info!(mode = %self.options.mode, "shape reset");
        Ok(())
    }

    /// Render the current state.
    ///
    /// If the frame buffers cannot be sized, the shape is reset and the frame
    /// retried once. A failed reset is fatal.
    pub fn frame(&mut self) -> SessionResult<Frame> {
        match self.renderer.render(&self.shape, &self.options) {
            Ok(frame) => Ok(frame),
            Err(frame) => {
                warn!(error = %frame, "frame failed, resetting shape");
                self.rebuild()
                    .map_err(|reset| SessionError::Unrecoverable { frame, reset })?;
                Ok(self.renderer.render(&self.shape, &self.options)?)
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.renderer
            .set_viewport(Viewport::new(width, height, self.params.scale));
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn steps(&self) -> &StepSizes {
        &self.steps
    }

    pub fn viewport(&self) -> Viewport {
        self.renderer.viewport()
    }

    pub fn autorotate(&self) -> Option<&AutoRotate> {
        self.autorotate.as_ref()
    }
}
