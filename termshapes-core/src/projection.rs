/// Projection of 3D points onto a character grid with half-cell rows
use crate::vector::Point;

/// Vertical half of a character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Half {
    Upper,
    Lower,
}

/// A character cell; `y` grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenCell {
    pub x: i32,
    pub y: i32,
}

impl ScreenCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A projected sample: its cell and which half of the cell it falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projected {
    pub cell: ScreenCell,
    pub half: Half,
}

/// Terminal-sized viewport.
///
/// Orthographic along z: a point's depth does not affect where it lands.
/// Terminal cells are roughly twice as tall as they are wide, so vertical
/// distances are halved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub scale: f64,
}

impl Viewport {
    pub fn new(width: u16, height: u16, scale: f64) -> Self {
        Self { width, height, scale }
    }

    /// Continuous screen coordinates before snapping to a cell
    pub fn screen_coords(&self, point: &Point) -> (f64, f64) {
        let w = f64::from(self.width);
        let h = f64::from(self.height);

        let x = point.x * self.scale * h + 0.5 * w;
        let y = -point.y * self.scale * 0.5 * h + 0.5 * h;
        (x, y)
    }

    /// Snap a point to its cell.
    ///
    /// The cell is the floor of each coordinate; a vertical remainder below
    /// one half selects the upper half of the cell.
    pub fn project(&self, point: &Point) -> Projected {
        let (x, y) = self.screen_coords(point);
        let row = y.floor();
        let half = if y - row < 0.5 { Half::Upper } else { Half::Lower };

        Projected {
            cell: ScreenCell::new(x.floor() as i32, row as i32),
            half,
        }
    }

    pub fn contains(&self, cell: ScreenCell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < i32::from(self.width) && cell.y < i32::from(self.height)
    }

    /// Project and discard points that land off screen
    pub fn project_visible(&self, point: &Point) -> Option<Projected> {
        let projected = self.project(point);
        self.contains(projected.cell).then_some(projected)
    }
}
