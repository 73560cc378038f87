/// Per-frame merging of half-cell marks into front and behind layers
use std::collections::HashMap;

use crate::error::{FrameError, FrameResult};
use crate::projection::{Half, ScreenCell};

/// How much of a cell is marked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coverage {
    Upper,
    Lower,
    Full,
}

impl From<Half> for Coverage {
    fn from(half: Half) -> Self {
        match half {
            Half::Upper => Coverage::Upper,
            Half::Lower => Coverage::Lower,
        }
    }
}

impl Coverage {
    /// Whether marking `half` on top of this coverage changes nothing
    pub fn covers(self, half: Half) -> bool {
        self == Coverage::Full || self == Coverage::from(half)
    }
}

/// Outcome of adding a mark to a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Added,
    /// The opposite half was already marked; the cell is now full.
    Upgraded,
    /// The half was already marked; nothing changed.
    Redundant,
}

/// Cells marked in one layer, kept in first-insertion order
#[derive(Debug, Clone, Default)]
pub struct CellLayer {
    cells: Vec<(ScreenCell, Coverage)>,
    index: HashMap<ScreenCell, usize>,
}

impl CellLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.index.clear();
    }

    /// Make room for `capacity` distinct cells without reallocating
    pub fn try_reserve(&mut self, capacity: usize) -> FrameResult<()> {
        let additional = capacity.saturating_sub(self.cells.len());
        self.cells
            .try_reserve(additional)
            .and_then(|()| self.index.try_reserve(additional))
            .map_err(|_| FrameError::BufferReserve { samples: capacity })
    }

    pub fn get(&self, cell: ScreenCell) -> Option<Coverage> {
        self.index.get(&cell).map(|&i| self.cells[i].1)
    }

    /// Whether a mark at `cell`/`half` would be discarded
    pub fn is_redundant(&self, cell: ScreenCell, half: Half) -> bool {
        self.get(cell).is_some_and(|coverage| coverage.covers(half))
    }

    pub fn insert(&mut self, cell: ScreenCell, half: Half) -> Insertion {
        match self.index.get(&cell).copied() {
            None => {
                self.index.insert(cell, self.cells.len());
                self.cells.push((cell, half.into()));
                Insertion::Added
            }
            Some(i) => {
                let coverage = &mut self.cells[i].1;
                if coverage.covers(half) {
                    Insertion::Redundant
                } else {
                    *coverage = Coverage::Full;
                    Insertion::Upgraded
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScreenCell, Coverage)> + '_ {
        self.cells.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Which layer a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Front,
    Behind,
}

/// Front and behind layers for one frame. The layers are independent: a cell
/// may be marked in both.
#[derive(Debug, Clone, Default)]
pub struct CellDeduplicator {
    front: CellLayer,
    behind: CellLayer,
}

impl CellDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.front.clear();
        self.behind.clear();
    }

    pub fn try_reserve(&mut self, capacity: usize) -> FrameResult<()> {
        self.front.try_reserve(capacity)?;
        self.behind.try_reserve(capacity)
    }

    /// True when the mark would be discarded by every layer the sample could
    /// land in, so it needs no occlusion test at all. Pass `draws_behind =
    /// false` when hidden samples are dropped instead of drawn.
    pub fn is_redundant(&self, cell: ScreenCell, half: Half, draws_behind: bool) -> bool {
        self.front.is_redundant(cell, half) && (!draws_behind || self.behind.is_redundant(cell, half))
    }

    pub fn insert(&mut self, layer: Layer, cell: ScreenCell, half: Half) -> Insertion {
        match layer {
            Layer::Front => self.front.insert(cell, half),
            Layer::Behind => self.behind.insert(cell, half),
        }
    }

    pub fn front(&self) -> &CellLayer {
        &self.front
    }

    pub fn behind(&self) -> &CellLayer {
        &self.behind
    }
}
