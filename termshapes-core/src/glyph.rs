/// Characters used to draw half-cell coverage
use std::str::FromStr;

use crate::dedup::Coverage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSet {
    pub upper: char,
    pub lower: char,
    pub full: char,
}

impl GlyphSet {
    /// Plain ASCII, readable in any terminal font
    pub const ASCII: GlyphSet = GlyphSet {
        upper: '\'',
        lower: '.',
        full: ':',
    };

    /// Unicode half blocks
    pub const BLOCKS: GlyphSet = GlyphSet {
        upper: '▀',
        lower: '▄',
        full: '█',
    };

    pub fn glyph(&self, coverage: Coverage) -> char {
        match coverage {
            Coverage::Upper => self.upper,
            Coverage::Lower => self.lower,
            Coverage::Full => self.full,
        }
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::ASCII
    }
}

impl FromStr for GlyphSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Self::ASCII),
            "blocks" => Ok(Self::BLOCKS),
            _ => Err(format!("unknown glyph set: {s} (expected ascii or blocks)")),
        }
    }
}
