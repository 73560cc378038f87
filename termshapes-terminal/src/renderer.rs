/// Draws a rendered frame to the terminal
use crossterm::{
    cursor::MoveTo,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use termshapes_core::{Frame, ScreenCell};

/// Colors for each frame layer. Behind glyphs are dimmed, front glyphs bold.
pub struct GlyphRenderer {
    pub front: Color,
    pub behind: Color,
    pub label: Color,
}

impl Default for GlyphRenderer {
    fn default() -> Self {
        Self {
            front: Color::White,
            behind: Color::DarkGrey,
            label: Color::Cyan,
        }
    }
}

impl GlyphRenderer {
    pub fn draw<W: Write>(&self, writer: &mut W, frame: &Frame) -> std::io::Result<()> {
        writer.queue(SetForegroundColor(self.behind))?;
        writer.queue(SetAttribute(Attribute::Dim))?;
        for &(cell, c) in &frame.behind {
            put(writer, cell, c)?;
        }
        writer.queue(SetAttribute(Attribute::Reset))?;

        writer.queue(SetForegroundColor(self.front))?;
        writer.queue(SetAttribute(Attribute::Bold))?;
        for &(cell, c) in &frame.front {
            put(writer, cell, c)?;
        }
        writer.queue(SetAttribute(Attribute::Reset))?;

        writer.queue(SetForegroundColor(self.label))?;
        for (cell, label) in &frame.labels {
            put(writer, *cell, label)?;
        }

        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn put<W: Write, T: std::fmt::Display>(writer: &mut W, cell: ScreenCell, text: T) -> std::io::Result<()> {
    // Frames only hold on-screen cells, which always fit in u16.
    let (Ok(x), Ok(y)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
        return Ok(());
    };
    writer.queue(MoveTo(x, y))?;
    writer.queue(Print(text))?;
    Ok(())
}
