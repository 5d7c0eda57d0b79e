//! Debug drawing of a grid and a search result.
//!
//! The host supplies a [`GizmoSink`]; [`draw_gizmos`] walks the grid and the
//! path read-only and tells the sink how each cell should look.

use crate::grid::{Cell, Grid};
use crate::pathfinding::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Walkable,
    Blocked,
    Path,
    Start,
    Goal,
}

impl CellStyle {
    pub fn symbol(self) -> char {
        match self {
            CellStyle::Walkable => '.',
            CellStyle::Blocked => '#',
            CellStyle::Path => '*',
            CellStyle::Start => 'S',
            CellStyle::Goal => 'G',
        }
    }
}

/// Receives one call per drawn cell. Later calls for the same cell draw on top.
pub trait GizmoSink {
    fn draw_cell(&mut self, cell: &Cell, style: CellStyle);
}

/// Draw every cell, then the path over it
pub fn draw_gizmos<S: GizmoSink + ?Sized>(grid: &Grid, path: Option<&Path>, sink: &mut S) {
    for cell in grid.cells() {
        let style = if cell.walkable {
            CellStyle::Walkable
        } else {
            CellStyle::Blocked
        };
        sink.draw_cell(cell, style);
    }

    let Some(path) = path else {
        return;
    };

    let last = path.len().saturating_sub(1);
    for (i, cell) in path.cells.iter().enumerate() {
        let style = if i == 0 {
            CellStyle::Start
        } else if i == last {
            CellStyle::Goal
        } else {
            CellStyle::Path
        };
        sink.draw_cell(cell, style);
    }
}

/// Text canvas, one line per grid row (y), one character per cell
pub struct AsciiCanvas {
    width: usize,
    symbols: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(grid: &Grid) -> Self {
        let width = grid.width() as usize;
        AsciiCanvas {
            width,
            symbols: vec![' '; width * grid.height() as usize],
        }
    }

    /// Render a grid and optional path in one go
    pub fn render(grid: &Grid, path: Option<&Path>) -> String {
        let mut canvas = AsciiCanvas::new(grid);
        draw_gizmos(grid, path, &mut canvas);
        canvas.to_string()
    }
}

impl GizmoSink for AsciiCanvas {
    fn draw_cell(&mut self, cell: &Cell, style: CellStyle) {
        let slot = cell.y as usize * self.width + cell.x as usize;
        if let Some(symbol) = self.symbols.get_mut(slot) {
            *symbol = style.symbol();
        }
    }
}

impl std::fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.symbols.chunks(self.width.max(1)) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
