use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Integer grid coordinates of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub fn new(x: i32, y: i32) -> Self {
        CellCoord { x, y }
    }
}

/// A point in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub fn new(x: f32, y: f32) -> Self {
        WorldPoint { x, y }
    }
}

/// Width and height of one cell in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub x: f32,
    pub y: f32,
}

impl CellSize {
    pub fn new(x: f32, y: f32) -> Self {
        CellSize { x, y }
    }

    fn validate(&self) -> Result<()> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(self.x) && valid(self.y) {
            Ok(())
        } else {
            Err(Error::InvalidMap(format!(
                "cell size must be positive and finite, got ({}, {})",
                self.x, self.y
            )))
        }
    }
}

impl Default for CellSize {
    fn default() -> Self {
        CellSize { x: 1.0, y: 1.0 }
    }
}

/// One grid position. Everything here is fixed once the grid is built;
/// search costs live in per-search scratch state, not on the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    /// `x * height + y`: unique per cell, used as the final open-set tiebreak
    /// and as the cell's storage slot.
    pub index: usize,
    pub walkable: bool,
}

impl Cell {
    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.x, self.y)
    }
}

/// Fixed-size walkability grid
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: CellSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell walkable
    pub fn new(width: i32, height: i32, cell_size: CellSize) -> Result<Self> {
        Self::build(width, height, cell_size, |_, _| true)
    }

    /// Build a grid from a walkability map indexed `map[x][y]`, where `1` is walkable
    pub fn from_walkability(map: &[Vec<i32>], cell_size: CellSize) -> Result<Self> {
        let width = map.len();
        let height = map.first().map(Vec::len).unwrap_or(0);

        if let Some((x, column)) = map.iter().enumerate().find(|(_, c)| c.len() != height) {
            return Err(Error::InvalidMap(format!(
                "column {} has {} cells, expected {}",
                x,
                column.len(),
                height
            )));
        }

        let width = dimension(width, "width")?;
        let height = dimension(height, "height")?;

        Self::build(width, height, cell_size, |x, y| {
            map[x as usize][y as usize] == 1
        })
    }

    /// Create a grid with specific blocked cells
    pub fn with_blocked(
        width: i32,
        height: i32,
        cell_size: CellSize,
        blocked: &[CellCoord],
    ) -> Result<Self> {
        if let Some(outside) = blocked
            .iter()
            .find(|c| c.x < 0 || c.x >= width || c.y < 0 || c.y >= height)
        {
            return Err(Error::InvalidMap(format!(
                "blocked cell ({}, {}) is outside the {}x{} grid",
                outside.x, outside.y, width, height
            )));
        }

        Self::build(width, height, cell_size, |x, y| {
            !blocked.contains(&CellCoord::new(x, y))
        })
    }

    fn build<F>(width: i32, height: i32, cell_size: CellSize, mut walkable: F) -> Result<Self>
    where
        F: FnMut(i32, i32) -> bool,
    {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidMap(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        cell_size.validate()?;

        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| Error::InvalidMap(format!("{}x{} grid is too large", width, height)))?;

        let mut cells = Vec::with_capacity(count);
        for x in 0..width {
            for y in 0..height {
                cells.push(Cell {
                    x,
                    y,
                    index: cells.len(),
                    walkable: walkable(x, y),
                });
            }
        }

        Ok(Grid {
            width,
            height,
            cell_size,
            cells,
        })
    }

    /// Number of cells along x
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of cells along y
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    /// All cells, ordered by index
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Storage slot (and tiebreak index) of a coordinate
    pub fn index_of(&self, coord: CellCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.x as usize * self.height as usize + coord.y as usize)
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.index_of(coord).map(|index| &self.cells[index])
    }

    pub(crate) fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Out of bounds is treated as not walkable
    pub fn is_walkable(&self, coord: CellCoord) -> bool {
        self.cell(coord).is_some_and(|cell| cell.walkable)
    }

    /// Map a world position to the cell containing it.
    ///
    /// Subtracts half a cell, divides by the cell size and truncates toward
    /// zero, so the first cell spans one and a half cells of world space.
    pub fn world_to_cell(&self, pos: WorldPoint) -> Result<CellCoord> {
        let fx = (pos.x - self.cell_size.x * 0.5) / self.cell_size.x;
        let fy = (pos.y - self.cell_size.y * 0.5) / self.cell_size.y;

        if !fx.is_finite() || !fy.is_finite() {
            return Err(Error::NonFinitePosition { x: pos.x, y: pos.y });
        }

        let coord = CellCoord::new(fx as i32, fy as i32);
        if !self.contains(coord) {
            return Err(Error::OutOfBounds {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            });
        }

        Ok(coord)
    }

    /// A world position that `world_to_cell` maps back to `coord`
    pub fn cell_center(&self, coord: CellCoord) -> WorldPoint {
        WorldPoint::new(
            (coord.x as f32 + 1.0) * self.cell_size.x,
            (coord.y as f32 + 1.0) * self.cell_size.y,
        )
    }
}

fn dimension(len: usize, name: &str) -> Result<i32> {
    i32::try_from(len).map_err(|_| Error::InvalidMap(format!("map {} {} is too large", name, len)))
}
