use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::grid::{CellSize, Grid};

/// Serialized map description: a cell size plus a walkability array
/// indexed `map[x][y]`, where `1` marks a walkable cell
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapData {
    pub size: CellSize,
    pub map: Vec<Vec<i32>>,
}

impl MapData {
    pub fn from_json(json: &str) -> Result<Self> {
        let map_data: MapData = serde_json::from_str(json)?;
        Ok(map_data)
    }

    /// Load a map description from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn build_grid(&self) -> Result<Grid> {
        let grid = Grid::from_walkability(&self.map, self.size)?;
        log::debug!(
            "Built {}x{} grid, {} walkable cells",
            grid.width(),
            grid.height(),
            grid.cells().iter().filter(|c| c.walkable).count()
        );
        Ok(grid)
    }
}
