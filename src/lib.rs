pub mod config;
pub mod error;
pub mod grid;
pub mod map_data;
pub mod pathfinding;
pub mod render;

pub use error::{Error, Result};
pub use grid::{Cell, CellCoord, CellSize, Grid, WorldPoint};
pub use map_data::MapData;
pub use pathfinding::{find_path, Heuristic, Path, Pathfinder};
pub use render::{draw_gizmos, AsciiCanvas, CellStyle, GizmoSink};
