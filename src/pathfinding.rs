//! A* search over a walkability grid.
//!
//! 8-connected movement: orthogonal steps cost 10, diagonal steps cost 14.
//! Each search owns its cost bookkeeping, so a [`Grid`] can be shared by any
//! number of searches, sequential or concurrent.

use log::{debug, trace};
use serde::Deserialize;
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::grid::{Cell, CellCoord, Grid, WorldPoint};
use crate::map_data::MapData;

pub const ORTHOGONAL_COST: u32 = 10;
pub const DIAGONAL_COST: u32 = 14;

/// Neighbor offsets with their step cost, orthogonal first
const MOVES: [(i32, i32, u32); 8] = [
    (1, 0, ORTHOGONAL_COST),
    (-1, 0, ORTHOGONAL_COST),
    (0, 1, ORTHOGONAL_COST),
    (0, -1, ORTHOGONAL_COST),
    (1, 1, DIAGONAL_COST),
    (1, -1, DIAGONAL_COST),
    (-1, 1, DIAGONAL_COST),
    (-1, -1, DIAGONAL_COST),
];

/// Remaining-cost estimate used to order the open set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Exact cost on an empty grid. Never overestimates, so paths are minimal.
    #[default]
    Octile,
    /// `(|dx| + |dy|) * 10`. Overestimates diagonal moves, so paths can be
    /// longer than necessary; kept for output compatibility with older maps.
    Manhattan,
}

impl Heuristic {
    pub fn estimate(self, from: CellCoord, to: CellCoord) -> u32 {
        let dx = from.x.abs_diff(to.x);
        let dy = from.y.abs_diff(to.y);
        match self {
            Heuristic::Manhattan => (dx + dy) * ORTHOGONAL_COST,
            Heuristic::Octile => {
                let (short, long) = if dx < dy { (dx, dy) } else { (dy, dx) };
                short * DIAGONAL_COST + (long - short) * ORTHOGONAL_COST
            }
        }
    }
}

/// Cost of a single move between grid-adjacent cells, `None` if they are not adjacent
pub fn step_cost(from: CellCoord, to: CellCoord) -> Option<u32> {
    match (from.x.abs_diff(to.x), from.y.abs_diff(to.y)) {
        (1, 0) | (0, 1) => Some(ORTHOGONAL_COST),
        (1, 1) => Some(DIAGONAL_COST),
        _ => None,
    }
}

/// Sum of step costs along a coordinate sequence, `None` if any step is not a single move
pub fn path_cost(path: &[CellCoord]) -> Option<u32> {
    path.windows(2).map(|w| step_cost(w[0], w[1])).sum()
}

/// A found path, start to goal inclusive
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub cells: Vec<Cell>,
    /// Accumulated cost of the goal cell
    pub cost: u32,
    /// Number of cells finalized before the goal was reached
    pub expanded: usize,
}

impl Path {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<&Cell> {
        self.cells.first()
    }

    pub fn goal(&self) -> Option<&Cell> {
        self.cells.last()
    }

    pub fn coords(&self) -> Vec<CellCoord> {
        self.cells.iter().map(Cell::coord).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Unvisited,
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy)]
struct NodeState {
    g: u32,
    h: u32,
    parent: Option<usize>,
    status: Status,
}

impl Default for NodeState {
    fn default() -> Self {
        NodeState {
            g: 0,
            h: 0,
            parent: None,
            status: Status::Unvisited,
        }
    }
}

/// Open-set ordering: lowest f, then lowest h, then lowest cell index.
/// Field order matters, the derived `Ord` compares them in sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenKey {
    f: u32,
    h: u32,
    index: usize,
}

/// Scratch state for one search, indexed by cell slot
struct Search<'a> {
    grid: &'a Grid,
    heuristic: Heuristic,
    goal: CellCoord,
    nodes: Vec<NodeState>,
    open: BTreeSet<OpenKey>,
    expanded: usize,
}

impl<'a> Search<'a> {
    fn new(grid: &'a Grid, goal: CellCoord, heuristic: Heuristic) -> Self {
        Search {
            grid,
            heuristic,
            goal,
            nodes: vec![NodeState::default(); grid.cells().len()],
            open: BTreeSet::new(),
            expanded: 0,
        }
    }

    fn key(&self, index: usize) -> OpenKey {
        let node = &self.nodes[index];
        OpenKey {
            f: node.g + node.h,
            h: node.h,
            index,
        }
    }

    /// Record a (cheaper) route to `index` and put it on the open set
    fn relax(&mut self, index: usize, g: u32, parent: Option<usize>) {
        if self.nodes[index].status == Status::Open {
            let stale = self.key(index);
            self.open.remove(&stale);
        }

        let h = self
            .heuristic
            .estimate(self.grid.cell_at(index).coord(), self.goal);
        self.nodes[index] = NodeState {
            g,
            h,
            parent,
            status: Status::Open,
        };
        self.open.insert(self.key(index));
    }

    fn run(mut self, start: usize, goal: usize) -> Option<Path> {
        self.relax(start, 0, None);

        while let Some(OpenKey { index: current, .. }) = self.open.pop_first() {
            if current == goal {
                return Some(self.reconstruct(goal));
            }

            self.nodes[current].status = Status::Closed;
            self.expanded += 1;

            let cell = *self.grid.cell_at(current);
            let current_g = self.nodes[current].g;

            for &(dx, dy, cost) in &MOVES {
                let Some(neighbor) = self.grid.index_of(CellCoord::new(cell.x + dx, cell.y + dy))
                else {
                    continue;
                };

                let state = self.nodes[neighbor];
                if !self.grid.cell_at(neighbor).walkable || state.status == Status::Closed {
                    continue;
                }

                let tentative_g = current_g + cost;
                if state.status != Status::Open || tentative_g < state.g {
                    self.relax(neighbor, tentative_g, Some(current));
                }
            }
        }

        None
    }

    fn reconstruct(&self, goal: usize) -> Path {
        let mut cells = vec![*self.grid.cell_at(goal)];
        let mut current = goal;

        while let Some(parent) = self.nodes[current].parent {
            cells.push(*self.grid.cell_at(parent));
            current = parent;
        }
        cells.reverse();

        Path {
            cells,
            cost: self.nodes[goal].g,
            expanded: self.expanded,
        }
    }
}

fn checked_index(grid: &Grid, coord: CellCoord) -> Result<usize> {
    grid.index_of(coord).ok_or(Error::OutOfBounds {
        x: coord.x,
        y: coord.y,
        width: grid.width(),
        height: grid.height(),
    })
}

/// Find a minimum-cost path between two cells.
///
/// Returns `Ok(None)` when the goal cannot be reached, including when the
/// start or goal cell is not walkable. Coordinates outside the grid are an error.
pub fn find_path(
    grid: &Grid,
    start: CellCoord,
    goal: CellCoord,
    heuristic: Heuristic,
) -> Result<Option<Path>> {
    trace!(
        "[AStar] find_path: start=({},{}) goal=({},{}) heuristic={:?}",
        start.x,
        start.y,
        goal.x,
        goal.y,
        heuristic
    );

    let start_index = checked_index(grid, start)?;
    let goal_index = checked_index(grid, goal)?;

    if !grid.cell_at(start_index).walkable {
        debug!("[AStar] no path: start ({},{}) is blocked", start.x, start.y);
        return Ok(None);
    }
    if !grid.cell_at(goal_index).walkable {
        debug!("[AStar] no path: goal ({},{}) is blocked", goal.x, goal.y);
        return Ok(None);
    }

    let search = Search::new(grid, goal, heuristic);
    let path = search.run(start_index, goal_index);

    match &path {
        Some(path) => debug!(
            "[AStar] found path: {} cells, cost={}, expanded={}",
            path.len(),
            path.cost,
            path.expanded
        ),
        None => debug!(
            "[AStar] no path from ({},{}) to ({},{})",
            start.x, start.y, goal.x, goal.y
        ),
    }

    Ok(path)
}

/// Owns the grid built at startup and answers search requests against it
#[derive(Debug, Clone)]
pub struct Pathfinder {
    grid: Grid,
    heuristic: Heuristic,
}

impl Pathfinder {
    pub fn new(grid: Grid) -> Self {
        Pathfinder {
            grid,
            heuristic: Heuristic::default(),
        }
    }

    pub fn from_map(map: &MapData) -> Result<Self> {
        Ok(Self::new(map.build_grid()?))
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Search between two world positions
    pub fn search(&self, start: WorldPoint, end: WorldPoint) -> Result<Option<Path>> {
        let start = self.grid.world_to_cell(start)?;
        let goal = self.grid.world_to_cell(end)?;
        self.find_path(start, goal)
    }

    /// Search between two grid coordinates
    pub fn find_path(&self, start: CellCoord, goal: CellCoord) -> Result<Option<Path>> {
        find_path(&self.grid, start, goal, self.heuristic)
    }
}

/// Format path for display
pub fn format_path(path: &[CellCoord]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|c| format!("({},{})", c.x, c.y))
        .collect::<Vec<_>>()
        .join(" -> ")
}
