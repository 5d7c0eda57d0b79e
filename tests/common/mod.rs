#![allow(dead_code)]

use grid_astar::pathfinding::path_cost;
use grid_astar::{CellCoord, CellSize, Grid, Path};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fs;

/// A grid layout with a start and goal, parsed from text
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    pub start: CellCoord,
    pub goal: CellCoord,
    /// `Some(None)` means the layout expects no path
    pub expected_cost: Option<Option<u32>>,
}

/// Parse a layout file
/// Format:
/// - S: start cell
/// - G: goal cell (defaults to the start cell)
/// - #: blocked cell
/// - .: free cell
/// - optional trailing line `cost: <n>` or `cost: none`
pub fn parse_layout(contents: &str) -> Result<Layout, Box<dyn std::error::Error>> {
    let mut rows: Vec<&str> = Vec::new();
    let mut expected_cost = None;

    for line in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(cost) = line.strip_prefix("cost:") {
            expected_cost = match cost.trim() {
                "none" => Some(None),
                n => Some(Some(n.parse()?)),
            };
        } else {
            rows.push(line);
        }
    }

    if rows.is_empty() {
        return Err("No grid rows found in layout".into());
    }

    let width = rows[0].chars().count();
    if rows.iter().any(|r| r.chars().count() != width) {
        return Err("Layout rows have different widths".into());
    }

    let mut blocked = Vec::new();
    let mut start = None;
    let mut goal = None;

    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let coord = CellCoord::new(x as i32, y as i32);
            match ch {
                'S' => start = Some(coord),
                'G' => goal = Some(coord),
                '#' => blocked.push(coord),
                '.' => {}
                other => return Err(format!("Unknown layout character '{}'", other).into()),
            }
        }
    }

    let start = start.ok_or("No start position 'S' found in layout")?;
    let grid = Grid::with_blocked(width as i32, rows.len() as i32, CellSize::default(), &blocked)?;

    Ok(Layout {
        grid,
        start,
        goal: goal.unwrap_or(start),
        expected_cost,
    })
}

pub fn load_layout(path: &std::path::Path) -> Result<Layout, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    parse_layout(&contents)
}

fn remap<F>(layout: &Layout, flip: F) -> Layout
where
    F: Fn(CellCoord) -> CellCoord,
{
    let blocked: Vec<CellCoord> = layout
        .grid
        .cells()
        .iter()
        .filter(|c| !c.walkable)
        .map(|c| flip(c.coord()))
        .collect();

    Layout {
        grid: Grid::with_blocked(
            layout.grid.width(),
            layout.grid.height(),
            layout.grid.cell_size(),
            &blocked,
        )
        .expect("flipped layout stays in bounds"),
        start: flip(layout.start),
        goal: flip(layout.goal),
        expected_cost: layout.expected_cost,
    }
}

/// Flip layout horizontally (mirror left-right)
pub fn flip_horizontal(layout: &Layout) -> Layout {
    let width = layout.grid.width();
    remap(layout, |c| CellCoord::new(width - 1 - c.x, c.y))
}

/// Flip layout vertically (mirror top-bottom)
pub fn flip_vertical(layout: &Layout) -> Layout {
    let height = layout.grid.height();
    remap(layout, |c| CellCoord::new(c.x, height - 1 - c.y))
}

/// Flip layout both horizontally and vertically
pub fn flip_both(layout: &Layout) -> Layout {
    flip_vertical(&flip_horizontal(layout))
}

/// All 4 variants (original, h_flip, v_flip, hv_flip)
pub fn variants(layout: &Layout) -> Vec<(&'static str, Layout)> {
    vec![
        ("original", layout.clone()),
        ("h_flip", flip_horizontal(layout)),
        ("v_flip", flip_vertical(layout)),
        ("hv_flip", flip_both(layout)),
    ]
}

/// Minimum path cost by plain Dijkstra over the same move set
pub fn reference_cost(grid: &Grid, start: CellCoord, goal: CellCoord) -> Option<u32> {
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return None;
    }

    let slot = |c: CellCoord| grid.index_of(c).expect("coordinate on grid");
    let mut best = vec![u32::MAX; grid.cells().len()];
    let mut queue = BinaryHeap::new();
    best[slot(start)] = 0;
    queue.push(Reverse((0u32, start.x, start.y)));

    while let Some(Reverse((cost, x, y))) = queue.pop() {
        let here = CellCoord::new(x, y);
        if here == goal {
            return Some(cost);
        }
        if cost > best[slot(here)] {
            continue;
        }

        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let next = CellCoord::new(x + dx, y + dy);
                if !grid.is_walkable(next) {
                    continue;
                }
                let step = if dx != 0 && dy != 0 { 14 } else { 10 };
                let next_cost = cost + step;
                if next_cost < best[slot(next)] {
                    best[slot(next)] = next_cost;
                    queue.push(Reverse((next_cost, next.x, next.y)));
                }
            }
        }
    }

    None
}

/// Check the structural guarantees every returned path must satisfy
pub fn assert_valid_path(grid: &Grid, path: &Path, start: CellCoord, goal: CellCoord) {
    let coords = path.coords();

    assert_eq!(coords.first(), Some(&start), "path must begin at the start");
    assert_eq!(coords.last(), Some(&goal), "path must end at the goal");
    assert!(
        path.cells.iter().all(|c| grid.is_walkable(c.coord())),
        "path crosses a blocked cell: {:?}",
        coords
    );
    assert_eq!(
        path_cost(&coords),
        Some(path.cost),
        "path steps must be single moves summing to the goal cost: {:?}",
        coords
    );
}

/// Small deterministic generator so random grids are reproducible
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        XorShift(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Value in `0..bound`
    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// Random grid with roughly `blocked_percent` of its cells blocked
pub fn random_grid(rng: &mut XorShift, width: i32, height: i32, blocked_percent: u64) -> Grid {
    let mut blocked = Vec::new();
    for x in 0..width {
        for y in 0..height {
            if rng.below(100) < blocked_percent {
                blocked.push(CellCoord::new(x, y));
            }
        }
    }

    Grid::with_blocked(width, height, CellSize::default(), &blocked).expect("valid random grid")
}
