use arboard::Clipboard;
use grid_astar::config::Config;
use grid_astar::pathfinding::format_path;
use grid_astar::{
    draw_gizmos, AsciiCanvas, Cell, CellCoord, CellStyle, GizmoSink, MapData, Path, Pathfinder,
};
use log::{error, info, warn};
use macroquad::prelude::*;
use macroquad::window::Conf;

const CONFIG_PATH: &str = "config.toml";

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Load the map named in the config and build the shared pathfinder
fn load_pathfinder(config: &Config) -> grid_astar::Result<Pathfinder> {
    let map = MapData::load(&config.map.path)?;
    let pathfinder = Pathfinder::from_map(&map)?.with_heuristic(config.search.heuristic);
    info!(
        "Loaded {} ({}x{} cells)",
        config.map.path,
        pathfinder.grid().width(),
        pathfinder.grid().height()
    );
    Ok(pathfinder)
}

/// Run the configured search once and print the result as text
fn print_search(pathfinder: &Pathfinder, config: &Config) -> grid_astar::Result<()> {
    let path = pathfinder.search(config.search.start, config.search.end)?;

    match &path {
        Some(path) => {
            println!("Path: {}", format_path(&path.coords()));
            println!("Cost: {}, cells expanded: {}\n", path.cost, path.expanded);
        }
        None => println!("No path\n"),
    }
    print!("{}", AsciiCanvas::render(pathfinder.grid(), path.as_ref()));

    Ok(())
}

/// Draws cells as screen rectangles: walkable cells outlined,
/// blocked cells filled and crossed, path cells filled
struct ScreenGizmos {
    cell_pixels: f32,
    show_path: bool,
}

impl GizmoSink for ScreenGizmos {
    fn draw_cell(&mut self, cell: &Cell, style: CellStyle) {
        let size = self.cell_pixels;
        let px = cell.x as f32 * size;
        let py = cell.y as f32 * size;

        match style {
            CellStyle::Walkable => {
                draw_rectangle_lines(
                    px + 1.0,
                    py + 1.0,
                    size - 2.0,
                    size - 2.0,
                    2.0,
                    Color::from_rgba(100, 200, 100, 255),
                );
            }
            CellStyle::Blocked => {
                draw_rectangle(px, py, size - 1.0, size - 1.0, Color::from_rgba(10, 10, 10, 255));
                draw_line(px, py, px + size - 1.0, py + size - 1.0, 1.0, GRAY);
                draw_line(px + size - 1.0, py, px, py + size - 1.0, 1.0, GRAY);
            }
            _ if !self.show_path => {}
            CellStyle::Path => {
                draw_rectangle(px + 4.0, py + 4.0, size - 8.0, size - 8.0, RED);
            }
            CellStyle::Start => {
                draw_rectangle(px + 4.0, py + 4.0, size - 8.0, size - 8.0, BLUE);
            }
            CellStyle::Goal => {
                draw_rectangle(px + 4.0, py + 4.0, size - 8.0, size - 8.0, YELLOW);
            }
        }
    }
}

/// Visualization state
struct ViewerState {
    pathfinder: Pathfinder,
    start: CellCoord,
    goal: CellCoord,
    path: Option<Path>,
    status: String,
    gizmos: ScreenGizmos,
    background: Color,
}

impl ViewerState {
    fn new(pathfinder: Pathfinder, config: &Config) -> grid_astar::Result<Self> {
        let start = pathfinder.grid().world_to_cell(config.search.start)?;
        let goal = pathfinder.grid().world_to_cell(config.search.end)?;

        let mut state = ViewerState {
            pathfinder,
            start,
            goal,
            path: None,
            status: String::new(),
            gizmos: ScreenGizmos {
                cell_pixels: config.visual.cell_pixels,
                show_path: config.visual.show_path,
            },
            background: Color::from_rgba(
                config.visual.background_r,
                config.visual.background_g,
                config.visual.background_b,
                255,
            ),
        };
        state.update_path();
        Ok(state)
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let coord = CellCoord::new(
            (mouse_x / self.gizmos.cell_pixels) as i32,
            (mouse_y / self.gizmos.cell_pixels) as i32,
        );

        if !self.pathfinder.grid().contains(coord) {
            return;
        }

        // Left click: move start, right click: move goal
        if is_mouse_button_pressed(MouseButton::Left) {
            self.start = coord;
        } else if is_mouse_button_pressed(MouseButton::Right) {
            self.goal = coord;
        }
        self.update_path();
    }

    /// Re-run the search through the world-space API
    fn update_path(&mut self) {
        let grid = self.pathfinder.grid();
        let start = grid.cell_center(self.start);
        let end = grid.cell_center(self.goal);

        match self.pathfinder.search(start, end) {
            Ok(Some(path)) => {
                self.status = format!(
                    "Path: {} cells, cost {}, expanded {}",
                    path.len(),
                    path.cost,
                    path.expanded
                );
                self.path = Some(path);
            }
            Ok(None) => {
                self.status = "No path".to_string();
                self.path = None;
            }
            Err(e) => {
                warn!("Search rejected: {}", e);
                self.status = format!("Invalid request: {}", e);
                self.path = None;
            }
        }
    }

    fn copy_to_clipboard(&self) {
        let text = match &self.path {
            Some(path) => format_path(&path.coords()),
            None => format_path(&[]),
        };

        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Path copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn draw(&mut self) {
        clear_background(self.background);

        draw_gizmos(self.pathfinder.grid(), self.path.as_ref(), &mut self.gizmos);

        let info_x = self.pathfinder.grid().width() as f32 * self.gizmos.cell_pixels + 10.0;
        let lines = [
            format!("Start: ({}, {})", self.start.x, self.start.y),
            format!("Goal: ({}, {})", self.goal.x, self.goal.y),
            self.status.clone(),
            "Left click: set start".to_string(),
            "Right click: set goal".to_string(),
            "C: copy path to clipboard".to_string(),
            "Esc: close window".to_string(),
        ];
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, info_x, 20.0 + i as f32 * 22.0, 20.0, WHITE);
        }
    }
}

fn window_conf() -> Conf {
    let window_title = Config::load_or_default(CONFIG_PATH)
        .map(|c| c.visual.window_title)
        .unwrap_or_else(|_| Config::default().visual.window_title);

    Conf {
        window_title,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let loaded = Config::load_or_default(CONFIG_PATH);
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(&level);

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {}, using default configuration", CONFIG_PATH, e);
            Config::default()
        }
    };

    let pathfinder = match load_pathfinder(&config) {
        Ok(pathfinder) => pathfinder,
        Err(e) => {
            error!("Failed to load map {}: {}", config.map.path, e);
            return;
        }
    };

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--print" {
        if let Err(e) = print_search(&pathfinder, &config) {
            error!("Search failed: {}", e);
        }
        return;
    }

    let mut state = match ViewerState::new(pathfinder, &config) {
        Ok(state) => state,
        Err(e) => {
            error!("Configured search is invalid: {}", e);
            return;
        }
    };
    info!("Initial search: {}", state.status);

    loop {
        // Handle input
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right)
        {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }

        // Copy path to clipboard on C key
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }
}
