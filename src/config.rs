use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;
use crate::grid::WorldPoint;
use crate::pathfinding::Heuristic;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_map_path")]
    pub path: String,
}

/// Search issued at startup, in world coordinates
#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_start")]
    pub start: WorldPoint,
    #[serde(default = "default_end")]
    pub end: WorldPoint,
    #[serde(default)]
    pub heuristic: Heuristic,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    /// On-screen size of one cell in pixels
    #[serde(default = "default_cell_pixels")]
    pub cell_pixels: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_path")]
    pub show_path: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter, `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_map_path() -> String { "assets/map.json".to_string() }
fn default_start() -> WorldPoint { WorldPoint::new(0.0, 0.0) }
fn default_end() -> WorldPoint { WorldPoint::new(8.0, 8.0) }
fn default_window_title() -> String { "Grid A* Pathfinding".to_string() }
fn default_cell_pixels() -> f32 { 40.0 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_show_path() -> bool { true }
fn default_log_level() -> String { "info".to_string() }

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            path: default_map_path(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            heuristic: Heuristic::default(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_pixels: default_cell_pixels(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_path: default_show_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            search: SearchConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from file, or use defaults if the file doesn't exist.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }
}
