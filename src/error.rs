//! Error types and result alias for the crate.
//!
//! Map and config problems surface when a grid is built, bad search requests
//! surface from the search call. An unreachable goal is not an error: searches
//! return `Ok(None)` for it.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid map: {0}")]
    InvalidMap(String),

    #[error("malformed map description: {0}")]
    MapFormat(#[from] serde_json::Error),

    #[error("position ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("position ({x}, {y}) is not a finite coordinate")]
    NonFinitePosition { x: f32, y: f32 },

    #[error("malformed config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures raised while building a grid from a map description.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Error::InvalidMap(_) | Error::MapFormat(_))
    }

    /// True for search requests that do not land on the grid.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Error::OutOfBounds { .. } | Error::NonFinitePosition { .. })
    }
}
