// error.rs - Error taxonomy for the simulation engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    IndexOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("pattern '{name}' needs {width}x{height} cells and does not fit the grid")]
    PatternTooLarge {
        name: &'static str,
        width: usize,
        height: usize,
    },

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("malformed grid rows: {0}")]
    MalformedRows(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
