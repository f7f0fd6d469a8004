//! Error types for maze generation, verification and configuration

use thiserror::Error;

use crate::maze::Cell;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("start cell {start} is outside a {rows}x{cols} grid")]
    StartOutOfBounds { start: Cell, rows: usize, cols: usize },

    #[error("expected {expected} passages but found {actual}")]
    PassageCount { expected: usize, actual: usize },

    #[error("passage between {a} and {b} closes a cycle")]
    Cycle { a: Cell, b: Cell },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
