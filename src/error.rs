//! Error types for board construction and stone placement

use thiserror::Error;

/// Errors reported by fallible board operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GomokuError {
    /// Board dimension outside the supported range
    #[error("Invalid board size: {size} (must be 1-{max})")]
    InvalidBoardSize { size: usize, max: usize },

    /// Coordinate outside the board
    #[error("Coordinate ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: i32, col: i32, size: usize },

    /// Target cell already holds a stone
    #[error("Cell ({row}, {col}) is already occupied")]
    Occupied { row: i32, col: i32 },
}

/// Result type alias for board operations
pub type GomokuResult<T> = Result<T, GomokuError>;
