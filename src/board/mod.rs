//! Board representation for Gomoku

pub mod bitboard;
pub mod board;


// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Default board size (15x15)
pub const DEFAULT_BOARD_SIZE: usize = 15;
/// Largest board the engine accepts
pub const MAX_BOARD_SIZE: usize = 32;

/// Stones in a row needed to win
pub const WIN_LENGTH: u8 = 5;

/// The four line axes: horizontal, vertical, diagonal down, diagonal up.
/// Each axis is scanned both ways, so the opposite directions are not listed.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Stone colors. An empty cell is `None` in `Option<Stone>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major cell index on a board of the given size
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    /// Step `distance` cells along `(dr, dc)`, in signed coordinates.
    /// The result may lie off the board.
    #[inline]
    pub fn offset(self, (dr, dc): (i32, i32), distance: i32) -> (i32, i32) {
        (
            i32::from(self.row) + dr * distance,
            i32::from(self.col) + dc * distance,
        )
    }
}
