//! Gomoku AI engine
//!
//! Five-in-a-row on a square board against a depth-limited minimax search:
//! - Default 15x15 board, any size up to [`board::MAX_BOARD_SIZE`]
//! - Five or more in a row wins
//! - No forbidden moves, no captures
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and line counting
//! - [`eval`]: Pattern classification and position evaluation
//! - [`search`]: Candidate generation, move ordering and alpha-beta search
//! - [`engine`]: Main AI engine integrating all components
//! - [`ui`]: egui front-end used by the `gomoku` binary
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, EngineConfig, Stone};
//!
//! let mut board = Board::new();
//! let mut engine = AIEngine::with_config(Stone::White, EngineConfig::default().with_depth(2));
//!
//! board.place(7, 7, Stone::Black);
//!
//! // AI responds as White
//! if let Some(pos) = engine.choose_move(&board) {
//!     board.place(i32::from(pos.row), i32::from(pos.col), Stone::White);
//!     println!("AI plays at ({}, {})", pos.row, pos.col);
//! }
//! assert!(!board.is_terminal());
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE};
pub use engine::{AIEngine, EngineConfig, MoveResult};
pub use error::{GomokuError, GomokuResult};
