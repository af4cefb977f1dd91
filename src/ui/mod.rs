//! GUI module for the Gomoku game
//!
//! Native front-end built on egui/eframe. The engine runs on a worker thread
//! so the window stays responsive while it searches.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GomokuApp;
pub use game_state::{FirstMove, GameOutcome, GameState};
