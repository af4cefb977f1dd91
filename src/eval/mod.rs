//! Evaluation module for Gomoku positions
//!
//! This module provides pattern recognition and scoring for board positions.
//! The evaluation considers:
//! - Decided positions (five in a row)
//! - Line patterns (twos, threes, fours) and whether both ends are open

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, SCORE_INFINITY};
pub use patterns::{classify, Pattern, PatternScore};
