//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate move generation around existing stones
//! - Pluggable move ordering (random shuffle or generation order)
//! - Minimax search with alpha-beta pruning

pub mod alphabeta;
pub mod movegen;
pub mod order;

pub use alphabeta::{SearchLimits, SearchResult, Searcher};
pub use movegen::{generate_candidate_moves, CandidateWindow};
pub use order::{GenerationOrder, MoveOrder, Shuffled};
