//! Main AI engine wrapping the minimax searcher
//!
//! The engine plays one color. Each call to [`AIEngine::choose_move`] runs a
//! fresh depth-limited alpha-beta search from the given position; nothing is
//! carried over between calls apart from configuration.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, EngineConfig, Stone};
//!
//! // Use smaller depth for faster example
//! let mut engine = AIEngine::with_config(Stone::White, EngineConfig::default().with_depth(2));
//! let mut board = Board::new();
//! board.place(7, 7, Stone::Black);
//!
//! let result = engine.choose_move_with_stats(&board);
//! println!("Best move: {:?}", result.best_move);
//! println!("Nodes: {}", result.nodes);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::{Duration, Instant};

use tracing::info;

use crate::board::{Board, Pos, Stone};
use crate::eval::evaluate;
use crate::search::{CandidateWindow, MoveOrder, SearchLimits, SearchResult, Searcher, Shuffled};

/// Search depth used when none is configured
pub const DEFAULT_DEPTH: u8 = 5;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Plies searched per move (at least 1)
    pub depth: u8,
    /// Alpha-beta pruning; off means plain minimax
    pub pruning: bool,
    /// Neighbourhood used for candidate moves
    pub window: CandidateWindow,
    /// Optional node and time budgets
    pub limits: SearchLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            pruning: true,
            window: CandidateWindow::Symmetric,
            limits: SearchLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Set the search depth. Depth 0 would never produce a move, so it is
    /// raised to 1.
    #[must_use]
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth.max(1);
        self
    }

    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    #[must_use]
    pub fn with_window(mut self, window: CandidateWindow) -> Self {
        self.window = window;
        self
    }

    #[must_use]
    pub fn with_node_limit(mut self, max_nodes: u64) -> Self {
        self.limits.max_nodes = Some(max_nodes);
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit_ms: u64) -> Self {
        self.limits.time_limit = Some(Duration::from_millis(time_limit_ms));
        self
    }
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, `None` when the game is already over
    pub best_move: Option<Pos>,
    /// Evaluation of the searched position for the engine's color
    pub score: i32,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
    /// Alpha-beta cutoffs taken
    pub cutoffs: u64,
    /// A node or time budget stopped the search early
    pub aborted: bool,
}

impl MoveResult {
    #[inline]
    fn from_search(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            time_ms,
            nodes: result.nodes,
            cutoffs: result.cutoffs,
            aborted: result.aborted,
        }
    }

    /// Result for a board that is already won or full
    #[inline]
    fn game_over(score: i32, time_ms: u64) -> Self {
        Self {
            best_move: None,
            score,
            time_ms,
            nodes: 0,
            cutoffs: 0,
            aborted: false,
        }
    }
}

/// Main AI Engine for Gomoku.
///
/// # Configuration
///
/// See [`EngineConfig`]: depth, pruning, candidate window and budgets.
/// The order in which equally good candidates are tried comes from the
/// `O` parameter; the default shuffles with an OS-seeded generator.
///
/// # Example
///
/// ```
/// use gomoku::{AIEngine, Board, EngineConfig, Stone};
///
/// let config = EngineConfig::default().with_depth(2).with_time_limit(500);
/// let mut engine = AIEngine::with_config(Stone::Black, config);
///
/// let board = Board::new();
/// assert_eq!(engine.choose_move(&board).map(|p| (p.row, p.col)), Some((7, 7)));
/// ```
pub struct AIEngine<O: MoveOrder = Shuffled> {
    searcher: Searcher<O>,
    config: EngineConfig,
}

impl AIEngine {
    /// Create an engine for `color` with default settings (depth 5, pruning on,
    /// symmetric window, no budget).
    #[must_use]
    pub fn new(color: Stone) -> Self {
        Self::with_config(color, EngineConfig::default())
    }

    /// Create an engine with custom configuration.
    #[must_use]
    pub fn with_config(color: Stone, config: EngineConfig) -> Self {
        Self::with_order(color, config, Shuffled::from_entropy())
    }
}

impl<O: MoveOrder> AIEngine<O> {
    /// Create an engine with an explicit candidate order source.
    pub fn with_order(color: Stone, config: EngineConfig, order: O) -> Self {
        let searcher = Searcher::with_order(color, order)
            .with_window(config.window)
            .with_pruning(config.pruning)
            .with_limits(config.limits);
        Self { searcher, config }
    }

    /// Color the engine plays and scores for
    #[inline]
    pub fn color(&self) -> Stone {
        self.searcher.color()
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Set the search depth used by later calls
    pub fn set_depth(&mut self, depth: u8) {
        self.config = self.config.with_depth(depth);
    }

    /// Get the best move for the given position.
    ///
    /// Returns `None` if the game is already over.
    #[must_use]
    pub fn choose_move(&mut self, board: &Board) -> Option<Pos> {
        self.choose_move_with_stats(board).best_move
    }

    /// Get the best move with detailed search statistics.
    #[must_use]
    pub fn choose_move_with_stats(&mut self, board: &Board) -> MoveResult {
        let start = Instant::now();

        if board.is_terminal() {
            return MoveResult::game_over(
                evaluate(board, self.color()),
                start.elapsed().as_millis() as u64,
            );
        }

        let result = self.searcher.search(board, self.config.depth);
        let move_result = MoveResult::from_search(result, start.elapsed().as_millis() as u64);

        info!(
            color = ?self.color(),
            best_move = ?move_result.best_move,
            score = move_result.score,
            nodes = move_result.nodes,
            time_ms = move_result.time_ms,
            "engine move chosen"
        );
        move_result
    }

    /// Run the minimax recursion directly with an explicit window and side.
    ///
    /// Works on a copy of `board`. Returns the value and the move achieving it;
    /// the move is `None` at depth 0 or on a terminal board.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> (i32, Option<Pos>) {
        let mut work_board = board.clone();
        self.searcher.reset();
        self.searcher
            .minimax(&mut work_board, depth, alpha, beta, maximizing)
    }

    /// Static evaluation of `board` for the engine's color
    #[must_use]
    pub fn evaluate(&self, board: &Board) -> i32 {
        evaluate(board, self.color())
    }

    /// Candidate moves in the order the engine would try them
    pub fn generate_candidate_moves(&mut self, board: &Board) -> Vec<Pos> {
        self.searcher.candidate_moves(board)
    }
}
