//! Minimax search with alpha-beta pruning
//!
//! This module implements the core search algorithm for the Gomoku AI.
//! Scores are always taken from the searcher's own color: the maximizing
//! side plays that color, the minimizing side plays the opponent.
//!
//! # Features
//!
//! - Apply/undo on a single working board instead of a copy per branch
//! - Alpha-beta cutoffs, switchable off for plain minimax
//! - Pluggable candidate order (random by default)
//! - Optional node and wall-clock budgets
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Stone};
//! use gomoku::search::Searcher;
//!
//! let mut searcher = Searcher::new(Stone::White);
//! let mut board = Board::new();
//! board.place(7, 7, Stone::Black);
//!
//! let result = searcher.search(&board, 2);
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: ({}, {})", best_move.row, best_move.col);
//! }
//! ```

use std::time::{Duration, Instant};

use tracing::debug;

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate, SCORE_INFINITY};

use super::movegen::{generate_candidate_moves, CandidateWindow};
use super::order::{MoveOrder, Shuffled};

/// Nodes between wall-clock checks
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Optional search budgets. Both unset means search until depth 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop expanding new children after this many nodes
    pub max_nodes: Option<u64>,
    /// Stop expanding new children after this much time
    pub time_limit: Option<Duration>,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, `None` only for depth 0 or a terminal board
    pub best_move: Option<Pos>,
    /// Value of the position for the searching color
    pub score: i32,
    /// Depth requested
    pub depth: u8,
    /// Total nodes visited
    pub nodes: u64,
    /// Alpha-beta cutoffs taken
    pub cutoffs: u64,
    /// A budget ran out before the tree was fully searched
    pub aborted: bool,
}

/// Depth-limited minimax searcher for one color.
pub struct Searcher<O = Shuffled> {
    color: Stone,
    window: CandidateWindow,
    pruning: bool,
    limits: SearchLimits,
    order: O,
    nodes: u64,
    cutoffs: u64,
    start_time: Option<Instant>,
    next_time_check: u64,
    stopped: bool,
}

impl Searcher<Shuffled> {
    /// Searcher with random candidate order seeded from the OS
    #[must_use]
    pub fn new(color: Stone) -> Self {
        Self::with_order(color, Shuffled::from_entropy())
    }
}

impl<O: MoveOrder> Searcher<O> {
    /// Searcher with an explicit candidate order source
    pub fn with_order(color: Stone, order: O) -> Self {
        Self {
            color,
            window: CandidateWindow::default(),
            pruning: true,
            limits: SearchLimits::default(),
            order,
            nodes: 0,
            cutoffs: 0,
            start_time: None,
            next_time_check: TIME_CHECK_INTERVAL,
            stopped: false,
        }
    }

    #[must_use]
    pub fn with_window(mut self, window: CandidateWindow) -> Self {
        self.window = window;
        self
    }

    /// Disable to run plain minimax over the same move order
    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    #[inline]
    pub fn color(&self) -> Stone {
        self.color
    }

    /// Nodes visited since the last [`Searcher::search`]
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Candidate moves for `board` in the order the search will visit them
    pub fn candidate_moves(&mut self, board: &Board) -> Vec<Pos> {
        let mut moves = generate_candidate_moves(board, self.window);
        self.order.arrange(&mut moves);
        moves
    }

    /// Search `depth` plies from `board` with a full window, maximizing first.
    ///
    /// The caller's board is not modified; the search works on a clone.
    pub fn search(&mut self, board: &Board, depth: u8) -> SearchResult {
        self.reset();

        let mut work_board = board.clone();
        let (score, best_move) =
            self.minimax(&mut work_board, depth, -SCORE_INFINITY, SCORE_INFINITY, true);

        debug!(
            color = ?self.color,
            depth,
            score,
            nodes = self.nodes,
            cutoffs = self.cutoffs,
            aborted = self.stopped,
            "search finished"
        );

        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
            cutoffs: self.cutoffs,
            aborted: self.stopped,
        }
    }

    /// Clear statistics and restart the budget clock
    pub fn reset(&mut self) {
        self.nodes = 0;
        self.cutoffs = 0;
        self.stopped = false;
        self.start_time = Some(Instant::now());
        self.next_time_check = TIME_CHECK_INTERVAL;
    }

    /// Minimax recursion with alpha-beta pruning.
    ///
    /// Returns the value of `board` and the move that achieves it. At depth 0
    /// or on a terminal board the value is the static evaluation and the move
    /// is `None`. Every stone placed during the search is removed again before
    /// returning, so `board` comes back unchanged.
    ///
    /// Ties keep the first candidate visited. The first candidate always
    /// seeds the best move, so a node that expands returns `Some` even when
    /// every line loses.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Option<Pos>) {
        self.nodes += 1;

        if depth == 0 || board.is_terminal() {
            return (evaluate(board, self.color), None);
        }

        let mover = if maximizing {
            self.color
        } else {
            self.color.opponent()
        };
        let moves = self.candidate_moves(board);

        let mut best_move = None;
        let mut best_score = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        for mov in moves {
            // Out of budget: keep what we have, but never leave a node without a move
            if best_move.is_some() && self.budget_exhausted() {
                break;
            }

            let previous = board.apply(mov, mover);
            let (score, _) = self.minimax(board, depth - 1, alpha, beta, !maximizing);
            board.undo(mov, previous);

            // A child cut short by the budget only has a bound, not a value
            if self.stopped && best_move.is_some() {
                break;
            }

            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves || best_move.is_none() {
                best_score = score;
                best_move = Some(mov);
            }

            if self.pruning {
                if maximizing {
                    alpha = alpha.max(best_score);
                } else {
                    beta = beta.min(best_score);
                }
                if beta <= alpha {
                    self.cutoffs += 1;
                    break;
                }
            }
        }

        (best_score, best_move)
    }

    fn budget_exhausted(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if let Some(max_nodes) = self.limits.max_nodes {
            if self.nodes >= max_nodes {
                self.stopped = true;
            }
        }
        if let (Some(limit), Some(start)) = (self.limits.time_limit, self.start_time) {
            if self.nodes >= self.next_time_check {
                self.next_time_check = self.nodes + TIME_CHECK_INTERVAL;
                if start.elapsed() >= limit {
                    self.stopped = true;
                }
            }
        }
        self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::GenerationOrder;

    fn board_with(size: usize, stones: &[(i32, i32, Stone)]) -> Board {
        let mut board = Board::with_size(size).expect("valid size");
        for &(r, c, s) in stones {
            assert!(board.place(r, c, s), "failed to place ({}, {})", r, c);
        }
        board
    }

    fn fixed(color: Stone) -> Searcher<GenerationOrder> {
        Searcher::with_order(color, GenerationOrder)
    }

    fn midgame() -> Board {
        board_with(
            9,
            &[
                (4, 4, Stone::Black),
                (4, 5, Stone::White),
                (3, 4, Stone::Black),
                (5, 5, Stone::White),
                (5, 3, Stone::Black),
            ],
        )
    }

    #[test]
    fn test_depth_zero_returns_static_eval() {
        let mut board = midgame();
        let before = board.clone();
        let mut searcher = fixed(Stone::White);

        let (score, mov) =
            searcher.minimax(&mut board, 0, -SCORE_INFINITY, SCORE_INFINITY, true);
        assert_eq!(score, evaluate(&before, Stone::White));
        assert_eq!(mov, None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_terminal_board_is_not_expanded() {
        let mut board = board_with(
            15,
            &[
                (7, 3, Stone::Black),
                (7, 4, Stone::Black),
                (7, 5, Stone::Black),
                (7, 6, Stone::Black),
                (7, 7, Stone::Black),
            ],
        );
        let mut searcher = fixed(Stone::White);
        let (score, mov) =
            searcher.minimax(&mut board, 3, -SCORE_INFINITY, SCORE_INFINITY, true);
        assert_eq!(score, -SCORE_INFINITY);
        assert_eq!(mov, None);
        assert_eq!(searcher.nodes(), 1);
    }

    #[test]
    fn test_minimax_restores_board() {
        let mut board = midgame();
        let before = board.clone();
        let mut searcher = fixed(Stone::Black);
        let _ = searcher.minimax(&mut board, 2, -SCORE_INFINITY, SCORE_INFINITY, true);
        assert_eq!(board, before);
    }

    #[test]
    fn test_search_finds_winning_move() {
        let board = board_with(
            15,
            &[
                (7, 3, Stone::Black),
                (7, 4, Stone::Black),
                (7, 5, Stone::Black),
                (7, 6, Stone::Black),
                (8, 8, Stone::White),
            ],
        );
        let mut searcher = Searcher::new(Stone::Black);
        let result = searcher.search(&board, 1);
        assert_eq!(result.score, SCORE_INFINITY);
        let mov = result.best_move.expect("a move");
        assert!(mov == Pos::new(7, 2) || mov == Pos::new(7, 7), "got {:?}", mov);
    }

    #[test]
    fn test_search_blocks_opponent_win() {
        let board = board_with(
            15,
            &[
                (7, 2, Stone::Black),
                (7, 3, Stone::White),
                (7, 4, Stone::White),
                (7, 5, Stone::White),
                (7, 6, Stone::White),
            ],
        );
        let mut searcher = Searcher::new(Stone::Black);
        let result = searcher.search(&board, 2);
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
        assert!(result.score > -SCORE_INFINITY);
    }

    #[test]
    fn test_minimizing_root_picks_opponent_win() {
        let mut board = board_with(
            15,
            &[
                (7, 3, Stone::White),
                (7, 4, Stone::White),
                (7, 5, Stone::White),
                (7, 6, Stone::White),
                (9, 9, Stone::Black),
            ],
        );
        let mut searcher = fixed(Stone::Black);
        let (score, mov) =
            searcher.minimax(&mut board, 1, -SCORE_INFINITY, SCORE_INFINITY, false);
        assert_eq!(score, -SCORE_INFINITY);
        // Row-major order reaches (7, 2) before (7, 7)
        assert_eq!(mov, Some(Pos::new(7, 2)));
    }

    #[test]
    fn test_pruning_matches_plain_minimax() {
        let board = midgame();
        for depth in 1..=3 {
            let pruned = fixed(Stone::White).search(&board, depth);
            let plain = fixed(Stone::White).with_pruning(false).search(&board, depth);
            assert_eq!(pruned.score, plain.score, "depth {}", depth);
            assert_eq!(plain.cutoffs, 0);
            assert!(pruned.nodes <= plain.nodes);
        }
    }

    #[test]
    fn test_pruning_saves_nodes() {
        let board = midgame();
        let pruned = fixed(Stone::Black).search(&board, 3);
        let plain = fixed(Stone::Black).with_pruning(false).search(&board, 3);
        assert!(pruned.cutoffs > 0);
        assert!(pruned.nodes < plain.nodes);
    }

    #[test]
    fn test_node_budget_aborts_with_a_move() {
        let board = midgame();
        let limits = SearchLimits {
            max_nodes: Some(50),
            time_limit: None,
        };
        let mut searcher = fixed(Stone::White).with_limits(limits);
        let result = searcher.search(&board, 4);
        assert!(result.aborted);
        assert!(result.best_move.is_some());
        // One node per ply may overshoot while seeding each level's first child
        assert!(result.nodes <= 50 + 4, "nodes {}", result.nodes);
    }

    /// Puts `root` first at the root and pushes `last` to the back below it
    struct RootFirst {
        root: [Pos; 2],
        last: Pos,
        calls: usize,
    }

    impl MoveOrder for RootFirst {
        fn arrange(&mut self, moves: &mut [Pos]) {
            if self.calls == 0 {
                for (i, target) in self.root.iter().enumerate() {
                    if let Some(j) = moves.iter().position(|m| m == target) {
                        moves.swap(i, j);
                    }
                }
            } else if let Some(j) = moves.iter().position(|&m| m == self.last) {
                moves[j..].rotate_left(1);
            }
            self.calls += 1;
        }
    }

    #[test]
    fn test_budget_keeps_fully_searched_root_move() {
        // Black's four on row 7 is blocked on the left and threatens (7, 7).
        // White's open three on row 10 turns into an open four at (10, 8).
        let board = board_with(
            15,
            &[
                (7, 2, Stone::White),
                (7, 3, Stone::Black),
                (10, 5, Stone::White),
                (7, 4, Stone::Black),
                (10, 6, Stone::White),
                (7, 5, Stone::Black),
                (10, 7, Stone::White),
                (7, 6, Stone::Black),
            ],
        );
        let block = Pos::new(7, 7);
        let greedy = Pos::new(10, 8);

        // Exact value of the blocking move: Black replies, White evaluates
        let mut after_block = board.clone();
        assert!(after_block.place(7, 7, Stone::White));
        let replies = generate_candidate_moves(&after_block, CandidateWindow::Symmetric).len();
        let (block_value, _) = fixed(Stone::White).minimax(
            &mut after_block,
            1,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            false,
        );

        // Root, the blocking subtree, then two replies to the greedy move
        let limits = SearchLimits {
            max_nodes: Some(replies as u64 + 5),
            time_limit: None,
        };
        let order = RootFirst {
            root: [block, greedy],
            last: block,
            calls: 0,
        };
        let result = Searcher::with_order(Stone::White, order)
            .with_limits(limits)
            .search(&board, 2);

        assert!(result.aborted);
        assert_eq!(result.best_move, Some(block));
        assert_eq!(result.score, block_value);

        // Black gets no five after the chosen move
        let mut next = board.clone();
        assert!(next.place(7, 7, Stone::White));
        assert!(next.place(10, 4, Stone::Black));
        assert_eq!(next.winner(), None);
    }

    #[test]
    fn test_zero_time_limit_aborts() {
        let limits = SearchLimits {
            max_nodes: None,
            time_limit: Some(Duration::ZERO),
        };
        let result = fixed(Stone::Black).with_limits(limits).search(&midgame(), 4);
        assert!(result.aborted);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_unbounded_search_completes() {
        let result = fixed(Stone::White).search(&midgame(), 2);
        assert!(!result.aborted);
        assert_eq!(result.depth, 2);
    }

    #[test]
    fn test_seeded_order_is_reproducible() {
        let board = midgame();
        let a = Searcher::with_order(Stone::White, Shuffled::seeded(3)).search(&board, 2);
        let b = Searcher::with_order(Stone::White, Shuffled::seeded(3)).search(&board, 2);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_legacy_window_search() {
        let board = midgame();
        let result = fixed(Stone::White)
            .with_window(CandidateWindow::Legacy)
            .search(&board, 2);
        assert!(result.best_move.is_some());
    }
}
