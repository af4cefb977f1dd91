//! Candidate move generation
//!
//! Only empty cells near existing stones are worth searching. Each stone
//! contributes the empty cells in a small window around it; overlapping
//! windows are merged so every candidate appears once.

use std::ops::Range;

use crate::board::{Board, Pos};

/// Radius of the neighbourhood around each stone
const RADIUS: usize = 2;

/// Shape of the neighbourhood window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateWindow {
    /// Full 5x5 window centred on each stone
    #[default]
    Symmetric,
    /// `max(0, i-2) .. min(size, i+2)` with an exclusive upper bound: one cell
    /// short on the high side of each axis. Searches fewer moves per node.
    Legacy,
}

impl CandidateWindow {
    fn span(self, i: usize, size: usize) -> Range<usize> {
        let low = i.saturating_sub(RADIUS);
        let high = match self {
            CandidateWindow::Symmetric => i + RADIUS + 1,
            CandidateWindow::Legacy => i + RADIUS,
        };
        low..high.min(size)
    }
}

/// Generate candidate moves in row-major order.
///
/// - Empty board: the single centre cell `(size/2, size/2)`.
/// - Otherwise: every empty cell inside some stone's window. Each window
///   reaches at least the adjacent cells, so this is empty only on a full board.
#[must_use]
pub fn generate_candidate_moves(board: &Board, window: CandidateWindow) -> Vec<Pos> {
    let size = board.size();
    if board.is_board_empty() {
        let center = (size / 2) as u8;
        return vec![Pos::new(center, center)];
    }

    let mut near = vec![false; size * size];
    for stone_pos in board.occupied() {
        for row in window.span(stone_pos.row as usize, size) {
            for col in window.span(stone_pos.col as usize, size) {
                near[row * size + col] = true;
            }
        }
    }

    near.iter()
        .enumerate()
        .filter(|&(_, &flagged)| flagged)
        .map(|(idx, _)| Pos::from_index(idx, size))
        .filter(|&pos| board.get(pos).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    #[test]
    fn test_empty_board_yields_center() {
        let board = Board::new();
        assert_eq!(
            generate_candidate_moves(&board, CandidateWindow::Symmetric),
            vec![Pos::new(7, 7)]
        );
        assert_eq!(
            generate_candidate_moves(&board, CandidateWindow::Legacy),
            vec![Pos::new(7, 7)]
        );

        let small = Board::with_size(8).expect("valid size");
        assert_eq!(
            generate_candidate_moves(&small, CandidateWindow::Symmetric),
            vec![Pos::new(4, 4)]
        );
    }

    #[test]
    fn test_symmetric_window_radius() {
        let mut board = Board::new();
        board.place(7, 7, Stone::Black);

        let moves = generate_candidate_moves(&board, CandidateWindow::Symmetric);
        assert_eq!(moves.len(), 24);
        assert!(moves.contains(&Pos::new(9, 9)));
        assert!(moves.contains(&Pos::new(5, 5)));
        assert!(!moves.contains(&Pos::new(7, 7)));
        assert!(!moves.contains(&Pos::new(7, 10)));
    }

    #[test]
    fn test_legacy_window_is_short_on_high_side() {
        let mut board = Board::new();
        board.place(7, 7, Stone::Black);

        let moves = generate_candidate_moves(&board, CandidateWindow::Legacy);
        // rows and cols 5..9 exclusive: 4x4 minus the stone itself
        assert_eq!(moves.len(), 15);
        assert!(moves.contains(&Pos::new(5, 5)));
        assert!(moves.contains(&Pos::new(8, 8)));
        assert!(!moves.contains(&Pos::new(9, 9)));
    }

    #[test]
    fn test_window_clamped_at_corner() {
        let mut board = Board::new();
        board.place(0, 0, Stone::White);

        let moves = generate_candidate_moves(&board, CandidateWindow::Symmetric);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|p| p.row <= 2 && p.col <= 2));
    }

    #[test]
    fn test_overlapping_windows_deduplicated() {
        let mut board = Board::new();
        board.place(7, 7, Stone::Black);
        board.place(7, 8, Stone::White);

        let moves = generate_candidate_moves(&board, CandidateWindow::Symmetric);
        let mut sorted = moves.clone();
        sorted.dedup();
        assert_eq!(moves, sorted);
        // 5 rows x 6 cols minus two stones
        assert_eq!(moves.len(), 28);
    }

    #[test]
    fn test_row_major_order() {
        let mut board = Board::new();
        board.place(3, 3, Stone::Black);

        let moves = generate_candidate_moves(&board, CandidateWindow::Symmetric);
        assert!(moves.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(moves.first(), Some(&Pos::new(1, 1)));
    }

    #[test]
    fn test_full_board_has_no_candidates() {
        let mut board = Board::with_size(2).expect("valid size");
        board.place(0, 0, Stone::Black);
        board.place(0, 1, Stone::White);
        board.place(1, 0, Stone::White);
        board.place(1, 1, Stone::Black);
        assert!(generate_candidate_moves(&board, CandidateWindow::Symmetric).is_empty());
    }
}
