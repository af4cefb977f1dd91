//! Heuristic evaluation function for Gomoku board positions
//!
//! This module provides the static evaluation used at the leaves of the
//! minimax search. A position is scored by:
//! - Win/loss detection (infinity sentinels)
//! - Pattern scoring of every line on the board (fours, threes, twos)

use crate::board::{Board, Pos, Stone, DIRECTIONS};

use super::patterns::{classify, Pattern};

/// Sentinel for a decided position. Symmetric under negation, unlike `i32::MIN`.
pub const SCORE_INFINITY: i32 = i32::MAX;

/// Evaluate the board from the perspective of `color`.
///
/// Returns a score where:
/// - Positive values indicate advantage for `color`
/// - Negative values indicate advantage for the opponent
/// - `SCORE_INFINITY` means `color` has five in a row
/// - `-SCORE_INFINITY` means the opponent has five in a row
///
/// A five through the last move decides the position first. Any other five
/// found during the scan also short-circuits the whole evaluation; otherwise
/// every line on the board contributes.
#[must_use]
pub fn evaluate(board: &Board, color: Stone) -> i32 {
    if let Some(winner) = board.winner() {
        return decided(winner, color);
    }

    let mut score = 0i32;
    for stone in [Stone::Black, Stone::White] {
        for pos in board.stones(stone) {
            for dir in DIRECTIONS {
                let Some(pattern) = scan_line(board, pos, dir, stone) else {
                    continue;
                };
                if pattern == Pattern::Five {
                    return decided(stone, color);
                }
                if stone == color {
                    score += pattern.own_score();
                } else {
                    score -= pattern.opponent_score();
                }
            }
        }
    }
    score
}

#[inline]
fn decided(winner: Stone, color: Stone) -> i32 {
    if winner == color {
        SCORE_INFINITY
    } else {
        -SCORE_INFINITY
    }
}

/// Classify the line that starts at `pos` along `dir`.
///
/// Returns `None` when `pos` is not the first stone of its line in this
/// direction, so each line is scored exactly once.
fn scan_line(board: &Board, pos: Pos, dir: (i32, i32), stone: Stone) -> Option<Pattern> {
    let (before_r, before_c) = pos.offset(dir, -1);
    if board.is_stone_at(before_r, before_c, stone) {
        return None;
    }

    let length = board.line_length(pos, dir, stone);
    let (after_r, after_c) = pos.offset(dir, i32::from(length));
    let open_ends = u8::from(board.is_empty_at(before_r, before_c))
        + u8::from(board.is_empty_at(after_r, after_c));

    Some(classify(length, open_ends))
}
