//! Board structure with last-move tracking and win detection

use super::bitboard::Bitboard;
use super::{Pos, Stone, DEFAULT_BOARD_SIZE, DIRECTIONS, MAX_BOARD_SIZE, WIN_LENGTH};
use crate::error::{GomokuError, GomokuResult};

/// Game board of a fixed size chosen at construction.
///
/// Stones are only ever added through the public API. The search uses the
/// crate-private [`Board::apply`]/[`Board::undo`] pair, which always restores
/// the exact previous state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Black stones bitboard
    black: Bitboard,
    /// White stones bitboard
    white: Bitboard,
    /// Most recent placement, used to scope win detection
    last_move: Option<Pos>,
}

impl Board {
    /// Create an empty board of the default size (15x15)
    pub fn new() -> Self {
        Self::empty(DEFAULT_BOARD_SIZE)
    }

    /// Create an empty board with the given dimension.
    ///
    /// # Errors
    ///
    /// Returns [`GomokuError::InvalidBoardSize`] when `size` is zero or larger
    /// than [`MAX_BOARD_SIZE`].
    pub fn with_size(size: usize) -> GomokuResult<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(GomokuError::InvalidBoardSize {
                size,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(Self::empty(size))
    }

    fn empty(size: usize) -> Self {
        let cells = size * size;
        Self {
            size,
            black: Bitboard::new(cells),
            white: Bitboard::new(cells),
            last_move: None,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    /// Pure range check on signed coordinates
    #[inline]
    pub fn is_valid_coordinate(&self, row: i32, col: i32) -> bool {
        let size = self.size as i32;
        row >= 0 && row < size && col >= 0 && col < size
    }

    #[inline]
    fn contains(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    /// Get the stone at a position, `None` for an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the board. Callers must guard with
    /// [`Board::is_valid_coordinate`].
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Stone> {
        assert!(
            self.contains(pos),
            "position ({}, {}) outside {}x{} board",
            pos.row,
            pos.col,
            self.size,
            self.size
        );
        let idx = pos.to_index(self.size);
        if self.black.get(idx) {
            Some(Stone::Black)
        } else if self.white.get(idx) {
            Some(Stone::White)
        } else {
            None
        }
    }

    /// Signed-coordinate lookup. Off-board cells read as `None`.
    #[inline]
    fn stone_at(&self, row: i32, col: i32) -> Option<Stone> {
        if self.is_valid_coordinate(row, col) {
            self.get(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// True when `(row, col)` is on the board and holds `stone`
    #[inline]
    pub fn is_stone_at(&self, row: i32, col: i32, stone: Stone) -> bool {
        self.stone_at(row, col) == Some(stone)
    }

    /// True when `(row, col)` is on the board and empty
    #[inline]
    pub fn is_empty_at(&self, row: i32, col: i32) -> bool {
        self.is_valid_coordinate(row, col) && self.stone_at(row, col).is_none()
    }

    /// Place a stone. Returns `false` without touching the board when the
    /// coordinate is off the board or the cell is occupied.
    pub fn place(&mut self, row: i32, col: i32, stone: Stone) -> bool {
        self.try_place(row, col, stone).is_ok()
    }

    /// Place a stone, reporting why a placement was rejected.
    ///
    /// # Errors
    ///
    /// [`GomokuError::OutOfBounds`] or [`GomokuError::Occupied`]; the board is
    /// unchanged in both cases.
    pub fn try_place(&mut self, row: i32, col: i32, stone: Stone) -> GomokuResult<Pos> {
        if !self.is_valid_coordinate(row, col) {
            return Err(GomokuError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        let pos = Pos::new(row as u8, col as u8);
        if self.get(pos).is_some() {
            return Err(GomokuError::Occupied { row, col });
        }
        self.apply(pos, stone);
        Ok(pos)
    }

    /// Unchecked placement for search. Returns the previous last move so the
    /// caller can hand it back to [`Board::undo`].
    #[inline]
    pub(crate) fn apply(&mut self, pos: Pos, stone: Stone) -> Option<Pos> {
        debug_assert!(self.contains(pos) && self.get(pos).is_none());
        let idx = pos.to_index(self.size);
        match stone {
            Stone::Black => self.black.set(idx),
            Stone::White => self.white.set(idx),
        }
        self.last_move.replace(pos)
    }

    /// Revert an [`Board::apply`]
    #[inline]
    pub(crate) fn undo(&mut self, pos: Pos, previous_last_move: Option<Pos>) {
        let idx = pos.to_index(self.size);
        self.black.clear(idx);
        self.white.clear(idx);
        self.last_move = previous_last_move;
    }

    /// Count consecutive `stone` cells starting one step beyond `(row, col)`
    /// along `(row_step, col_step)`.
    ///
    /// Stops at the first off-board or non-matching cell and never looks more
    /// than four cells out, so the result is at most 4.
    pub fn count_in_direction(
        &self,
        row_step: i32,
        col_step: i32,
        row: i32,
        col: i32,
        stone: Stone,
    ) -> u8 {
        let mut count = 0;
        for i in 1..i32::from(WIN_LENGTH) {
            if !self.is_stone_at(row + i * row_step, col + i * col_step, stone) {
                break;
            }
            count += 1;
        }
        count
    }

    /// Length of the `stone` line through `pos` along one axis, counting `pos`
    /// itself. Capped at 9 by the bounded scan in each direction.
    #[inline]
    pub fn line_length(&self, pos: Pos, (dr, dc): (i32, i32), stone: Stone) -> u8 {
        let (row, col) = (i32::from(pos.row), i32::from(pos.col));
        1 + self.count_in_direction(dr, dc, row, col, stone)
            + self.count_in_direction(-dr, -dc, row, col, stone)
    }

    /// Winner of the game, checking only lines through the last move
    pub fn winner(&self) -> Option<Stone> {
        let pos = self.last_move?;
        let stone = self.get(pos)?;
        DIRECTIONS
            .iter()
            .any(|&dir| self.line_length(pos, dir, stone) >= WIN_LENGTH)
            .then_some(stone)
    }

    /// Stones of the winning line through the last move, in line order
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        let pos = self.last_move?;
        let stone = self.get(pos)?;
        let (dr, dc) = DIRECTIONS
            .into_iter()
            .find(|&dir| self.line_length(pos, dir, stone) >= WIN_LENGTH)?;

        let (row, col) = (i32::from(pos.row), i32::from(pos.col));
        let back = i32::from(self.count_in_direction(-dr, -dc, row, col, stone));
        let forward = i32::from(self.count_in_direction(dr, dc, row, col, stone));
        let line = (-back..=forward)
            .map(|i| {
                let (r, c) = pos.offset((dr, dc), i);
                Pos::new(r as u8, c as u8)
            })
            .collect();
        Some(line)
    }

    /// Game over: someone has five, or there is no empty cell left
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.black.len()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// Positions of one color, row-major
    pub fn stones(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        let bits = match stone {
            Stone::Black => &self.black,
            Stone::White => &self.white,
        };
        let size = self.size;
        bits.iter_ones().map(move |idx| Pos::from_index(idx, size))
    }

    /// Every occupied position: all black stones, then all white stones
    pub fn occupied(&self) -> impl Iterator<Item = Pos> + '_ {
        self.stones(Stone::Black).chain(self.stones(Stone::White))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
