//! Game state management for the Gomoku GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::{AIEngine, Board, EngineConfig, MoveResult, Pos, Stone};

/// Engine depth offered by default in the GUI
pub const DEFAULT_UI_DEPTH: u8 = 3;
/// Deepest search selectable in the GUI
pub const MAX_UI_DEPTH: u8 = 6;
/// Wall-clock budget per engine move
const ENGINE_TIME_LIMIT_MS: u64 = 5_000;

/// Who places the first (black) stone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstMove {
    #[default]
    Human,
    Engine,
}

impl FirstMove {
    /// The first mover plays Black
    pub fn human_color(self) -> Stone {
        match self {
            FirstMove::Human => Stone::Black,
            FirstMove::Engine => Stone::White,
        }
    }
}

/// Engine computation state
pub enum EngineState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// How the game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Win { winner: Stone, line: Vec<Pos> },
    Draw,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub engine_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            engine_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }
}

/// Column letter followed by 1-based row, e.g. `H8` for the centre of 15x15
pub fn pos_label(pos: Pos) -> String {
    format!("{}{}", (b'A' + pos.col) as char, pos.row as u32 + 1)
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub first_move: FirstMove,
    pub current_turn: Stone,
    pub outcome: Option<GameOutcome>,
    pub move_history: Vec<(Pos, Stone)>,
    pub last_engine_result: Option<MoveResult>,
    pub engine_state: EngineState,
    pub move_timer: MoveTimer,
    pub message: Option<String>,
    engine_depth: u8,
}

impl GameState {
    pub fn new(first_move: FirstMove) -> Self {
        Self {
            board: Board::new(),
            first_move,
            current_turn: Stone::Black,
            outcome: None,
            move_history: Vec::new(),
            last_engine_result: None,
            engine_state: EngineState::Idle,
            move_timer: MoveTimer::default(),
            message: None,
            engine_depth: DEFAULT_UI_DEPTH,
        }
    }

    /// Start over with the same first mover and depth
    pub fn reset(&mut self) {
        let depth = self.engine_depth;
        *self = Self::new(self.first_move);
        self.engine_depth = depth;
        info!(first_move = ?self.first_move, depth, "new game");
    }

    pub fn human_color(&self) -> Stone {
        self.first_move.human_color()
    }

    pub fn engine_depth(&self) -> u8 {
        self.engine_depth
    }

    /// Depth for the next engine move, clamped to `1..=MAX_UI_DEPTH`
    pub fn set_engine_depth(&mut self, depth: u8) {
        self.engine_depth = depth.clamp(1, MAX_UI_DEPTH);
    }

    pub fn is_human_turn(&self) -> bool {
        self.outcome.is_none() && self.current_turn == self.human_color()
    }

    pub fn is_engine_turn(&self) -> bool {
        self.outcome.is_none() && self.current_turn != self.human_color()
    }

    pub fn is_engine_thinking(&self) -> bool {
        matches!(self.engine_state, EngineState::Thinking { .. })
    }

    /// Winning stones, if the game was won
    pub fn winning_line(&self) -> Option<&[Pos]> {
        match &self.outcome {
            Some(GameOutcome::Win { line, .. }) => Some(line),
            _ => None,
        }
    }

    /// Attempt to place a human stone at the given position
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.outcome.is_some() {
            return Err("Game is over".to_string());
        }
        if self.is_engine_thinking() {
            return Err("Engine is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.board
            .try_place(i32::from(pos.row), i32::from(pos.col), self.current_turn)
            .map_err(|e| e.to_string())?;
        self.record_move(pos);
        Ok(())
    }

    /// Book-keeping after a stone of `current_turn` landed on `pos`
    fn record_move(&mut self, pos: Pos) {
        let color = self.current_turn;
        self.move_history.push((pos, color));
        self.move_timer.stop();
        self.message = None;

        if let Some(winner) = self.board.winner() {
            let line = self.board.winning_line().unwrap_or_default();
            info!(?winner, moves = self.move_history.len(), "game won");
            self.outcome = Some(GameOutcome::Win { winner, line });
            return;
        }
        if self.board.is_full() {
            info!(moves = self.move_history.len(), "game drawn");
            self.outcome = Some(GameOutcome::Draw);
            return;
        }

        self.current_turn = color.opponent();
        self.move_timer.start();
    }

    /// Spawn the engine on a worker thread with its own copy of the board
    pub fn start_engine_thinking(&mut self) {
        if !self.is_engine_turn() || self.is_engine_thinking() {
            return;
        }

        let board = self.board.clone();
        let color = self.current_turn;
        let config = EngineConfig::default()
            .with_depth(self.engine_depth)
            .with_time_limit(ENGINE_TIME_LIMIT_MS);

        let (tx, rx) = channel();
        thread::spawn(move || {
            let mut engine = AIEngine::with_config(color, config);
            let result = engine.choose_move_with_stats(&board);
            let _ = tx.send(result);
        });

        self.engine_state = EngineState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Apply the engine's move once the worker has answered
    pub fn check_engine_result(&mut self) {
        let received = match &self.engine_state {
            EngineState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    warn!("engine worker exited without a move");
                    self.engine_state = EngineState::Idle;
                    self.message = Some("Engine error".to_string());
                    return;
                }
            },
            EngineState::Idle => None,
        };

        let Some((result, elapsed)) = received else {
            return;
        };
        self.engine_state = EngineState::Idle;
        self.move_timer.engine_time = Some(elapsed);
        self.apply_engine_result(result);
    }

    fn apply_engine_result(&mut self, result: MoveResult) {
        let best_move = result.best_move;
        self.last_engine_result = Some(result);

        match best_move {
            Some(pos) => {
                let (row, col) = (i32::from(pos.row), i32::from(pos.col));
                let placed = self.board.place(row, col, self.current_turn);
                if placed {
                    self.record_move(pos);
                } else {
                    warn!(?pos, "engine proposed an illegal move");
                    self.message = Some(format!("Engine move {} rejected", pos_label(pos)));
                }
            }
            None => self.message = Some("Engine could not find a move".to_string()),
        }
    }

    pub fn engine_thinking_elapsed(&self) -> Option<Duration> {
        match &self.engine_state {
            EngineState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            EngineState::Idle => None,
        }
    }

    /// Take back the last human move together with the engine reply.
    ///
    /// The board is rebuilt by replaying the remaining history.
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_engine_thinking() {
            return;
        }

        // Rewind to the most recent position where the human is to move
        let human = self.human_color();
        let mut keep = self.move_history.len();
        while keep > 0 {
            keep -= 1;
            if self.move_history[keep].1 == human {
                break;
            }
        }
        if self.move_history[keep].1 != human {
            // Only engine moves so far; nothing of the human's to take back
            return;
        }

        let moves: Vec<_> = self.move_history.drain(..keep).collect();
        self.move_history.clear();
        self.board = Board::with_size(self.board.size()).unwrap_or_default();
        self.current_turn = Stone::Black;
        self.outcome = None;
        self.message = None;

        for (pos, color) in moves {
            self.board.place(i32::from(pos.row), i32::from(pos.col), color);
            self.move_history.push((pos, color));
            self.current_turn = color.opponent();
        }

        self.move_timer.start();
        info!(moves = self.move_history.len(), "move undone");
    }
}
