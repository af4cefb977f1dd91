//! Integration tests: board invariants over random positions and engine
//! behaviour on fixed scenarios.

use gomoku::board::DIRECTIONS;
use gomoku::eval::{evaluate, SCORE_INFINITY};
use gomoku::search::{GenerationOrder, Searcher};
use gomoku::{AIEngine, Board, EngineConfig, Pos, Stone};
use proptest::prelude::*;

/// Play `moves` alternately from Black, skipping illegal ones and stopping
/// once the game is over.
fn play(size: usize, moves: &[(i32, i32)]) -> Board {
    let mut board = Board::with_size(size).expect("valid size");
    let mut turn = Stone::Black;
    for &(row, col) in moves {
        if board.is_terminal() {
            break;
        }
        if board.place(row, col, turn) {
            turn = turn.opponent();
        }
    }
    board
}

fn side_to_move(board: &Board) -> Stone {
    if board.stone_count() % 2 == 0 {
        Stone::Black
    } else {
        Stone::White
    }
}

/// Unbounded run length through `pos`, counted cell by cell
fn run_through(board: &Board, pos: Pos, (dr, dc): (i32, i32), stone: Stone) -> usize {
    let walk = |sign: i32| {
        (1..)
            .take_while(|&i| {
                board.is_stone_at(
                    i32::from(pos.row) + sign * i * dr,
                    i32::from(pos.col) + sign * i * dc,
                    stone,
                )
            })
            .count()
    };
    1 + walk(1) + walk(-1)
}

fn position() -> impl Strategy<Value = Board> {
    (5usize..=9).prop_flat_map(|size| {
        let coord = 0..size as i32;
        prop::collection::vec((coord.clone(), coord), 0..40)
            .prop_map(move |moves| play(size, &moves))
    })
}

fn small_position() -> impl Strategy<Value = Board> {
    prop::collection::vec((0i32..6, 0i32..6), 1..8).prop_map(|moves| play(6, &moves))
}

proptest! {
    #[test]
    fn count_in_direction_never_exceeds_four(board in position()) {
        let size = board.size() as i32;
        for row in 0..size {
            for col in 0..size {
                for (dr, dc) in DIRECTIONS {
                    for stone in [Stone::Black, Stone::White] {
                        prop_assert!(board.count_in_direction(dr, dc, row, col, stone) <= 4);
                        prop_assert!(board.count_in_direction(-dr, -dc, row, col, stone) <= 4);
                    }
                }
            }
        }
    }

    #[test]
    fn rejected_placement_leaves_board_unchanged(
        board in position(),
        row in -3i32..12,
        col in -3i32..12,
    ) {
        let mut copy = board.clone();
        let legal = copy.place(row, col, Stone::White);
        if !legal {
            prop_assert_eq!(&copy, &board);
            prop_assert!(copy.try_place(row, col, Stone::Black).is_err());
            prop_assert_eq!(&copy, &board);
        } else {
            prop_assert_eq!(copy.stone_count(), board.stone_count() + 1);
            prop_assert_eq!(copy.last_move(), Some(Pos::new(row as u8, col as u8)));
        }
    }

    #[test]
    fn winner_requires_five_through_last_move(board in position()) {
        let expected = board.last_move().and_then(|pos| {
            let stone = board.get(pos)?;
            DIRECTIONS
                .iter()
                .any(|&dir| run_through(&board, pos, dir, stone) >= 5)
                .then_some(stone)
        });
        prop_assert_eq!(board.winner(), expected);
        prop_assert_eq!(board.winning_line().is_some(), expected.is_some());
    }

    #[test]
    fn evaluation_infinite_only_for_a_winner(board in position()) {
        let black = evaluate(&board, Stone::Black);
        let white = evaluate(&board, Stone::White);
        match board.winner() {
            Some(Stone::Black) => {
                prop_assert_eq!(black, SCORE_INFINITY);
                prop_assert_eq!(white, -SCORE_INFINITY);
            }
            Some(Stone::White) => {
                prop_assert_eq!(black, -SCORE_INFINITY);
                prop_assert_eq!(white, SCORE_INFINITY);
            }
            None => {
                // Play stops at the first five, so there is none elsewhere
                prop_assert!(black.abs() != SCORE_INFINITY);
                prop_assert!(white.abs() != SCORE_INFINITY);
            }
        }
    }

    #[test]
    fn search_leaves_board_untouched(board in small_position()) {
        let before = board.clone();
        let mut searcher = Searcher::with_order(side_to_move(&board), GenerationOrder);
        let _ = searcher.search(&board, 2);
        prop_assert_eq!(board, before);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn alpha_beta_matches_plain_minimax(board in small_position()) {
        let color = side_to_move(&board);
        let mut pruned = Searcher::with_order(color, GenerationOrder);
        let mut plain = Searcher::with_order(color, GenerationOrder).with_pruning(false);

        let a = pruned.search(&board, 2);
        let b = plain.search(&board, 2);
        prop_assert_eq!(a.score, b.score);
        prop_assert!(a.nodes <= b.nodes);
    }
}

fn quick_engine(color: Stone, depth: u8) -> AIEngine<GenerationOrder> {
    AIEngine::with_order(color, EngineConfig::default().with_depth(depth), GenerationOrder)
}

#[test]
fn empty_board_candidate_is_center() {
    let mut engine = quick_engine(Stone::Black, 2);
    assert_eq!(
        engine.generate_candidate_moves(&Board::new()),
        vec![Pos::new(7, 7)]
    );
}

#[test]
fn open_four_scores_at_least_four_bonus() {
    let mut board = Board::new();
    for c in 5..9 {
        board.place(7, c, Stone::White);
    }
    board.place(0, 0, Stone::Black);
    assert!(evaluate(&board, Stone::White) >= 100_000);
}

#[test]
fn depth_zero_returns_static_evaluation() {
    let mut board = Board::new();
    board.place(7, 7, Stone::Black);
    board.place(6, 6, Stone::White);
    board.place(7, 8, Stone::Black);

    let mut engine = quick_engine(Stone::White, 2);
    let (score, mov) = engine.search(&board, 0, -SCORE_INFINITY, SCORE_INFINITY, true);
    assert_eq!(score, evaluate(&board, Stone::White));
    assert_eq!(mov, None);
}

#[test]
fn fifth_stone_ends_the_game() {
    let mut board = Board::new();
    for c in 3..7 {
        assert!(board.place(4, c, Stone::White));
        assert!(!board.is_terminal());
    }
    assert!(board.place(4, 7, Stone::White));
    assert!(board.is_terminal());
    assert_eq!(board.winner(), Some(Stone::White));

    let mut engine = quick_engine(Stone::Black, 2);
    assert_eq!(engine.choose_move(&board), None);
}

#[test]
fn engine_completes_open_four() {
    let mut board = Board::new();
    for c in 5..9 {
        board.place(7, c, Stone::Black);
    }
    board.place(0, 0, Stone::White);
    board.place(14, 14, Stone::White);

    let mut engine = quick_engine(Stone::Black, 2);
    let mov = engine.choose_move(&board).expect("a move");
    assert!(mov == Pos::new(7, 4) || mov == Pos::new(7, 9), "got {mov:?}");
}

#[test]
fn engine_blocks_closed_four() {
    let mut board = Board::new();
    // White four on column 3, blocked from above by Black
    board.place(5, 3, Stone::Black);
    for r in 6..10 {
        board.place(r, 3, Stone::White);
    }
    board.place(12, 12, Stone::Black);

    let mut engine = quick_engine(Stone::Black, 2);
    assert_eq!(engine.choose_move(&board), Some(Pos::new(10, 3)));
}

#[test]
fn node_budget_stops_search_with_a_move() {
    let mut board = Board::new();
    board.place(7, 7, Stone::Black);
    board.place(8, 8, Stone::White);
    board.place(6, 7, Stone::Black);

    let config = EngineConfig::default().with_depth(4).with_node_limit(200);
    let mut engine = AIEngine::with_order(Stone::White, config, GenerationOrder);
    let result = engine.choose_move_with_stats(&board);
    assert!(result.aborted);
    assert!(result.best_move.is_some());
    // One node per level can still be entered after the limit trips
    assert!(result.nodes <= 200 + 4);
}
