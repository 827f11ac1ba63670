//! Integration tests for othello-minimax
//!
//! These exercise the public API end to end: rules, search, the game driver
//! and the self-play sample stream.

use othello_minimax::board::{Board, Cell, Coord, OthelloError, Player};
use othello_minimax::constants::{CELLS, MAX_GAME_LEN, WIN_SCORE};
use othello_minimax::game::{Game, GameState, play_match};
use othello_minimax::position::{apply_move, flips, is_legal, legal_moves};
use othello_minimax::search::{best_move, heuristic, score_moves};
use othello_minimax::selfplay::SelfPlay;
use othello_minimax::strategy::{Matchup, MinimaxStrategy, RandomStrategy, Strategy};

// =============================================================================
// Helper functions
// =============================================================================

fn c(s: &str) -> Coord {
    s.parse().unwrap_or_else(|e| panic!("bad coord {s}: {e}"))
}

fn pieces(board: &Board) -> usize {
    board.count(Player::Black) + board.count(Player::White)
}

/// Collect every position reached in a few random games, with the side to move.
fn random_positions(seed: u64, games: usize) -> Vec<(Board, Player)> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut out = Vec::new();
    for _ in 0..games {
        let mut board = Board::starting();
        let mut player = Player::Black;
        loop {
            out.push((board, player));
            let moves = legal_moves(&board, player);
            if moves.is_empty() {
                if legal_moves(&board, -player).is_empty() {
                    break;
                }
                player = -player;
                continue;
            }
            let mv = moves[rng.usize(..moves.len())];
            board = apply_move(&board, mv, player);
            player = -player;
        }
    }
    out
}

// =============================================================================
// Board model
// =============================================================================

#[test]
fn test_starting_position() {
    let board = Board::starting();
    assert_eq!(pieces(&board), 4);
    assert_eq!(legal_moves(&board, Player::Black).len(), 4);
    assert_eq!(legal_moves(&board, Player::White).len(), 4);
}

#[test]
fn test_coord_index_inverse() {
    for i in 0..CELLS {
        assert_eq!(Coord::from_index(i).index(), i);
    }
    assert_eq!(Coord::new(8, 3), Err(OthelloError::OutOfRange { x: 8, y: 3 }));
    assert_eq!(Board::starting().cell_at(-1, 0), Err(OthelloError::OutOfRange { x: -1, y: 0 }));
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn test_legal_moves_agree_with_is_legal() {
    for (board, player) in random_positions(17, 5) {
        let moves = legal_moves(&board, player);
        for pt in Coord::all() {
            assert_eq!(
                moves.contains(&pt),
                is_legal(&board, pt, player),
                "{player} at {pt} on {board:?}"
            );
        }
    }
}

#[test]
fn test_move_is_not_repeatable_and_adds_one_piece() {
    for (board, player) in random_positions(23, 5) {
        for pt in legal_moves(&board, player) {
            let next = apply_move(&board, pt, player);
            assert!(!is_legal(&next, pt, player), "{pt} placeable twice");
            assert!(!is_legal(&next, pt, -player));
            assert_eq!(pieces(&next), pieces(&board) + 1);
            assert_eq!(next.get(pt), Cell::from(player));
            // Every flipped cell changed owner, nothing else did.
            let flipped = flips(&board, pt, player);
            assert!(!flipped.is_empty());
            for q in Coord::all() {
                if q == pt {
                    continue;
                }
                let changed = board.get(q) != next.get(q);
                assert_eq!(changed, flipped.contains(&q), "cell {q}");
            }
        }
    }
}

#[test]
fn test_edge_moves_never_wrap() {
    // White on h2-h4, black on a3-a5: a flat-index scan eastwards from
    // column g or h would continue into column a of the next row.
    let board: Board = "
        . . . . . . . .
        . . . . . . . O
        X . . . . . . O
        X . . . . . . O
        X . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    "
    .parse()
    .unwrap();
    for pt in ["g1", "g2", "g3", "g4", "h1", "h5"] {
        assert!(!is_legal(&board, c(pt), Player::Black), "black {pt}");
    }
    assert!(legal_moves(&board, Player::Black).is_empty());
    // Same for white scanning west from column b into column h.
    for pt in ["b3", "b4", "b5"] {
        assert!(!is_legal(&board, c(pt), Player::White), "white {pt}");
    }
    assert!(legal_moves(&board, Player::White).is_empty());
}

#[test]
fn test_opening_capture_north() {
    // Black plays e6: the white piece on e5 directly north is captured.
    let board = Board::starting();
    let e6 = c("e6");
    assert!(is_legal(&board, e6, Player::Black));

    let next = apply_move(&board, e6, Player::Black);
    assert_eq!(next.get(c("e5")), Cell::Black);
    assert_eq!(next.get(e6), Cell::Black);
    assert_eq!(next.count(Player::Black), 4);
    assert_eq!(next.count(Player::White), 1);
    assert_eq!(pieces(&next), pieces(&board) + 1);
    // The input board is unchanged.
    assert_eq!(board.get(c("e5")), Cell::White);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_depth_zero_maximises_immediate_heuristic() {
    for (board, player) in random_positions(31, 2).into_iter().step_by(7) {
        let moves = legal_moves(&board, player);
        if moves.is_empty() {
            continue;
        }
        let best = moves
            .iter()
            .map(|&m| heuristic(&apply_move(&board, m, player), player))
            .max()
            .unwrap();
        let mut rng = fastrand::Rng::with_seed(5);
        let chosen = best_move(&board, player, &moves, 0, &mut rng).unwrap();
        assert_eq!(heuristic(&apply_move(&board, chosen, player), player), best);
    }
}

#[test]
fn test_scores_stay_bounded() {
    let board = Board::starting();
    let moves = legal_moves(&board, Player::Black);
    for sm in score_moves(&board, Player::Black, &moves, 3) {
        assert!(sm.score.abs() <= WIN_SCORE);
    }
}

#[test]
fn test_search_finds_winning_corner() {
    // Black's only winning move is a1, which wipes out White.
    let board: Board = "
        . O O O O O O X
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    "
    .parse()
    .unwrap();
    let moves = legal_moves(&board, Player::Black);
    assert_eq!(moves, vec![c("a1")]);
    let scored = score_moves(&board, Player::Black, &moves, 2);
    assert_eq!(scored[0].score, WIN_SCORE);
}

#[test]
fn test_empty_selection_is_an_error() {
    let mut rng = fastrand::Rng::with_seed(1);
    assert_eq!(
        best_move(&Board::starting(), Player::White, &[], 1, &mut rng),
        Err(OthelloError::EmptySelection)
    );
}

// =============================================================================
// Game driver
// =============================================================================

#[test]
fn test_full_games_terminate() {
    let mut players = Matchup::new(MinimaxStrategy::new(1).with_seed(1), RandomStrategy::with_seed(2));
    for _ in 0..5 {
        let result = play_match(&mut players).unwrap();
        assert!(result.history.len() <= MAX_GAME_LEN);
        assert_eq!(pieces(&result.board), 4 + result.history.len());
        assert!(legal_moves(&result.board, Player::Black).is_empty());
        assert!(legal_moves(&result.board, Player::White).is_empty());
        assert_eq!(result.winner, result.board.winner());
    }
}

#[test]
fn test_history_replays_to_final_board() {
    let mut engine = MinimaxStrategy::new(1).with_seed(8);
    let result = play_match(&mut engine).unwrap();
    let mut board = Board::starting();
    for turn in &result.history {
        assert_eq!(turn.board, board);
        assert!(is_legal(&board, turn.coord, turn.player));
        board = apply_move(&board, turn.coord, turn.player);
    }
    assert_eq!(board, result.board);
}

#[test]
fn test_strategy_sees_only_non_empty_sets() {
    struct Checker(RandomStrategy);

    impl Strategy for Checker {
        fn choose_move(&mut self, board: &Board, player: Player, moves: &[Coord]) -> anyhow::Result<Coord> {
            assert!(!moves.is_empty());
            assert_eq!(moves, legal_moves(board, player).as_slice());
            self.0.choose_move(board, player, moves)
        }
    }

    let mut game = Game::new();
    let mut checker = Checker(RandomStrategy::with_seed(99));
    while game.advance(&mut checker).unwrap() != GameState::Terminal {}
    assert!(game.result().is_some());
}

// =============================================================================
// Self-play
// =============================================================================

#[test]
fn test_selfplay_samples() {
    let samples: Vec<_> = SelfPlay::new(RandomStrategy::with_seed(4))
        .take(100)
        .collect::<anyhow::Result<_>>()
        .unwrap();
    assert_eq!(samples.len(), 100);

    // The first sample is the opening seen by Black.
    let first = &samples[0];
    assert_eq!(first.board, Board::starting().relative_to(Player::Black));
    let labelled: Vec<usize> = (0..CELLS).filter(|&i| first.labels[i] != 0).collect();
    let opening: Vec<usize> = legal_moves(&Board::starting(), Player::Black)
        .iter()
        .map(|m| m.index())
        .collect();
    assert_eq!(labelled, opening);
}
