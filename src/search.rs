//! Depth-limited negamax search with a positional heuristic.
//!
//! Every node of the search is one of three kinds:
//! - the side to move has legal moves: each child is searched one ply deeper
//! - the side to move must pass: the opponent moves next at the same depth
//! - nobody can move: the game is over and scored by piece count
//!
//! Leaves are scored with [`heuristic`], the square-weight sum plus the
//! mobility difference. Root moves that share the best score are chosen
//! uniformly at random, so the engine does not play the same line every game
//! once the evaluation saturates.

use log::trace;

use crate::board::{Board, Coord, OthelloError, Player};
use crate::constants::{SQUARE_WEIGHTS, WIN_SCORE};
use crate::position::{apply_move, legal_moves};

/// A root move and its negamax score from the mover's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub coord: Coord,
    pub score: i32,
}

/// Weighted piece balance from `player`'s point of view.
pub fn positional_score(board: &Board, player: Player) -> i32 {
    let sign = player.sign();
    board
        .cells()
        .iter()
        .zip(SQUARE_WEIGHTS.iter())
        .map(|(cell, w)| w * sign * cell.value())
        .sum()
}

/// Number of `player` moves minus number of opponent moves.
pub fn mobility(board: &Board, player: Player) -> i32 {
    legal_moves(board, player).len() as i32 - legal_moves(board, -player).len() as i32
}

/// Static evaluation of a leaf position for `player`.
///
/// Both mobility counts are taken on `board` itself.
pub fn heuristic(board: &Board, player: Player) -> i32 {
    positional_score(board, player) + mobility(board, player)
}

/// Score of a finished game for `player`: `WIN_SCORE`, `-WIN_SCORE` or `0`.
pub fn terminal_score(board: &Board, player: Player) -> i32 {
    match board.count(player).cmp(&board.count(-player)) {
        std::cmp::Ordering::Greater => WIN_SCORE,
        std::cmp::Ordering::Less => -WIN_SCORE,
        std::cmp::Ordering::Equal => 0,
    }
}

/// Negamax value of `board` with `to_move` to play and `depth` plies left.
pub fn negamax(board: &Board, to_move: Player, depth: u32) -> i32 {
    if depth == 0 {
        return heuristic(board, to_move);
    }

    let moves = legal_moves(board, to_move);
    if !moves.is_empty() {
        return moves
            .iter()
            .map(|&pt| -negamax(&apply_move(board, pt, to_move), -to_move, depth - 1))
            .max()
            .unwrap_or(-WIN_SCORE);
    }

    // Forced pass: the opponent moves, no ply is consumed.
    if !legal_moves(board, -to_move).is_empty() {
        return -negamax(board, -to_move, depth);
    }

    terminal_score(board, to_move)
}

/// Score every root move for `player`.
///
/// A root move is played, then the position is searched `depth` more plies
/// with the opponent to move. Depth 0 scores the resulting position directly.
pub fn score_moves(board: &Board, player: Player, moves: &[Coord], depth: u32) -> Vec<ScoredMove> {
    moves
        .iter()
        .map(|&coord| {
            let child = apply_move(board, coord, player);
            let score = -negamax(&child, -player, depth);
            trace!("{player} {coord}: {score}");
            ScoredMove { coord, score }
        })
        .collect()
}

/// Pick a uniformly random element of `items`.
pub fn random_element<'a, T>(items: &'a [T], rng: &mut fastrand::Rng) -> Result<&'a T, OthelloError> {
    if items.is_empty() {
        return Err(OthelloError::EmptySelection);
    }
    Ok(&items[rng.usize(..items.len())])
}

/// All moves sharing the highest score, in input order.
pub fn best_moves(scored: &[ScoredMove]) -> Vec<Coord> {
    let Some(best) = scored.iter().map(|m| m.score).max() else {
        return Vec::new();
    };
    scored
        .iter()
        .filter(|m| m.score == best)
        .map(|m| m.coord)
        .collect()
}

/// Choose a move for `player` among `moves` with a `depth`-ply search.
///
/// Ties for the best score are broken uniformly at random with `rng`.
///
/// # Errors
/// `OthelloError::EmptySelection` if `moves` is empty.
pub fn best_move(
    board: &Board,
    player: Player,
    moves: &[Coord],
    depth: u32,
    rng: &mut fastrand::Rng,
) -> Result<Coord, OthelloError> {
    let scored = score_moves(board, player, moves, depth);
    let candidates = best_moves(&scored);
    random_element(&candidates, rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn c(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_heuristic_start_is_zero() {
        let board = Board::starting();
        assert_eq!(positional_score(&board, Player::Black), 0);
        assert_eq!(mobility(&board, Player::Black), 0);
        assert_eq!(heuristic(&board, Player::Black), 0);
    }

    #[test]
    fn test_heuristic_antisymmetric() {
        let board = apply_move(&Board::starting(), c("d3"), Player::Black);
        assert_eq!(heuristic(&board, Player::Black), -heuristic(&board, Player::White));
    }

    #[test]
    fn test_corner_is_worth_more() {
        let corner = Board::empty().with(c("a1"), Cell::Black);
        let x_square = Board::empty().with(c("b2"), Cell::Black);
        assert_eq!(positional_score(&corner, Player::Black), 8);
        assert_eq!(positional_score(&x_square, Player::Black), -4);
        assert_eq!(positional_score(&corner, Player::White), -8);
    }

    #[test]
    fn test_terminal_score() {
        let board: Board = "
            X X X X X X X X
            X X X X X X X X
            X X X X X X X X
            X X X X X X X X
            O O O O O O O O
            O O O O O O O O
            O O O O O O O O
            O O O O O O O X
        "
        .parse()
        .unwrap();
        assert_eq!(terminal_score(&board, Player::Black), WIN_SCORE);
        assert_eq!(terminal_score(&board, Player::White), -WIN_SCORE);
        assert_eq!(negamax(&board, Player::White, 3), -WIN_SCORE);

        let tie = Board::empty();
        assert_eq!(terminal_score(&tie, Player::Black), 0);
    }

    #[test]
    fn test_depth_one_covers_reply() {
        // After d3 white can answer c3, e3 or c5. Heuristic for black:
        //   c3: black d3 d5 e4 (4) vs white c3 d4 e5 (4), moves 4 vs 5 -> -1
        //   e3: 0 + (5 - 5) -> 0
        //   c5: 0 + (5 - 4) -> 1
        // White picks c3, so d3 is worth -1 one ply deep.
        let board = Board::starting();
        let d3 = c("d3");
        assert_eq!(score_moves(&board, Player::Black, &[d3], 0)[0].score, 4);
        assert_eq!(score_moves(&board, Player::Black, &[d3], 1)[0].score, -1);

        // The opening is symmetric, every first move scores the same.
        let moves = legal_moves(&board, Player::Black);
        for sm in score_moves(&board, Player::Black, &moves, 1) {
            assert_eq!(sm.score, -1, "{}", sm.coord);
        }
    }

    #[test]
    fn test_forced_pass_keeps_depth() {
        // White has no move; Black can take a1 and win everything.
        let board: Board = "
            . O X X X X X X
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
        assert!(legal_moves(&board, Player::White).is_empty());
        assert_eq!(legal_moves(&board, Player::Black), vec![c("a1")]);
        // White to move must pass; Black then plays a1 and the game ends.
        assert_eq!(negamax(&board, Player::White, 2), -WIN_SCORE);
        assert_eq!(negamax(&board, Player::Black, 2), WIN_SCORE);
    }

    #[test]
    fn test_depth_zero_matches_heuristic() {
        let board = Board::starting();
        let moves = legal_moves(&board, Player::Black);
        for sm in score_moves(&board, Player::Black, &moves, 0) {
            let child = apply_move(&board, sm.coord, Player::Black);
            assert_eq!(sm.score, heuristic(&child, Player::Black));
        }
    }

    #[test]
    fn test_best_move_takes_corner() {
        let board: Board = "
            . O O X . . . .
            . X . . O . . .
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
        assert_eq!(moves, vec![c("a1"), c("f3")]);
        let mut rng = fastrand::Rng::with_seed(7);
        for depth in 0..3 {
            let mv = best_move(&board, Player::Black, &moves, depth, &mut rng).unwrap();
            assert_eq!(mv, c("a1"), "depth {depth}");
        }
    }

    #[test]
    fn test_best_move_empty() {
        let mut rng = fastrand::Rng::with_seed(1);
        let result = best_move(&Board::starting(), Player::Black, &[], 2, &mut rng);
        assert_eq!(result, Err(OthelloError::EmptySelection));
    }

    #[test]
    fn test_ties_are_randomised() {
        // The opening is symmetric, so all four moves score the same.
        let board = Board::starting();
        let moves = legal_moves(&board, Player::Black);
        let scored = score_moves(&board, Player::Black, &moves, 1);
        assert_eq!(best_moves(&scored).len(), 4);

        let mut rng = fastrand::Rng::with_seed(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            seen.insert(best_move(&board, Player::Black, &moves, 1, &mut rng).unwrap());
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_random_element() {
        let mut rng = fastrand::Rng::with_seed(3);
        let items = [1, 2, 3];
        for _ in 0..10 {
            assert!(items.contains(random_element(&items, &mut rng).unwrap()));
        }
        let empty: [u8; 0] = [];
        assert_eq!(random_element(&empty, &mut rng), Err(OthelloError::EmptySelection));
    }
}
