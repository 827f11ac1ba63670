//! Othello rules: move legality and move execution.
//!
//! A placement is legal when the target cell is empty and at least one of the
//! eight rays leaving it holds a *bracketed run*: one or more opponent pieces
//! followed directly by a piece of the mover. Playing the move flips every
//! bracketed run.
//!
//! Rays are walked with [`Coord::step`], which checks the row and column bounds
//! on every step. A flat index offset would wrap from column 7 to column 0 of
//! the next row, so the scan never works on raw indices.

use crate::board::{Board, Cell, Coord, Player};
use crate::constants::{CELLS, DIRECTIONS};

/// Length of the bracketed run leaving `from` in direction `dir`, if any.
///
/// Returns `None` when the ray hits the edge or an empty cell before a piece of
/// `player`, or when the run of opponent pieces is empty.
fn bracketed_run(board: &Board, from: Coord, dir: (isize, isize), player: Player) -> Option<usize> {
    let own = Cell::from(player);
    let opponent = -own;
    let mut len = 0;
    let mut pt = from.step(dir)?;

    while board.get(pt) == opponent {
        len += 1;
        pt = pt.step(dir)?;
    }

    if len > 0 && board.get(pt) == own {
        Some(len)
    } else {
        None
    }
}

/// Check whether `player` may place a piece at `coord`.
pub fn is_legal(board: &Board, coord: Coord, player: Player) -> bool {
    if !board.get(coord).is_empty() {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&dir| bracketed_run(board, coord, dir, player).is_some())
}

/// All cells where `player` may move, in index order.
///
/// An empty result means `player` has to pass.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Coord> {
    let mut moves = Vec::with_capacity(CELLS / 4);
    for pt in Coord::all() {
        if is_legal(board, pt, player) {
            moves.push(pt);
        }
    }
    moves
}

/// Whether `player` has at least one legal move.
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    Coord::all().any(|pt| is_legal(board, pt, player))
}

/// Opponent pieces that a placement at `coord` would flip.
///
/// Does not check that `coord` is empty.
pub fn flips(board: &Board, coord: Coord, player: Player) -> Vec<Coord> {
    let mut out = Vec::new();
    for &dir in &DIRECTIONS {
        if let Some(len) = bracketed_run(board, coord, dir, player) {
            let mut pt = coord;
            for _ in 0..len {
                // The run was just walked, every step is on the board.
                match pt.step(dir) {
                    Some(next) => pt = next,
                    None => break,
                }
                out.push(pt);
            }
        }
    }
    out
}

/// Play `player` at `coord` and flip every captured piece.
///
/// The move must be legal (see [`is_legal`]); this is not re-checked, and an
/// illegal move yields a board that does not follow the rules.
#[must_use]
pub fn apply_move(board: &Board, coord: Coord, player: Player) -> Board {
    let own = Cell::from(player);
    let mut next = board.with(coord, own);
    for pt in flips(board, coord, player) {
        next = next.with(pt, own);
    }
    next
}

/// Piece counts `(black, white)`.
pub fn score(board: &Board) -> (usize, usize) {
    (board.count(Player::Black), board.count(Player::White))
}

/// Neither side can move.
pub fn is_game_over(board: &Board) -> bool {
    !has_legal_move(board, Player::Black) && !has_legal_move(board, Player::White)
}
