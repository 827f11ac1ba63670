//! Boundary to an external learned evaluator.
//!
//! The evaluator itself lives outside this crate (for example a trained
//! network behind some inference runtime). It sees the board from the mover's
//! side, every cell multiplied by the mover's sign so its own pieces are `+1`,
//! and returns one desirability score per cell.

use anyhow::{Context, Result, ensure};

use crate::board::{Board, Coord, OthelloError, Player};
use crate::constants::CELLS;
use crate::strategy::Strategy;

/// A function from a player-relative board to 64 per-cell scores.
pub trait Evaluator {
    fn evaluate(&mut self, input: &[f32; CELLS]) -> Result<[f32; CELLS]>;
}

impl<F> Evaluator for F
where
    F: FnMut(&[f32; CELLS]) -> [f32; CELLS],
{
    fn evaluate(&mut self, input: &[f32; CELLS]) -> Result<[f32; CELLS]> {
        Ok(self(input))
    }
}

/// Encode `board` for `player`: own pieces `+1`, opponent `-1`, empty `0`.
pub fn encode(board: &Board, player: Player) -> [f32; CELLS] {
    board.relative_to(player).map(f32::from)
}

/// Plays the legal move the evaluator scores highest.
///
/// Ties go to the first such move in index order. NaN scores never win.
pub struct EvaluatorStrategy<E> {
    evaluator: E,
}

impl<E: Evaluator> EvaluatorStrategy<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }
}

impl<E: Evaluator> Strategy for EvaluatorStrategy<E> {
    fn choose_move(&mut self, board: &Board, player: Player, legal_moves: &[Coord]) -> Result<Coord> {
        ensure!(!legal_moves.is_empty(), OthelloError::EmptySelection);

        let scores = self
            .evaluator
            .evaluate(&encode(board, player))
            .with_context(|| format!("evaluating position for {player}"))?;

        let mut best = legal_moves[0];
        let mut best_score = f32::NEG_INFINITY;
        for &mv in legal_moves {
            let s = scores[mv.index()];
            if s > best_score {
                best_score = s;
                best = mv;
            }
        }
        Ok(best)
    }
}
