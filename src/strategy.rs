//! Move-choosing strategies.
//!
//! A [`Strategy`] is asked for a move only when the side to move has at least
//! one legal move, and must answer with an element of the set it was given.
//! The game driver does not check the answer.

use anyhow::{Context, Result};

use crate::board::{Board, Coord, Player};
use crate::constants::DEFAULT_DEPTH;
use crate::search::{best_move, random_element};

/// Anything that can pick a move: a human, the search engine, a model.
pub trait Strategy {
    /// Choose one of `legal_moves` (never empty) for `player` on `board`.
    fn choose_move(&mut self, board: &Board, player: Player, legal_moves: &[Coord]) -> Result<Coord>;
}

impl<S: Strategy + ?Sized> Strategy for &mut S {
    fn choose_move(&mut self, board: &Board, player: Player, legal_moves: &[Coord]) -> Result<Coord> {
        (**self).choose_move(board, player, legal_moves)
    }
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn choose_move(&mut self, board: &Board, player: Player, legal_moves: &[Coord]) -> Result<Coord> {
        (**self).choose_move(board, player, legal_moves)
    }
}

/// One strategy per side; dispatches on the player to move.
pub struct Matchup<B, W> {
    pub black: B,
    pub white: W,
}

impl<B: Strategy, W: Strategy> Matchup<B, W> {
    pub fn new(black: B, white: W) -> Self {
        Self { black, white }
    }

    /// The strategy playing `player`.
    pub fn side(&mut self, player: Player) -> &mut dyn Strategy {
        match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        }
    }
}

impl<B: Strategy, W: Strategy> Strategy for Matchup<B, W> {
    fn choose_move(&mut self, board: &Board, player: Player, legal_moves: &[Coord]) -> Result<Coord> {
        self.side(player).choose_move(board, player, legal_moves)
    }
}

/// Uniformly random legal moves.
pub struct RandomStrategy {
    rng: fastrand::Rng,
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose_move(&mut self, _board: &Board, _player: Player, legal_moves: &[Coord]) -> Result<Coord> {
        Ok(*random_element(legal_moves, &mut self.rng)?)
    }
}

/// The negamax search at a fixed depth.
pub struct MinimaxStrategy {
    depth: u32,
    rng: fastrand::Rng,
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl MinimaxStrategy {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            rng: fastrand::Rng::new(),
        }
    }

    /// Seed the tie-breaking generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Strategy for MinimaxStrategy {
    fn choose_move(&mut self, board: &Board, player: Player, legal_moves: &[Coord]) -> Result<Coord> {
        best_move(board, player, legal_moves, self.depth, &mut self.rng)
            .with_context(|| format!("minimax search for {player} at depth {}", self.depth))
    }
}

/// Replays a fixed list of moves, in order. Used to set up positions.
pub struct ScriptedStrategy {
    moves: std::vec::IntoIter<Coord>,
}

impl ScriptedStrategy {
    pub fn new(moves: Vec<Coord>) -> Self {
        Self {
            moves: moves.into_iter(),
        }
    }
}

impl Strategy for ScriptedStrategy {
    fn choose_move(&mut self, _board: &Board, player: Player, _legal_moves: &[Coord]) -> Result<Coord> {
        self.moves
            .next()
            .with_context(|| format!("script ran out of moves for {player}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::legal_moves;

    #[test]
    fn test_random_picks_legal() {
        let board = Board::starting();
        let moves = legal_moves(&board, Player::Black);
        let mut s = RandomStrategy::with_seed(5);
        for _ in 0..20 {
            let mv = s.choose_move(&board, Player::Black, &moves).unwrap();
            assert!(moves.contains(&mv));
        }
    }

    #[test]
    fn test_random_empty_is_error() {
        let mut s = RandomStrategy::with_seed(5);
        assert!(s.choose_move(&Board::starting(), Player::Black, &[]).is_err());
    }

    #[test]
    fn test_minimax_picks_legal() {
        let board = Board::starting();
        let moves = legal_moves(&board, Player::White);
        let mut s = MinimaxStrategy::new(2).with_seed(9);
        let mv = s.choose_move(&board, Player::White, &moves).unwrap();
        assert!(moves.contains(&mv));
        assert_eq!(s.depth(), 2);
    }

    #[test]
    fn test_matchup_dispatch() {
        let a1: Coord = "a1".parse().unwrap();
        let h8: Coord = "h8".parse().unwrap();
        let mut m = Matchup::new(ScriptedStrategy::new(vec![a1]), ScriptedStrategy::new(vec![h8]));
        let board = Board::starting();
        assert_eq!(m.choose_move(&board, Player::White, &[]).unwrap(), h8);
        assert_eq!(m.choose_move(&board, Player::Black, &[]).unwrap(), a1);
        assert!(m.choose_move(&board, Player::Black, &[]).is_err());
    }
}
