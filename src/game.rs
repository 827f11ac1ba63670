//! Game driver: alternates turns, handles passes and detects the end.
//!
//! The driver asks the strategy for a move only when the side to move has a
//! legal move; otherwise the turn passes. When neither side can move the game
//! is over and the winner is whoever holds more pieces.

use anyhow::Result;
use log::{debug, info};

use crate::board::{Board, Coord, Player};
use crate::position::{apply_move, has_legal_move, is_game_over, legal_moves, score};
use crate::strategy::{Matchup, Strategy};

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// `Player` is to move and has at least one legal move.
    AwaitingMove(Player),
    /// Neither side can move.
    Terminal,
}

/// A move played during a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// Board before the move
    pub board: Board,
    pub player: Player,
    pub coord: Coord,
}

/// Outcome of a finished game.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub board: Board,
    /// `None` on an exact tie
    pub winner: Option<Player>,
    pub history: Vec<Turn>,
}

impl MatchResult {
    /// Piece counts `(black, white)` on the final board.
    pub fn score(&self) -> (usize, usize) {
        score(&self.board)
    }
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Player,
    history: Vec<Turn>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game from the standard opening, Black to move.
    pub fn new() -> Self {
        Self::from_position(Board::starting(), Player::Black)
    }

    pub fn from_position(board: Board, to_move: Player) -> Self {
        Self {
            board,
            to_move,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Resolve passes and report who moves next, if anyone.
    ///
    /// If the side to move has no legal move the turn goes to the opponent.
    pub fn state(&mut self) -> GameState {
        if has_legal_move(&self.board, self.to_move) {
            return GameState::AwaitingMove(self.to_move);
        }
        if is_game_over(&self.board) {
            return GameState::Terminal;
        }
        debug!("{} passes", self.to_move);
        self.to_move = -self.to_move;
        GameState::AwaitingMove(self.to_move)
    }

    /// Play one move with `strategy`, passing first if needed.
    ///
    /// Returns the state after the move. The strategy's answer is not
    /// validated against the legal moves.
    pub fn advance<S: Strategy + ?Sized>(&mut self, strategy: &mut S) -> Result<GameState> {
        let player = match self.state() {
            GameState::AwaitingMove(p) => p,
            GameState::Terminal => return Ok(GameState::Terminal),
        };

        let moves = legal_moves(&self.board, player);
        let coord = strategy.choose_move(&self.board, player, &moves)?;
        debug!("{player} plays {coord}");

        self.history.push(Turn {
            board: self.board,
            player,
            coord,
        });
        self.board = apply_move(&self.board, coord, player);
        self.to_move = -player;
        Ok(self.state())
    }

    /// Final result, once the game is over.
    pub fn result(&mut self) -> Option<MatchResult> {
        match self.state() {
            GameState::Terminal => Some(MatchResult {
                board: self.board,
                winner: self.board.winner(),
                history: self.history.clone(),
            }),
            GameState::AwaitingMove(_) => None,
        }
    }

    /// Play until the end and return the result.
    pub fn play_out<S: Strategy + ?Sized>(mut self, strategy: &mut S) -> Result<MatchResult> {
        while self.advance(strategy)? != GameState::Terminal {}

        let (black, white) = score(&self.board);
        let winner = self.board.winner();
        info!(
            "game over after {} moves: black {black}, white {white}, winner {}",
            self.history.len(),
            winner.map_or("none", Player::name)
        );
        Ok(MatchResult {
            board: self.board,
            winner,
            history: self.history,
        })
    }
}

/// Play a full game from the standard opening.
///
/// `strategy` is asked for every move of both sides; use a [`Matchup`] to
/// give each side its own strategy.
pub fn play_match<S: Strategy + ?Sized>(strategy: &mut S) -> Result<MatchResult> {
    Game::new().play_out(strategy)
}

/// Fraction of `matches` games won by `black` playing against `white`.
pub fn win_rate<B: Strategy, W: Strategy>(black: B, white: W, matches: usize) -> Result<f64> {
    if matches == 0 {
        return Ok(0.0);
    }
    let mut players = Matchup::new(black, white);
    let mut wins = 0;
    for _ in 0..matches {
        if play_match(&mut players)?.winner == Some(Player::Black) {
            wins += 1;
        }
    }
    Ok(wins as f64 / matches as f64)
}
