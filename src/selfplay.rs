//! Self-play training samples for an external trainer.
//!
//! [`SelfPlay`] plays games against itself and yields one sample per move of
//! every decisive game. The board is stored from the mover's side (own pieces
//! `+1`), and the label vector marks the move that was played with `+1` if the
//! mover went on to win, `-1` if it lost. Every other legal move gets the
//! opposite sign, on the rough assumption that the alternatives would have
//! gone the other way. Cells that were not legal stay `0`.

use std::collections::VecDeque;

use anyhow::Result;
use log::debug;
use serde::Serialize;

use crate::constants::{CELLS, SELFPLAY_DEPTH};
use crate::game::{MatchResult, play_match};
use crate::position::legal_moves;
use crate::strategy::{MinimaxStrategy, Strategy};

/// One (board, label) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingSample {
    #[serde(with = "cells")]
    pub board: [i8; CELLS],
    #[serde(with = "cells")]
    pub labels: [i8; CELLS],
}

/// Serialize a 64-cell array as a plain sequence.
mod cells {
    use serde::Serializer;

    use crate::constants::CELLS;

    pub fn serialize<S: Serializer>(values: &[i8; CELLS], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter())
    }
}

/// Turn a finished game into samples, one per move. Draws yield nothing.
pub fn samples_from_match(result: &MatchResult) -> Vec<TrainingSample> {
    let Some(winner) = result.winner else {
        return Vec::new();
    };

    result
        .history
        .iter()
        .map(|turn| {
            let outcome: i8 = if turn.player == winner { 1 } else { -1 };
            let mut labels = [0i8; CELLS];
            for mv in legal_moves(&turn.board, turn.player) {
                labels[mv.index()] = -outcome;
            }
            labels[turn.coord.index()] = outcome;
            TrainingSample {
                board: turn.board.relative_to(turn.player),
                labels,
            }
        })
        .collect()
}

/// Endless stream of self-play samples.
///
/// Each call to `next` returns `Some`; errors from the strategy are yielded as
/// `Some(Err(_))`. To start over, build a new `SelfPlay`.
pub struct SelfPlay<S> {
    strategy: S,
    pending: VecDeque<TrainingSample>,
    games: usize,
}

impl Default for SelfPlay<MinimaxStrategy> {
    fn default() -> Self {
        Self::new(MinimaxStrategy::new(SELFPLAY_DEPTH))
    }
}

impl<S: Strategy> SelfPlay<S> {
    /// Self-play where `strategy` plays both sides.
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            pending: VecDeque::new(),
            games: 0,
        }
    }

    /// Number of games played so far, draws included.
    pub fn games_played(&self) -> usize {
        self.games
    }

    fn refill(&mut self) -> Result<()> {
        while self.pending.is_empty() {
            let result = play_match(&mut self.strategy)?;
            self.games += 1;
            if result.winner.is_none() {
                debug!("game {} drawn, skipped", self.games);
                continue;
            }
            self.pending.extend(samples_from_match(&result));
        }
        Ok(())
    }
}

impl<S: Strategy> Iterator for SelfPlay<S> {
    type Item = Result<TrainingSample>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Err(e) = self.refill() {
            return Some(Err(e));
        }
        self.pending.pop_front().map(Ok)
    }
}
