//! Othello-Minimax: an Othello (Reversi) rules engine with a negamax player.
//!
//! This crate provides the rules of Othello on an 8x8 board, a depth-limited
//! negamax search with a positional heuristic, and a game driver that lets any
//! [`Strategy`](strategy::Strategy) play either side.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, square weights and search parameters
//! - [`board`] - Cells, players, coordinates and the board value type
//! - [`position`] - Move legality and move execution (captures)
//! - [`search`] - Negamax search and move selection
//! - [`strategy`] - The strategy interface and built-in players
//! - [`game`] - Turn alternation, passes and game results
//! - [`evaluator`] - Boundary to an external learned evaluator
//! - [`selfplay`] - Training samples from self-played games
//! - [`console`] - Human player on a text console
//!
//! ## Example
//!
//! ```
//! use othello_minimax::board::{Board, Player};
//! use othello_minimax::position::{apply_move, legal_moves};
//! use othello_minimax::search::best_move;
//!
//! let board = Board::starting();
//! let moves = legal_moves(&board, Player::Black);
//! assert_eq!(moves.len(), 4);
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let mv = best_move(&board, Player::Black, &moves, 2, &mut rng).unwrap();
//! let next = apply_move(&board, mv, Player::Black);
//! println!("{next}");
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod evaluator;
pub mod game;
pub mod position;
pub mod search;
pub mod selfplay;
pub mod strategy;
