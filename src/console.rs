//! Text console strategy for a human player.
//!
//! Reads one coordinate per line (`d3`, `F5`, ...) and keeps asking until the
//! answer is a legal move. Lines starting with `#` are ignored, `moves` lists
//! the legal moves and `quit` abandons the game.
//!
//! The renderer owns the marker for the opponent's last placement; the board
//! model knows nothing about it.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

use crate::board::{Board, Cell, Coord, Player};
use crate::constants::N;
use crate::position::apply_move;
use crate::strategy::Strategy;

/// Draw `board` with legal moves as `*` and `marked` as a bracketed piece.
pub fn render(board: &Board, legal_moves: &[Coord], marked: Option<Coord>) -> String {
    let mut out = String::from("   a b c d e f g h\n");
    for y in 0..N {
        out.push_str(&format!("{:>2}", y + 1));
        for x in 0..N {
            let idx = x + y * N;
            let pt = Coord::from_index(idx);
            let ch = match board.cells()[idx] {
                Cell::Black => 'X',
                Cell::White => 'O',
                Cell::Empty if legal_moves.contains(&pt) => '*',
                Cell::Empty => '.',
            };
            if marked == Some(pt) {
                out.push('[');
                out.push(ch);
                out.push(']');
            } else if marked.is_some_and(|m| m.y() == y && m.x() + 1 == x) {
                out.push(ch);
            } else {
                out.push(' ');
                out.push(ch);
            }
        }
        out.push('\n');
    }
    let black = board.count(Player::Black);
    let white = board.count(Player::White);
    out.push_str(&format!("black (X): {black}, white (O): {white}\n"));
    out
}

/// Human player on a line-based text stream.
pub struct ConsoleStrategy<R, W> {
    input: R,
    output: W,
    /// Board right after our last move, to spot the opponent's reply
    last_seen: Option<Board>,
}

impl<R: BufRead, W: Write> ConsoleStrategy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            last_seen: None,
        }
    }

    /// The cell filled since our last move, if any.
    fn opponent_move(&self, board: &Board) -> Option<Coord> {
        let before = self.last_seen?;
        Coord::all().find(|&pt| before.get(pt).is_empty() && !board.get(pt).is_empty())
    }

    fn read_move(&mut self, legal_moves: &[Coord]) -> Result<Coord> {
        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            let read = self.input.read_line(&mut line).context("reading move")?;
            if read == 0 {
                bail!("input closed");
            }

            let answer = line.trim();
            if answer.is_empty() || answer.starts_with('#') {
                continue;
            }

            match answer.to_ascii_lowercase().as_str() {
                "quit" | "exit" => bail!("player quit"),
                "moves" => {
                    let list: Vec<String> = legal_moves.iter().map(Coord::to_string).collect();
                    writeln!(self.output, "legal moves: {}", list.join(" "))?;
                    continue;
                }
                _ => {}
            }

            match answer.parse::<Coord>() {
                Ok(pt) if legal_moves.contains(&pt) => return Ok(pt),
                Ok(pt) => writeln!(self.output, "illegal move: {pt}")?,
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Strategy for ConsoleStrategy<R, W> {
    fn choose_move(&mut self, board: &Board, player: Player, legal_moves: &[Coord]) -> Result<Coord> {
        let marked = self.opponent_move(board);
        write!(self.output, "\n{}", render(board, legal_moves, marked))?;
        if let Some(pt) = marked {
            writeln!(self.output, "opponent played {pt}")?;
        }
        writeln!(self.output, "{player} to move")?;

        let pt = self.read_move(legal_moves)?;
        self.last_seen = Some(apply_move(board, pt, player));
        Ok(pt)
    }
}
