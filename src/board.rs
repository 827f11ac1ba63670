//! Board model: cells, players, coordinates and the immutable 64-cell grid.
//!
//! Player values follow a sign convention: Black is `+1`, White is `-1` and an
//! empty cell is `0`. Negating a player (or a player's cell) yields the
//! opponent, which lets evaluation code write `-player` instead of a lookup.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::constants::{CELLS, N};

/// Errors raised by the board model and the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OthelloError {
    /// Coordinate outside the 8x8 grid
    OutOfRange { x: isize, y: isize },
    /// Random choice requested from an empty candidate set
    EmptySelection,
    /// Text could not be parsed as a coordinate
    InvalidCoord(String),
    /// Text could not be parsed as a board
    InvalidBoard(String),
}

impl fmt::Display for OthelloError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OthelloError::OutOfRange { x, y } => {
                write!(f, "coordinate ({x}, {y}) is outside the board")
            }
            OthelloError::EmptySelection => {
                write!(f, "can't pick an element from an empty set")
            }
            OthelloError::InvalidCoord(s) => write!(f, "invalid coordinate '{s}'"),
            OthelloError::InvalidBoard(msg) => write!(f, "invalid board: {msg}"),
        }
    }
}

impl std::error::Error for OthelloError {}

/// One of the two sides. Black moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// `+1` for Black, `-1` for White.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Player::Black => 1,
            Player::White => -1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Black => "black",
            Player::White => "white",
        }
    }
}

impl Neg for Player {
    type Output = Player;

    #[inline]
    fn neg(self) -> Player {
        self.opponent()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Content of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Black = 1,
    White = -1,
}

impl Cell {
    /// Numeric value: `0`, `+1` (Black) or `-1` (White).
    #[inline]
    pub fn value(self) -> i32 {
        self as i8 as i32
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The owner of the cell, if any.
    #[inline]
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }
}

impl From<Player> for Cell {
    #[inline]
    fn from(player: Player) -> Cell {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

impl Neg for Cell {
    type Output = Cell;

    #[inline]
    fn neg(self) -> Cell {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::Black => Cell::White,
            Cell::White => Cell::Black,
        }
    }
}

/// A validated board coordinate, `0 <= x, y < 8`.
///
/// Text form is a column letter followed by a row number: `a1` is `(0, 0)`,
/// `h8` is `(7, 7)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Coord {
    pub fn new(x: isize, y: isize) -> Result<Coord, OthelloError> {
        if (0..N as isize).contains(&x) && (0..N as isize).contains(&y) {
            Ok(Coord {
                x: x as u8,
                y: y as u8,
            })
        } else {
            Err(OthelloError::OutOfRange { x, y })
        }
    }

    /// Convert a linear index (`x + y * 8`) to a coordinate.
    ///
    /// # Panics
    /// If `index >= 64`.
    #[inline]
    pub fn from_index(index: usize) -> Coord {
        assert!(index < CELLS, "index {index} out of range");
        Coord {
            x: (index % N) as u8,
            y: (index / N) as u8,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.x as usize + self.y as usize * N
    }

    #[inline]
    pub fn x(self) -> usize {
        self.x as usize
    }

    #[inline]
    pub fn y(self) -> usize {
        self.y as usize
    }

    /// One step in direction `(dx, dy)`, or `None` past the board edge.
    #[inline]
    pub fn step(self, (dx, dy): (isize, isize)) -> Option<Coord> {
        Coord::new(self.x as isize + dx, self.y as isize + dy).ok()
    }

    /// All 64 coordinates in index order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELLS).map(Coord::from_index)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.x) as char, self.y + 1)
    }
}

impl FromStr for Coord {
    type Err = OthelloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OthelloError::InvalidCoord(s.to_string());
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let col = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        let row = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(invalid)?;
        if chars.next().is_some() || !col.is_ascii_lowercase() || row == 0 {
            return Err(invalid());
        }
        Coord::new(col as isize - 'a' as isize, row as isize - 1).map_err(|_| invalid())
    }
}

/// An 8x8 Othello board. Every transformation returns a new value.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// The standard opening: White on d4/e5, Black on e4/d5.
    pub fn starting() -> Self {
        let mut board = Board::empty();
        board.cells[3 + 3 * N] = Cell::White;
        board.cells[4 + 3 * N] = Cell::Black;
        board.cells[3 + 4 * N] = Cell::Black;
        board.cells[4 + 4 * N] = Cell::White;
        board
    }

    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Cell at `(x, y)`, failing if the coordinate is off the board.
    pub fn cell_at(&self, x: isize, y: isize) -> Result<Cell, OthelloError> {
        Coord::new(x, y).map(|c| self.get(c))
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord.index()]
    }

    /// Copy of this board with `coord` set to `cell`.
    #[must_use]
    pub fn with(&self, coord: Coord, cell: Cell) -> Board {
        let mut next = *self;
        next.cells[coord.index()] = cell;
        next
    }

    /// Number of pieces owned by `player`.
    pub fn count(&self, player: Player) -> usize {
        let cell = Cell::from(player);
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Player with strictly more pieces, or `None` on an exact tie.
    pub fn winner(&self) -> Option<Player> {
        let black = self.count(Player::Black);
        let white = self.count(Player::White);
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Cells multiplied by `player`'s sign, so `player` always reads as `+1`.
    pub fn relative_to(&self, player: Player) -> [i8; CELLS] {
        let sign = player.sign() as i8;
        std::array::from_fn(|i| self.cells[i] as i8 * sign)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..N {
            for x in 0..N {
                let ch = match self.cells[x + y * N] {
                    Cell::Black => 'X',
                    Cell::White => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Board {
    type Err = OthelloError;

    /// Parse the [`Display`](fmt::Display) form: `X` Black, `O` White, `.` empty.
    /// Whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Cell::Empty; CELLS];
        let mut i = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match ch {
                'X' | 'x' => Cell::Black,
                'O' | 'o' => Cell::White,
                '.' => Cell::Empty,
                other => {
                    return Err(OthelloError::InvalidBoard(format!(
                        "unexpected character '{other}'"
                    )));
                }
            };
            if i == CELLS {
                return Err(OthelloError::InvalidBoard("more than 64 cells".into()));
            }
            cells[i] = cell;
            i += 1;
        }
        if i != CELLS {
            return Err(OthelloError::InvalidBoard(format!("expected 64 cells, got {i}")));
        }
        Ok(Board { cells })
    }
}
