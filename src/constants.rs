//! Board geometry and search parameters.
//!
//! The board is a flat 64-cell array indexed row-major (`x + y * N`). Unlike a
//! padded layout, there are no sentinel cells around the edge, so ray scans
//! must bounds-check each step explicitly (see [`DIRECTIONS`]).

// =============================================================================
// Board Geometry
// =============================================================================

/// Board width and height.
pub const N: usize = 8;

/// Total number of cells.
pub const CELLS: usize = N * N;

/// Number of empty cells at the start of a game (upper bound on game length).
pub const MAX_GAME_LEN: usize = CELLS - 4;

/// The 8 unit vectors `(dx, dy)` scanned from a placement.
/// Order: NW, N, NE, W, E, SW, S, SE
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth for the engine (plies below the root move).
pub const DEFAULT_DEPTH: u32 = 3;

/// Search depth used by the self-play sample generator: the root move and
/// the opponent's best reply.
pub const SELFPLAY_DEPTH: u32 = 1;

/// Default number of matches when measuring a win rate.
pub const MATCH_GAMES: usize = 1000;

/// Score of a finished game won by the side to move.
///
/// Strictly larger than any heuristic value: the weight table sums to 188 in
/// absolute value and mobility differs by at most 64.
pub const WIN_SCORE: i32 = 10_000;

/// Positional weight of each cell, row-major.
///
/// Corners are worth the most, the cells next to a corner are penalised.
/// The table is symmetric under all four reflections of the board.
#[rustfmt::skip]
pub const SQUARE_WEIGHTS: [i32; CELLS] = [
     8, -4,  6,  4,  4,  6, -4,  8,
    -4, -4,  0,  0,  0,  0, -4, -4,
     6,  0,  2,  2,  2,  2,  0,  6,
     4,  0,  2,  1,  1,  2,  0,  4,
     4,  0,  2,  1,  1,  2,  0,  4,
     6,  0,  2,  2,  2,  2,  0,  6,
    -4, -4,  0,  0,  0,  0, -4, -4,
     8, -4,  6,  4,  4,  6, -4,  8,
];
