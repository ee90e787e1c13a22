//! Constants for board dimensions, move limits, and engine defaults.
//!
//! # Board Size Configuration
//!
//! The board size is controlled by Cargo features:
//! - `board7x7` (default): 7x7 board
//! - `board5x5`: 5x5 board
//! - `board9x9`: 9x9 board
//!
//! To compile for a specific board size:
//! ```sh
//! cargo build                                            # 7x7 (default)
//! cargo build --no-default-features --features board9x9  # 9x9
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). The usual game is played on 7x7.
#[cfg(feature = "board5x5")]
pub const N: usize = 5;

#[cfg(feature = "board7x7")]
pub const N: usize = 7;

#[cfg(feature = "board9x9")]
pub const N: usize = 9;

#[cfg(any(
    all(feature = "board5x5", feature = "board7x7"),
    all(feature = "board5x5", feature = "board9x9"),
    all(feature = "board7x7", feature = "board9x9"),
))]
compile_error!("Enable only one of the 'board5x5', 'board7x7' and 'board9x9' features");

#[cfg(not(any(feature = "board5x5", feature = "board7x7", feature = "board9x9")))]
compile_error!("Must enable exactly one board size feature: 'board5x5', 'board7x7' or 'board9x9'");

const _: () = assert!(N >= 3, "Board size must be at least 3");

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// Score magnitude of a decided game (one side wiped out, or a full board).
pub const MAX_SCORE: i32 = CELLS as i32;

/// Upper bound on the number of successors of one position.
///
/// Every empty cell can be spawned into once, and every cell can be the
/// landing spot of at most 16 jumps.
pub const MAX_MOVES: usize = CELLS + CELLS * 16;

// =============================================================================
// Packed Storage
// =============================================================================

/// Two bits per cell plus one bit for the side to move.
pub const BITS_NEEDED: usize = CELLS * 2 + 1;

/// Number of `u64` words holding a packed position.
pub const STORAGE_WORDS: usize = BITS_NEEDED.div_ceil(64);

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// (row, col) offsets of the 8 adjacent cells.
pub const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// (row, col) offsets of the 16 cells at Chebyshev distance exactly 2.
///
/// Order: two rows above, the two side cells one row above, the two side
/// cells on the same row, the two side cells one row below, two rows below.
/// Jump moves are emitted in this order for every landing cell.
pub const JUMPS: [(isize, isize); 16] = [
    (-2, -2),
    (-2, -1),
    (-2, 0),
    (-2, 1),
    (-2, 2),
    (-1, -2),
    (-1, 2),
    (0, -2),
    (0, 2),
    (1, -2),
    (1, 2),
    (2, -2),
    (2, -1),
    (2, 0),
    (2, 1),
    (2, 2),
];

// =============================================================================
// Defaults
// =============================================================================

/// Default search depth of the first player (White).
pub const WHITE_DEPTH: u32 = 5;

/// Default search depth of the second player (Black).
pub const BLACK_DEPTH: u32 = 3;

/// Glyph for an empty cell.
pub const GLYPH_EMPTY: char = 'E';

/// Glyph for a White blob.
pub const GLYPH_WHITE: char = 'W';

/// Glyph for a Black blob.
pub const GLYPH_BLACK: char = 'B';
