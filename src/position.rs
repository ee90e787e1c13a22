//! Board state representation and mutation rules.
//!
//! This module provides the core game logic, including:
//! - A compact, bit-packed board with the side to move
//! - Incrementally maintained piece counts
//! - Spawning with adjacent conversion of opponent blobs
//! - Scoring and text rendering
//!
//! A [`Position`] is a small `Copy` value. The search copies positions
//! millions of times, so the grid is packed at two bits per cell and the
//! side to move lives in the top bit of the last storage word.

use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;

use crate::constants::{
    CELLS, GLYPH_BLACK, GLYPH_EMPTY, GLYPH_WHITE, MAX_SCORE, N, NEIGHBORS, STORAGE_WORDS,
};

/// A cell on the board, represented as a row-major index (`row * N + col`).
pub type Point = usize;

/// Evaluation from White's point of view.
pub type Score = i32;

/// Bit holding the side to move (set when Black moves).
const TURN_BIT: u64 = 1 << 63;

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    White = 1,
    Black = 2,
}

impl Cell {
    #[inline]
    fn from_bits(bits: u64) -> Self {
        match bits {
            0 => Cell::Empty,
            1 => Cell::White,
            2 => Cell::Black,
            _ => unreachable!("invalid cell encoding {bits}"),
        }
    }
}

/// One of the two players. White moves first and maximizes the score.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// The cell value this player's blobs occupy.
    #[inline]
    pub fn cell(self) -> Cell {
        match self {
            Player::White => Cell::White,
            Player::Black => Cell::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

/// Convert `(row, col)` into a [`Point`].
#[inline]
pub fn point(row: usize, col: usize) -> Point {
    debug_assert!(row < N && col < N, "({row}, {col}) is off the board");
    row * N + col
}

/// Convert a [`Point`] back into `(row, col)`.
#[inline]
pub fn row_col(pt: Point) -> (usize, usize) {
    (pt / N, pt % N)
}

/// The cell at `(row + dr, col + dc)`, or `None` when that is off the board.
#[inline]
pub fn shifted(row: usize, col: usize, (dr, dc): (isize, isize)) -> Option<Point> {
    let r = row.checked_add_signed(dr)?;
    let c = col.checked_add_signed(dc)?;
    (r < N && c < N).then_some(r * N + c)
}

/// Column letter used in board labels (`A`, `B`, ...).
#[inline]
pub fn column_letter(col: usize) -> char {
    debug_assert!(col < N);
    (b'A' + col as u8) as char
}

/// Cached piece counts disagree with the grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "cached counts (white {cached_white}, black {cached_black}) \
     disagree with the grid (white {white}, black {black})"
)]
pub struct CountMismatch {
    pub cached_white: Score,
    pub cached_black: Score,
    pub white: Score,
    pub black: Score,
}

/// A game position (board state).
///
/// Two positions are equal when their grids and sides to move are equal.
/// The cached counts are derived data and take no part in comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Position {
    /// Packed grid (2 bits per cell) plus the turn bit
    storage: [u64; STORAGE_WORDS],
    /// Number of White blobs
    white: Score,
    /// Number of Black blobs
    black: Score,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// An empty board with White to move.
    pub const EMPTY: Position = Position {
        storage: [0; STORAGE_WORDS],
        white: 0,
        black: 0,
    };

    /// The starting position: White in the top-left and bottom-right
    /// corners, Black in the other two, White to move.
    pub fn new() -> Self {
        let mut p = Self::EMPTY;
        p.set(point(0, 0), Cell::White);
        p.set(point(0, N - 1), Cell::Black);
        p.set(point(N - 1, 0), Cell::Black);
        p.set(point(N - 1, N - 1), Cell::White);
        p
    }

    /// The player about to move.
    #[inline]
    pub fn to_move(&self) -> Player {
        if self.storage[STORAGE_WORDS - 1] & TURN_BIT == 0 {
            Player::White
        } else {
            Player::Black
        }
    }

    /// Hand the move to the other player without touching the grid.
    #[inline]
    pub fn pass_turn(&mut self) {
        self.storage[STORAGE_WORDS - 1] ^= TURN_BIT;
    }

    /// A copy of this position with the turn flipped (a forced pass).
    #[inline]
    pub fn passed(&self) -> Self {
        let mut p = *self;
        p.pass_turn();
        p
    }

    /// Read a cell.
    #[inline]
    pub fn get(&self, pt: Point) -> Cell {
        debug_assert!(pt < CELLS, "point {pt} is off the board");
        let (word, shift) = slot(pt);
        Cell::from_bits((self.storage[word] >> shift) & 3u64)
    }

    /// Write a cell, keeping the cached counts in step. No-op if unchanged.
    pub fn set(&mut self, pt: Point, value: Cell) {
        let old = self.get(pt);
        if old == value {
            return;
        }
        match old {
            Cell::White => self.white -= 1,
            Cell::Black => self.black -= 1,
            Cell::Empty => {}
        }
        match value {
            Cell::White => self.white += 1,
            Cell::Black => self.black += 1,
            Cell::Empty => {}
        }
        self.set_raw(pt, value);
    }

    /// Put a blob of the side to move at `(row, col)`, then pass the turn and
    /// convert every adjacent blob of the new side to move.
    ///
    /// The cell must be empty; callers establish legality through the move
    /// generator.
    pub fn spawn(&mut self, row: usize, col: usize) {
        let pt = point(row, col);
        debug_assert_eq!(self.get(pt), Cell::Empty, "spawn onto occupied {pt}");
        let mover = self.to_move().cell();
        self.set(pt, mover);
        self.pass_turn();
        let victim = self.to_move().cell();
        for delta in NEIGHBORS {
            if let Some(n) = shifted(row, col, delta) {
                if self.get(n) == victim {
                    self.set(n, mover);
                }
            }
        }
    }

    /// Number of blobs owned by `player`.
    #[inline]
    pub fn count(&self, player: Player) -> Score {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }

    /// Number of empty cells.
    #[inline]
    pub fn empty_count(&self) -> usize {
        CELLS - (self.white + self.black) as usize
    }

    /// Every cell is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        (self.white + self.black) as usize == CELLS
    }

    /// Evaluate the position from White's point of view.
    ///
    /// The plain blob difference, except that a side with no blobs left, or
    /// the leader on a full board, gets the whole board (`±N²`).
    pub fn score(&self) -> Score {
        if self.black == 0 {
            MAX_SCORE
        } else if self.white == 0 {
            -MAX_SCORE
        } else if self.is_full() && self.white > self.black {
            MAX_SCORE
        } else if self.is_full() && self.black > self.white {
            -MAX_SCORE
        } else {
            self.white - self.black
        }
    }

    /// The game is decided: the score has saturated.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.score().abs() == MAX_SCORE
    }

    /// Recount the grid and compare against the cached counts.
    pub fn check_counts(&self) -> Result<(), CountMismatch> {
        let (mut white, mut black) = (0, 0);
        for pt in 0..CELLS {
            match self.get(pt) {
                Cell::White => white += 1,
                Cell::Black => black += 1,
                Cell::Empty => {}
            }
        }
        if white == self.white && black == self.black {
            Ok(())
        } else {
            Err(CountMismatch {
                cached_white: self.white,
                cached_black: self.black,
                white,
                black,
            })
        }
    }

    /// Render the board with custom glyphs for empty, White and Black cells.
    pub fn render(&self, empty: char, white: char, black: char) -> String {
        let mut out = String::with_capacity((4 + N * 2 + 1) * (N + 3));
        self.write_grid(&mut out, [empty, white, black])
            .expect("writing to a String cannot fail");
        out
    }

    fn write_grid(&self, out: &mut impl fmt::Write, glyphs: [char; 3]) -> fmt::Result {
        write!(out, "  | ")?;
        for col in 0..N {
            write!(out, "{} ", column_letter(col))?;
        }
        writeln!(out)?;
        let rule = "--".repeat(N);
        writeln!(out, "--+-{rule}")?;
        for row in 0..N {
            write!(out, "{row} | ")?;
            for col in 0..N {
                let glyph = glyphs[self.get(point(row, col)) as usize];
                write!(out, "{glyph} ")?;
            }
            writeln!(out)?;
        }
        writeln!(out, "--+-{rule}")?;
        writeln!(out, "  | Score: {}", self.score())
    }

    #[inline]
    fn set_raw(&mut self, pt: Point, value: Cell) {
        debug_assert!(pt < CELLS, "point {pt} is off the board");
        let (word, shift) = slot(pt);
        self.storage[word] = (self.storage[word] & !(3u64 << shift)) | ((value as u64) << shift);
    }
}

/// Storage word and bit offset of a cell. Cells never straddle words.
#[inline]
fn slot(pt: Point) -> (usize, u32) {
    let bit = pt * 2;
    (bit / 64, (bit % 64) as u32)
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        let same = self.storage == other.storage;
        debug_assert!(!same || (self.white == other.white && self.black == other.black));
        same
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.storage.hash(state);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_grid(f, [GLYPH_EMPTY, GLYPH_WHITE, GLYPH_BLACK])
    }
}
