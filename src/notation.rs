//! Move notation.
//!
//! Cells are written as a column letter followed by a row number, with
//! `A0` the top-left corner as the board is printed. A spawn is written
//! as its landing cell (`B1`), a jump as source then landing (`A0C2`).

use std::fmt;

use thiserror::Error;

use crate::constants::{CELLS, N};
use crate::movegen::legal_moves;
use crate::position::{Cell, Point, Position, column_letter, point, row_col};

/// Rejected move text, or two positions that are not one move apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("expected a move like B1 or A0C2, got {0:?}")]
    Malformed(String),
    #[error("column {0} is off the board")]
    ColumnOutOfRange(char),
    #[error("row {0} is off the board")]
    RowOutOfRange(usize),
    #[error("no blob lands between the two positions")]
    NoLanding,
    #[error("Illegal move!")]
    Illegal,
}

/// A move as typed: a spawn onto `to`, or a jump from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Spawn { to: Point },
    Jump { from: Point, to: Point },
}

impl Move {
    /// The cell the new blob lands on.
    pub fn target(self) -> Point {
        match self {
            Move::Spawn { to } | Move::Jump { to, .. } => to,
        }
    }

    /// Play the move on a copy of `pos` without checking legality.
    ///
    /// The target must be empty.
    pub fn apply(self, pos: &Position) -> Position {
        let mut next = *pos;
        if let Move::Jump { from, .. } = self {
            next.set(from, Cell::Empty);
        }
        let (row, col) = row_col(self.target());
        next.spawn(row, col);
        next
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Spawn { to } => write!(f, "{}", point_label(to)),
            Move::Jump { from, to } => write!(f, "{}{}", point_label(from), point_label(to)),
        }
    }
}

/// Human-readable label of a cell, e.g. `C4`.
pub fn point_label(pt: Point) -> String {
    debug_assert!(pt < CELLS);
    let (row, col) = row_col(pt);
    format!("{}{row}", column_letter(col))
}

/// Recover the move that leads from `before` to `after`.
///
/// A cell that empties is the jump source; a cell that fills is the landing.
pub fn diff_move(before: &Position, after: &Position) -> Result<Move, NotationError> {
    debug_assert_ne!(before.to_move(), after.to_move());
    let mut from = None;
    let mut to = None;
    for pt in 0..CELLS {
        let (a, b) = (before.get(pt), after.get(pt));
        if a != Cell::Empty && b == Cell::Empty {
            from = Some(pt);
        }
        if a == Cell::Empty && b != Cell::Empty {
            to = Some(pt);
        }
    }
    let to = to.ok_or(NotationError::NoLanding)?;
    Ok(match from {
        Some(from) => Move::Jump { from, to },
        None => Move::Spawn { to },
    })
}

/// The move between two consecutive positions in notation, e.g. `B3C5`.
pub fn move_string(before: &Position, after: &Position) -> Result<String, NotationError> {
    diff_move(before, after).map(|mv| mv.to_string())
}

/// Parse a single cell label such as `b3`.
pub fn parse_point(text: &str) -> Result<Point, NotationError> {
    let compact = compact(text);
    match take_coord(&compact) {
        Some((letter, digits, "")) => coord(letter, digits),
        _ => Err(NotationError::Malformed(text.trim().to_string())),
    }
}

/// Parse `<letter><number>` (spawn) or `<letter><number><letter><number>`
/// (jump). Case and whitespace between the parts are ignored.
pub fn parse_move(text: &str) -> Result<Move, NotationError> {
    let compact = compact(text);
    let malformed = || NotationError::Malformed(text.trim().to_string());

    let (letter, digits, rest) = take_coord(&compact).ok_or_else(malformed)?;
    let first = coord(letter, digits)?;
    if rest.is_empty() {
        return Ok(Move::Spawn { to: first });
    }

    match take_coord(rest) {
        Some((letter, digits, "")) => Ok(Move::Jump {
            from: first,
            to: coord(letter, digits)?,
        }),
        _ => Err(malformed()),
    }
}

/// Parse typed move text and play it, accepting only legal moves.
pub fn play_text(pos: &Position, text: &str) -> Result<Position, NotationError> {
    let mv = parse_move(text)?;
    if pos.get(mv.target()) != Cell::Empty {
        return Err(NotationError::Illegal);
    }
    if let Move::Jump { from, .. } = mv {
        if pos.get(from) != pos.to_move().cell() {
            return Err(NotationError::Illegal);
        }
    }

    let candidate = mv.apply(pos);
    if legal_moves(pos).contains(&candidate) {
        Ok(candidate)
    } else {
        Err(NotationError::Illegal)
    }
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Split a leading `<letter><digits>` off `s`.
fn take_coord(s: &str) -> Option<(char, &str, &str)> {
    let letter = s.chars().next()?;
    if !letter.is_ascii_alphabetic() {
        return None;
    }
    let tail = &s[1..];
    let end = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
    if end == 0 {
        return None;
    }
    Some((letter, &tail[..end], &tail[end..]))
}

fn coord(letter: char, digits: &str) -> Result<Point, NotationError> {
    let col = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
    if col >= N {
        return Err(NotationError::ColumnOutOfRange(letter));
    }
    let row: usize = digits
        .parse()
        .map_err(|_| NotationError::Malformed(format!("{letter}{digits}")))?;
    if row >= N {
        return Err(NotationError::RowOutOfRange(row));
    }
    Ok(point(row, col))
}
