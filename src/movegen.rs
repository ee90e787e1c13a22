//! Legal move generation.
//!
//! Moves are represented by their resulting positions: expanding a position
//! yields every position reachable by one legal move of the side to move.
//!
//! For each empty landing cell, in row-major order, the generator emits:
//! 1. one spawn, if any adjacent cell holds a blob of the mover;
//! 2. one jump per mover blob at Chebyshev distance exactly 2, in
//!    [`JUMPS`] order. The source cell is vacated before the spawn.
//!
//! Both move kinds convert adjacent opponent blobs through
//! [`Position::spawn`].

use crate::constants::{JUMPS, MAX_MOVES, N, NEIGHBORS};
use crate::position::{Cell, Position, point, shifted};

/// Fixed-capacity buffer large enough for the successors of any position.
pub type MoveBuffer = [Position; MAX_MOVES];

/// A fresh buffer for [`generate_moves`].
pub fn move_buffer() -> MoveBuffer {
    [Position::EMPTY; MAX_MOVES]
}

/// Write every successor of `start` into `out` and return how many there are.
///
/// The buffer is sized for the worst case, so it can never overflow. No
/// allocation takes place.
pub fn generate_moves(start: &Position, out: &mut MoveBuffer) -> usize {
    let mover = start.to_move().cell();
    let mut num = 0;

    for row in 0..N {
        for col in 0..N {
            if start.get(point(row, col)) != Cell::Empty {
                continue;
            }

            // Spawn from any adjacent blob of the mover.
            let adjacent = NEIGHBORS
                .iter()
                .filter_map(|&d| shifted(row, col, d))
                .any(|n| start.get(n) == mover);
            if adjacent {
                let mut copy = *start;
                copy.spawn(row, col);
                out[num] = copy;
                num += 1;
            }

            // One jump per mover blob two cells away.
            for &d in &JUMPS {
                let Some(source) = shifted(row, col, d) else {
                    continue;
                };
                if start.get(source) != mover {
                    continue;
                }
                let mut copy = *start;
                copy.set(source, Cell::Empty);
                copy.spawn(row, col);
                out[num] = copy;
                num += 1;
            }
        }
    }

    debug_assert!(num <= MAX_MOVES);
    num
}

/// All successors of `start`, collected into a `Vec`.
///
/// Convenient for callers outside the search, such as validating a human
/// move by membership.
pub fn legal_moves(start: &Position) -> Vec<Position> {
    let mut buf = Box::new(move_buffer());
    let len = generate_moves(start, &mut buf);
    buf[..len].to_vec()
}

/// Whether the side to move has at least one legal move.
pub fn has_moves(start: &Position) -> bool {
    let mover = start.to_move().cell();
    (0..N).any(|row| {
        (0..N).any(|col| {
            start.get(point(row, col)) == Cell::Empty
                && NEIGHBORS
                    .iter()
                    .chain(JUMPS.iter())
                    .filter_map(|&d| shifted(row, col, d))
                    .any(|n| start.get(n) == mover)
        })
    })
}

/// Count leaf move sequences of length `depth` from `start`.
///
/// A side without moves passes, and the pass counts as one move.
pub fn perft(start: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut buf = move_buffer();
    let len = generate_moves(start, &mut buf);
    if len == 0 {
        return perft(&start.passed(), depth - 1);
    }
    if depth == 1 {
        return len as u64;
    }
    buf[..len].iter().map(|p| perft(p, depth - 1)).sum()
}
