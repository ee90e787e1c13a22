//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! White maximizes the score and Black minimizes it. Below the root,
//! successors are ordered by their own static score (best first for the
//! side to move) before recursing, which lets the pruning cut early. The
//! sort is stable, so equally scored successors keep generation order and
//! the search stays deterministic.
//!
//! A side without moves passes: its value is the static score, and the
//! reported next position is the same board with the turn flipped. A
//! decided position (saturated score) ends the search at any depth.

use std::cmp::Reverse;

use tracing::debug;

use crate::constants::MAX_SCORE;
use crate::movegen::{generate_moves, move_buffer};
use crate::position::{Player, Position, Score};

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Minimax value of the root position
    pub score: Score,
    /// Position to play into, `None` only for a depth-zero search
    pub next: Option<Position>,
    /// Number of positions visited, the root included
    pub nodes: u64,
}

/// Search `pos` to `depth` plies and pick the best successor.
pub fn search(pos: &Position, depth: u32) -> SearchOutcome {
    let mut searcher = Searcher::new(depth);
    let mut next = None;
    let score = searcher.alpha_beta(pos, depth, -MAX_SCORE, MAX_SCORE, Some(&mut next));
    debug!(depth, score, nodes = searcher.nodes, "search finished");
    SearchOutcome {
        score,
        next,
        nodes: searcher.nodes,
    }
}

/// Minimax value of `pos` at `depth` within the window `[alpha, beta]`.
///
/// `pos` is treated as the root, so its own successors are searched in
/// generation order.
pub fn alpha_beta(pos: &Position, depth: u32, alpha: Score, beta: Score) -> Score {
    Searcher::new(depth).alpha_beta(pos, depth, alpha, beta, None)
}

struct Searcher {
    /// Depth the search started at; the root ply is left unsorted
    root: u32,
    nodes: u64,
}

impl Searcher {
    fn new(root: u32) -> Self {
        Self { root, nodes: 0 }
    }

    fn alpha_beta(
        &mut self,
        pos: &Position,
        level: u32,
        mut alpha: Score,
        mut beta: Score,
        next: Option<&mut Option<Position>>,
    ) -> Score {
        self.nodes += 1;
        if level == 0 {
            return pos.score();
        }

        let mut buf = move_buffer();
        let len = if pos.is_game_over() {
            0
        } else {
            generate_moves(pos, &mut buf)
        };

        if len == 0 {
            if let Some(next) = next {
                *next = Some(pos.passed());
            }
            return pos.score();
        }

        let maximizing = pos.to_move() == Player::White;
        let moves = &mut buf[..len];
        if level != self.root {
            if maximizing {
                moves.sort_by_key(|p| Reverse(p.score()));
            } else {
                moves.sort_by_key(|p| p.score());
            }
        }

        let mut best = if maximizing { -MAX_SCORE } else { MAX_SCORE };
        let mut best_index = 0;
        for (i, child) in moves.iter().enumerate() {
            let value = self.alpha_beta(child, level - 1, alpha, beta, None);
            if maximizing {
                if value > best {
                    best = value;
                    best_index = i;
                }
                alpha = alpha.max(value);
            } else {
                if value < best {
                    best = value;
                    best_index = i;
                }
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }

        if let Some(next) = next {
            *next = Some(moves[best_index]);
        }
        best
    }
}
