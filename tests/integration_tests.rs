//! Integration tests for ataxx-rust
//!
//! These exercise the public API end to end: move generation over many
//! reachable positions, search correctness against an unpruned minimax,
//! and the notation used by the text interface.

use ataxx_rust::constants::{CELLS, MAX_SCORE, N};
use ataxx_rust::movegen::{generate_moves, legal_moves, move_buffer, perft};
use ataxx_rust::notation::{diff_move, move_string, play_text, Move};
use ataxx_rust::position::{Cell, Player, Position, Score, point, row_col};
use ataxx_rust::search::{alpha_beta, search};

// =============================================================================
// Helper functions
// =============================================================================

/// Play random legal moves from the starting position, passing when stuck.
/// Returns every position visited, the start included.
fn random_walk(seed: u64, plies: usize) -> Vec<Position> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut pos = Position::new();
    let mut visited = vec![pos];
    for _ in 0..plies {
        if pos.is_game_over() {
            break;
        }
        let moves = legal_moves(&pos);
        pos = if moves.is_empty() {
            pos.passed()
        } else {
            moves[rng.usize(..moves.len())]
        };
        visited.push(pos);
    }
    visited
}

/// Plain minimax without pruning or move ordering.
fn minimax(pos: &Position, depth: u32) -> Score {
    if depth == 0 {
        return pos.score();
    }
    let moves = legal_moves(pos);
    if moves.is_empty() {
        return pos.score();
    }
    let values = moves.iter().map(|m| minimax(m, depth - 1));
    match pos.to_move() {
        Player::White => values.max().unwrap(),
        Player::Black => values.min().unwrap(),
    }
}

fn chebyshev(a: usize, b: usize) -> usize {
    let (ar, ac) = row_col(a);
    let (br, bc) = row_col(b);
    ar.abs_diff(br).max(ac.abs_diff(bc))
}

// =============================================================================
// Board state invariants
// =============================================================================

#[test]
fn test_counts_match_grid_over_random_games() {
    for seed in 0..20 {
        for pos in random_walk(seed, 120) {
            pos.check_counts().unwrap();
            let white = pos.count(Player::White) as usize;
            let black = pos.count(Player::Black) as usize;
            assert_eq!(white + black + pos.empty_count(), CELLS);
        }
    }
}

#[test]
fn test_score_bounds_over_random_games() {
    for seed in 0..20 {
        for pos in random_walk(seed, 120) {
            let score = pos.score();
            assert!((-MAX_SCORE..=MAX_SCORE).contains(&score));
            let (white, black) = (pos.count(Player::White), pos.count(Player::Black));
            let white_wins = black == 0 || (pos.is_full() && white > black);
            assert_eq!(score == MAX_SCORE, white_wins);
            if white == 0 {
                assert_eq!(score, -MAX_SCORE);
            }
        }
    }
}

// =============================================================================
// Move generation
// =============================================================================

#[test]
fn test_initial_successors() {
    let pos = Position::new();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 16);

    // Every successor comes from one of the two White corners.
    for m in &moves {
        let landing = diff_move(&pos, m).unwrap().target();
        let near_corner = chebyshev(landing, point(0, 0)) <= 2
            || chebyshev(landing, point(N - 1, N - 1)) <= 2;
        assert!(near_corner, "unexpected landing {landing}");
        assert!(m.count(Player::White) >= 2);
    }
}

#[test]
fn test_successors_differ_by_one_move() {
    for seed in 0..10 {
        for pos in random_walk(seed, 40) {
            let mover = pos.to_move().cell();
            let victim = pos.to_move().opponent().cell();
            for m in legal_moves(&pos) {
                assert_eq!(m.to_move(), pos.to_move().opponent());
                let mv = diff_move(&pos, &m).unwrap();
                let landing = mv.target();
                let source = match mv {
                    Move::Jump { from, to } => {
                        assert_eq!(chebyshev(from, to), 2);
                        Some(from)
                    }
                    Move::Spawn { to } => {
                        assert!(m.count(pos.to_move()) > pos.count(pos.to_move()));
                        assert!((0..CELLS).any(|n| chebyshev(n, to) == 1 && pos.get(n) == mover));
                        None
                    }
                };
                for pt in 0..CELLS {
                    let (before, after) = (pos.get(pt), m.get(pt));
                    if before == after {
                        continue;
                    }
                    if pt == landing {
                        assert_eq!((before, after), (Cell::Empty, mover));
                    } else if Some(pt) == source {
                        assert_eq!((before, after), (mover, Cell::Empty));
                    } else {
                        assert_eq!((before, after), (victim, mover));
                        assert_eq!(chebyshev(pt, landing), 1);
                    }
                }
            }
        }
    }
}

#[test]
fn test_generated_count_within_capacity() {
    let mut buf = move_buffer();
    for seed in 0..10 {
        for pos in random_walk(seed, 80) {
            let len = generate_moves(&pos, &mut buf);
            assert_eq!(len, legal_moves(&pos).len());
            assert!(len <= buf.len());
        }
    }
}

#[test]
fn test_no_duplicate_successors() {
    for pos in random_walk(3, 30) {
        let moves = legal_moves(&pos);
        let unique: std::collections::HashSet<_> = moves.iter().collect();
        assert_eq!(unique.len(), moves.len());
    }
}

#[test]
fn test_perft_from_start() {
    let pos = Position::new();
    assert_eq!(perft(&pos, 1), 16);
    if N == 7 {
        assert_eq!(perft(&pos, 2), 256);
    }
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_alpha_beta_equals_minimax() {
    for seed in 0..6 {
        for pos in random_walk(seed, 6).into_iter().step_by(2) {
            for depth in 1..=3 {
                assert_eq!(
                    search(&pos, depth).score,
                    minimax(&pos, depth),
                    "seed {seed}, depth {depth}"
                );
            }
        }
    }
}

#[test]
fn test_alpha_beta_equals_minimax_midgame() {
    for seed in 100..104 {
        let walk = random_walk(seed, 30);
        let pos = walk.last().unwrap();
        for depth in 1..=2 {
            assert_eq!(
                alpha_beta(pos, depth, -MAX_SCORE, MAX_SCORE),
                minimax(pos, depth)
            );
        }
    }
}

#[test]
fn test_pruning_visits_fewer_nodes() {
    if N != 7 {
        return;
    }
    let outcome = search(&Position::new(), 2);
    assert!(outcome.nodes < 1 + 16 + 256, "visited {}", outcome.nodes);
}

#[test]
fn test_search_is_deterministic() {
    for pos in random_walk(11, 10) {
        let a = search(&pos, 3);
        let b = search(&pos, 3);
        assert_eq!(a, b);
    }
}

#[test]
fn test_search_next_is_legal() {
    for pos in random_walk(5, 20) {
        let moves = legal_moves(&pos);
        let outcome = search(&pos, 2);
        let next = outcome.next.unwrap();
        if moves.is_empty() || pos.is_game_over() {
            assert_eq!(next, pos.passed());
        } else {
            assert!(moves.contains(&next));
        }
    }
}

#[test]
fn test_forced_pass() {
    // Black owns every cell but one corner; White's only blob is far away.
    let mut pos = Position::EMPTY;
    for pt in 0..CELLS {
        pos.set(pt, Cell::Black);
    }
    pos.set(point(0, 0), Cell::White);
    pos.set(point(N - 1, N - 1), Cell::Empty);

    for depth in 1..=3 {
        let outcome = search(&pos, depth);
        assert_eq!(outcome.score, pos.score());
        let next = outcome.next.unwrap();
        assert_eq!(next, pos.passed());
        assert_eq!(next.to_move(), Player::Black);
    }
}

#[test]
fn test_black_wiped_out_is_terminal() {
    let mut pos = Position::EMPTY;
    pos.set(point(1, 1), Cell::White);
    pos.set(point(2, 2), Cell::White);
    for depth in 0..=4 {
        assert_eq!(search(&pos, depth).score, MAX_SCORE);
    }
}

#[test]
fn test_first_move_gains_ground() {
    let pos = Position::new();
    let outcome = search(&pos, 1);
    assert!(outcome.score > 0);
    let next = outcome.next.unwrap();
    assert!(next.count(Player::White) > pos.count(Player::White));
    assert_eq!(next.to_move(), Player::Black);
}

// =============================================================================
// Notation
// =============================================================================

#[test]
fn test_every_successor_can_be_typed() {
    for pos in random_walk(21, 30) {
        for m in legal_moves(&pos) {
            let text = move_string(&pos, &m).unwrap();
            assert_eq!(play_text(&pos, &text), Ok(m), "move {text}");
            assert_eq!(play_text(&pos, &text.to_lowercase()), Ok(m));
        }
    }
}

#[test]
fn test_engine_move_string() {
    let pos = Position::new();
    let next = search(&pos, 1).next.unwrap();
    // The first spawn in generation order is next to the top-left corner.
    assert_eq!(move_string(&pos, &next).unwrap(), "B0");
}
