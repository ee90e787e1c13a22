//! Text game loop.
//!
//! Alternates turns between two configured sides, printing the board after
//! every ply. Each side is a human typing moves, a random mover, or the
//! alpha-beta engine at a fixed depth.
//!
//! Human moves are read one per line after a `> ` prompt. Malformed or
//! illegal input is reported and prompted again; end of input ends the
//! game. A side with no legal move passes automatically.
//!
//! ## Example
//!
//! ```ignore
//! use ataxx_rust::game::{Game, GameConfig};
//! let stdin = std::io::stdin();
//! let mut game = Game::new(GameConfig::default(), stdin.lock(), std::io::stdout());
//! game.run()?;
//! ```

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::{BLACK_DEPTH, WHITE_DEPTH};
use crate::movegen::{has_moves, legal_moves};
use crate::notation::{move_string, play_text};
use crate::position::{Player, Position, Score};
use crate::search::search;

/// Who plays one colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Moves are read from the input stream
    Human,
    /// A uniformly random legal move
    Random,
    /// Alpha-beta search to a fixed depth
    Computer { depth: u32 },
}

/// Unparseable side specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SideError {
    #[error("unknown side {0:?}, expected human, random, computer:<depth> or <depth>")]
    Unknown(String),
    #[error("search depth must be at least 1")]
    ZeroDepth,
}

impl FromStr for Side {
    type Err = SideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let depth = match s.as_str() {
            "human" => return Ok(Side::Human),
            "random" => return Ok(Side::Random),
            other => other.strip_prefix("computer:").unwrap_or(other),
        };
        match depth.parse::<u32>() {
            Ok(0) => Err(SideError::ZeroDepth),
            Ok(depth) => Ok(Side::Computer { depth }),
            Err(_) => Err(SideError::Unknown(s)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => write!(f, "human"),
            Side::Random => write!(f, "random"),
            Side::Computer { depth } => write!(f, "computer:{depth}"),
        }
    }
}

/// Game settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub white: Side,
    pub black: Side,
    /// Stop after this many plies (passes included)
    pub max_plies: Option<usize>,
    /// Seed for the random side
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            white: Side::Computer { depth: WHITE_DEPTH },
            black: Side::Computer { depth: BLACK_DEPTH },
            max_plies: None,
            seed: None,
        }
    }
}

impl GameConfig {
    fn side(&self, player: Player) -> Side {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The score saturated
    Decided { score: Score },
    /// Input ran out while a human was to move
    EndOfInput,
    /// The ply limit was reached
    PlyLimit { score: Score },
}

/// A game in progress.
pub struct Game<R, W> {
    pos: Position,
    config: GameConfig,
    input: R,
    output: W,
    rng: fastrand::Rng,
    plies: usize,
    move_number: usize,
}

impl<R: BufRead, W: Write> Game<R, W> {
    /// Start from the initial position.
    pub fn new(config: GameConfig, input: R, output: W) -> Self {
        Self::with_position(Position::new(), config, input, output)
    }

    /// Start from an arbitrary position.
    pub fn with_position(pos: Position, config: GameConfig, input: R, output: W) -> Self {
        let rng = config
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self {
            pos,
            config,
            input,
            output,
            rng,
            plies: 0,
            move_number: 0,
        }
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Number of plies played so far.
    pub fn plies(&self) -> usize {
        self.plies
    }

    /// Play until the game is decided, the ply limit is hit, or input ends.
    pub fn run(&mut self) -> Result<GameOutcome> {
        write!(self.output, "{}", self.pos)?;
        loop {
            if self.pos.is_game_over() {
                let score = self.pos.score();
                info!(score, plies = self.plies, "game decided");
                return Ok(GameOutcome::Decided { score });
            }
            if self.config.max_plies.is_some_and(|limit| self.plies >= limit) {
                let score = self.pos.score();
                info!(score, plies = self.plies, "ply limit reached");
                return Ok(GameOutcome::PlyLimit { score });
            }

            if self.pos.to_move() == Player::White {
                writeln!(self.output, "======== Move {} ========", self.move_number)?;
                self.move_number += 1;
            }
            if !self.play_turn()? {
                info!(plies = self.plies, "end of input");
                return Ok(GameOutcome::EndOfInput);
            }
            write!(self.output, "{}", self.pos)?;
            self.output.flush()?;
        }
    }

    /// Play one ply. Returns `false` if input ended before a human moved.
    fn play_turn(&mut self) -> Result<bool> {
        let player = self.pos.to_move();
        let side = self.config.side(player);
        let started = Instant::now();

        let (next, announce) = if !has_moves(&self.pos) {
            (self.pos.passed(), true)
        } else {
            match side {
                Side::Human => match self.read_human_move()? {
                    Some(next) => (next, false),
                    None => return Ok(false),
                },
                Side::Random => {
                    let moves = legal_moves(&self.pos);
                    (moves[self.rng.usize(..moves.len())], true)
                }
                Side::Computer { depth } => {
                    let outcome = search(&self.pos, depth);
                    let next = outcome.next.context("search returned no move")?;
                    (next, true)
                }
            }
        };

        let notation = move_string(&self.pos, &next).unwrap_or_else(|_| "pass".to_string());
        if announce {
            writeln!(self.output, "> {notation}")?;
        }
        info!(
            %player,
            %side,
            notation = notation.as_str(),
            score = next.score(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "ply played"
        );

        self.pos = next;
        self.plies += 1;
        Ok(true)
    }

    /// Prompt until a legal move is entered. `None` on end of input.
    fn read_human_move(&mut self) -> Result<Option<Position>> {
        let mut bytes = Vec::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            bytes.clear();
            let read = self
                .input
                .read_until(b'\n', &mut bytes)
                .context("failed to read move")?;
            if read == 0 {
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&bytes);
            match play_text(&self.pos, &line) {
                Ok(next) => return Ok(Some(next)),
                Err(err) => {
                    debug!(input = line.trim(), %err, "move rejected");
                    writeln!(self.output, "{err}")?;
                }
            }
        }
    }
}
