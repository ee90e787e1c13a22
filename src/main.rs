//! Ataxx-Rust: a blob-conversion board game with an alpha-beta opponent.
//!
//! ## Usage
//!
//! - `ataxx-rust` - Play a game with the default sides
//! - `ataxx-rust play --white human --black computer:3` - Choose the sides
//! - `ataxx-rust perft --depth 3` - Count move sequences from the start
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::io;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ataxx_rust::constants::{BLACK_DEPTH, N, WHITE_DEPTH};
use ataxx_rust::game::{Game, GameConfig, GameOutcome, Side};
use ataxx_rust::movegen::perft;
use ataxx_rust::position::Position;

/// Ataxx-Rust: blob-conversion game engine
#[derive(Parser)]
#[command(name = "ataxx-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the terminal
    Play(PlayArgs),
    /// Count move sequences of a given length from the starting position
    Perft {
        /// Number of plies
        #[arg(short, long, default_value_t = 3)]
        depth: u32,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// White (first player): human, random, computer:<depth> or <depth>
    #[arg(long, default_value_t = Side::Computer { depth: WHITE_DEPTH })]
    white: Side,
    /// Black (second player): human, random, computer:<depth> or <depth>
    #[arg(long, default_value_t = Side::Computer { depth: BLACK_DEPTH })]
    black: Side,
    /// Stop after this many plies
    #[arg(long)]
    max_plies: Option<usize>,
    /// Seed for random sides
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for PlayArgs {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            white: config.white,
            black: config.black,
            max_plies: config.max_plies,
            seed: config.seed,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Perft { depth }) => run_perft(depth),
        Some(Commands::Play(args)) => run_game(args),
        None => run_game(PlayArgs::default()),
    }
}

fn run_game(args: PlayArgs) -> Result<()> {
    let config = GameConfig {
        white: args.white,
        black: args.black,
        max_plies: args.max_plies,
        seed: args.seed,
    };
    tracing::info!(white = %config.white, black = %config.black, board = N, "starting game");

    let stdin = io::stdin();
    let mut game = Game::new(config, stdin.lock(), io::stdout());
    match game.run()? {
        GameOutcome::Decided { score } => println!("Game over. Final score: {score}"),
        GameOutcome::PlyLimit { score } => {
            println!("Stopped after {} plies. Score: {score}", game.plies())
        }
        GameOutcome::EndOfInput => {}
    }
    Ok(())
}

fn run_perft(depth: u32) -> Result<()> {
    let pos = Position::new();
    for d in 0..=depth {
        let start = Instant::now();
        let nodes = perft(&pos, d);
        println!(
            "perft({d}) = {nodes} ({:.3}s)",
            start.elapsed().as_secs_f64()
        );
    }
    Ok(())
}
