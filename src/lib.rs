//! Ataxx-Rust: a blob-conversion board game and its alpha-beta opponent.
//!
//! Two players take turns either spawning a new blob next to one of their
//! own, or jumping a blob two cells away. Either way, every adjacent
//! opponent blob changes colour. The engine searches a fixed number of
//! plies with minimax and alpha-beta pruning.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine defaults
//! - [`position`] - Core game logic (board state, spawning, scoring)
//! - [`movegen`] - Legal move generation
//! - [`search`] - Minimax search with alpha-beta pruning
//! - [`notation`] - Move strings and move parsing
//! - [`game`] - Text game loop
//!
//! ## Example
//!
//! ```
//! use ataxx_rust::movegen::legal_moves;
//! use ataxx_rust::notation::move_string;
//! use ataxx_rust::position::Position;
//! use ataxx_rust::search::search;
//!
//! // Create a new game
//! let pos = Position::new();
//! assert_eq!(legal_moves(&pos).len(), 16);
//!
//! // Search two plies deep for White's best move
//! let outcome = search(&pos, 2);
//! let next = outcome.next.unwrap();
//! println!("Best move: {}", move_string(&pos, &next).unwrap());
//! print!("{next}");
//! ```

pub mod constants;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod position;
pub mod search;
