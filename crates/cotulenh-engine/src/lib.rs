//! Rules engine for Co Tu Lenh.
//!
//! This crate provides:
//! - [`Board`] - piece placement with the heroic side table and commander tracking
//! - [`Game`] - the full game state: make/unmake with undo history, legal move
//!   generation, check, checkmate, stalemate and the fifty-move rule
//! - [`DeployState`] - the multi-step turn of a stack deploying its pieces
//! - [`RulesConfig`] - tunable rule settings loadable from TOML
//! - Move generation over terrain, including stay captures
//!
//! # Architecture
//!
//! The board is a 16-wide padded grid so that every direction is a fixed
//! index offset. Move generation walks each piece outward along its
//! directions under its movement profile, and capture resolution decides
//! from terrain whether a capture replaces its victim or leaves the attacker
//! in place. Legality is checked by playing a move, testing the mover's
//! commander, and unmaking it.
//!
//! # Example
//!
//! ```
//! use cotulenh_engine::Game;
//!
//! let mut game = Game::new();
//! let moves = game.moves();
//! println!("Legal moves from the starting position: {}", moves.len());
//!
//! let first = moves[0];
//! game.make_move(first).unwrap();
//! game.unmake_move();
//! assert_eq!(game.fen(), cotulenh_core::FenParser::STARTPOS);
//! ```

mod board;
mod deploy;
mod error;
mod game;
mod history;
pub mod movegen;
pub mod rules;
mod square_set;

pub use board::Board;
pub use deploy::DeployState;
pub use error::EngineError;
pub use game::Game;
pub use history::HistoryEntry;
pub use movegen::{
    attacked_squares, can_occupy, is_attacked, pseudo_legal_moves, MoveFilter, MoveList,
    MovementProfile,
};
pub use rules::{ConfigError, DrawReason, GameResult, RulesConfig};
pub use square_set::SquareSet;
