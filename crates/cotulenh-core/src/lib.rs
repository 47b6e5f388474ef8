//! Core types for Co Tu Lenh.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`PieceKind`], [`Piece`] and [`Color`] for piece and stack representation
//! - [`Square`], [`File`], and [`Rank`] for coordinates on the 11x12 board
//! - [`terrain`] for the static water/land/river classification
//! - [`Move`] and [`MoveKind`] for move representation
//! - Position text parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;
pub mod terrain;

pub use color::Color;
pub use fen::{encode_placement, FenError, FenParser, PlacedPiece};
pub use mov::{Move, MoveKind};
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
