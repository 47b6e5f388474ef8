//! Engine error type.

use crate::rules::ConfigError;
use cotulenh_core::{FenError, Move, Square};
use thiserror::Error;

/// Errors returned by [`Game`](crate::Game) operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No piece of the side to move stands on the requested square.
    #[error("no piece of the side to move on {0}")]
    NoPieceToMove(Square),

    /// The move is not in the legal set of the current position.
    #[error("invalid move: {0}")]
    InvalidMove(Move),

    /// The board disagreed with the move being applied. The mutation was
    /// aborted and the position is unchanged.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
