//! Undo records.

use crate::{DeployState, SquareSet};
use cotulenh_core::{Color, Move, Piece, Square};

/// Everything needed to take back one applied move.
///
/// The two touched squares are saved verbatim along with the heroic table,
/// commander tracking, clocks and deploy state, so undoing a move is a plain
/// restore rather than a reverse computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub(crate) mov: Move,
    pub(crate) heroic: SquareSet,
    pub(crate) commanders: [Option<Square>; 2],
    pub(crate) turn: Color,
    pub(crate) half_moves: u32,
    pub(crate) move_number: u32,
    pub(crate) deploy: Option<DeployState>,
    pub(crate) from_before: Option<Piece>,
    pub(crate) target_before: Option<Piece>,
}

impl HistoryEntry {
    /// The move as applied, including its heroic promotion marker.
    #[inline]
    pub fn mov(&self) -> Move {
        self.mov
    }

    /// The side to move before the move was applied.
    #[inline]
    pub fn turn_before(&self) -> Color {
        self.turn
    }

    /// The deploy state before the move was applied.
    #[inline]
    pub fn deploy_before(&self) -> Option<&DeployState> {
        self.deploy.as_ref()
    }
}
