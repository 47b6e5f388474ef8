//! Deploy state for a stack that is being split up during a turn.

use crate::Board;
use cotulenh_core::{Color, PieceKind, Square};

/// A side in the middle of deploying pieces off the stack at `square`.
///
/// While this exists, that side may only move from `square`: either another
/// carried piece deploys, or the carrier moves and ends the turn. Carried
/// kinds in `stayed` made a stay capture from the stack this turn and remain
/// carried without further actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeployState {
    pub square: Square,
    pub color: Color,
    pub stayed: Vec<PieceKind>,
}

impl DeployState {
    /// Starts deploying from the stack at `square`.
    pub fn new(square: Square, color: Color) -> Self {
        DeployState {
            square,
            color,
            stayed: Vec::new(),
        }
    }

    /// Returns true if a carried piece of this kind has already acted in place.
    #[inline]
    pub fn has_stayed(&self, kind: PieceKind) -> bool {
        self.stayed.contains(&kind)
    }

    /// Returns the carried kinds on the stack that may still deploy, without duplicates.
    pub fn deployable(&self, board: &Board) -> Vec<PieceKind> {
        let Some(stack) = board.get(self.square) else {
            return Vec::new();
        };
        deployable_kinds(&stack.carried, &self.stayed)
    }
}

/// Returns the distinct carried kinds that have not yet acted in place.
pub(crate) fn deployable_kinds(carried: &[PieceKind], stayed: &[PieceKind]) -> Vec<PieceKind> {
    let mut kinds = Vec::with_capacity(carried.len());
    for &kind in carried {
        if !stayed.contains(&kind) && !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}
