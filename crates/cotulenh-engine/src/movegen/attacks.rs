//! Attack detection.
//!
//! A square is attacked when some pseudo-legal capture of the attacking side
//! targets it, stay captures included. Deploy restrictions are ignored: a
//! stack threatens with its carrier and with every carried piece, whichever
//! side is mid-deploy.

use super::{pseudo_legal_moves, MoveFilter};
use crate::rules::RulesConfig;
use crate::{Board, SquareSet};
use cotulenh_core::{Color, Square};

/// Returns every square `by` could capture on.
pub fn attacked_squares(board: &Board, by: Color, config: &RulesConfig) -> SquareSet {
    pseudo_legal_moves(board, by, None, &MoveFilter::default(), config)
        .iter()
        .filter(|m| m.is_capture())
        .map(|m| m.target())
        .collect()
}

/// Returns true if `by` could capture on `sq`.
pub fn is_attacked(board: &Board, sq: Square, by: Color, config: &RulesConfig) -> bool {
    attacked_squares(board, by, config).contains(sq)
}
