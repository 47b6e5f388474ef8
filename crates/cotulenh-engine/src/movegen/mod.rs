//! Move generation.
//!
//! Pieces walk the padded grid one step at a time along each of their
//! directions. What stops a walk depends on the piece: most stop at the
//! first piece or at terrain they cannot stand on, artillery and missiles
//! keep scanning for captures, and the air force flies over everything.
//! Captures are then resolved into replace or stay captures by terrain.

mod attacks;
mod capture;
pub mod perft;
mod profile;

use crate::deploy::deployable_kinds;
use crate::rules::RulesConfig;
use crate::{Board, DeployState};
use cotulenh_core::terrain::{crosses_river_zones, path_crosses_bridge};
use cotulenh_core::{Color, Move, PieceKind, Square};

pub use attacks::{attacked_squares, is_attacked};
pub use capture::can_occupy;
pub use profile::{MovementProfile, UNBOUNDED};

use capture::{resolve_capture, CaptureCandidate};

const ORTHOGONAL: [i16; 4] = [16, 1, -16, -1];
const DIAGONAL: [i16; 4] = [17, 15, -15, -17];

/// A growable list of moves.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }

    /// Iterates the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Narrows move generation to one square or one kind, and optionally skips
/// the commander-safety filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFilter {
    pub from: Option<Square>,
    pub kind: Option<PieceKind>,
    pub ignore_safety: bool,
}

impl MoveFilter {
    /// Only moves starting on `sq`.
    pub fn from_square(mut self, sq: Square) -> Self {
        self.from = Some(sq);
        self
    }

    /// Only moves of pieces of `kind`, whether carrier or carried.
    pub fn of_kind(mut self, kind: PieceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Keep moves that leave the mover's commander attacked.
    pub fn pseudo_legal(mut self) -> Self {
        self.ignore_safety = true;
        self
    }

    fn allows(&self, from: Square, kind: PieceKind) -> bool {
        self.from.map_or(true, |f| f == from) && self.kind.map_or(true, |k| k == kind)
    }
}

/// One piece about to be walked: the carrier of a square, or a carried
/// piece deploying from it.
#[derive(Debug, Clone, Copy)]
struct Mover {
    color: Color,
    kind: PieceKind,
    from: Square,
    heroic: bool,
    deploy: bool,
}

/// Generates the pseudo-legal moves of `side`, ignoring commander safety.
///
/// When `deploy` belongs to `side`, only the deploying stack may move: its
/// remaining carried kinds, and the carrier itself. Otherwise every piece of
/// `side` contributes its carrier moves and a deploy move set for each
/// distinct carried kind.
pub fn pseudo_legal_moves(
    board: &Board,
    side: Color,
    deploy: Option<&DeployState>,
    filter: &MoveFilter,
    config: &RulesConfig,
) -> MoveList {
    let mut moves = MoveList::new();
    match deploy.filter(|d| d.color == side) {
        Some(state) => {
            stack_moves(board, state.square, &state.stayed, filter, config, &mut moves);
        }
        None => {
            for (sq, _) in board.pieces(side) {
                stack_moves(board, sq, &[], filter, config, &mut moves);
            }
        }
    }
    moves
}

fn stack_moves(
    board: &Board,
    sq: Square,
    stayed: &[PieceKind],
    filter: &MoveFilter,
    config: &RulesConfig,
    moves: &mut MoveList,
) {
    let Some(piece) = board.get(sq) else {
        return;
    };
    if filter.allows(sq, piece.kind) {
        let carrier = Mover {
            color: piece.color,
            kind: piece.kind,
            from: sq,
            heroic: board.is_heroic(sq),
            deploy: false,
        };
        piece_moves(board, carrier, config, moves);
    }
    for kind in deployable_kinds(&piece.carried, stayed) {
        if !filter.allows(sq, kind) {
            continue;
        }
        let carried = Mover {
            color: piece.color,
            kind,
            from: sq,
            heroic: false,
            deploy: true,
        };
        piece_moves(board, carried, config, moves);
    }
}

fn piece_moves(board: &Board, mover: Mover, config: &RulesConfig, moves: &mut MoveList) {
    let profile = MovementProfile::of(mover.kind, mover.heroic);
    for dir in ORTHOGONAL {
        walk(board, mover, &profile, dir, false, config, moves);
    }
    if profile.diagonal {
        for dir in DIAGONAL {
            walk(board, mover, &profile, dir, true, config, moves);
        }
    }
}

fn walk(
    board: &Board,
    mover: Mover,
    profile: &MovementProfile,
    dir: i16,
    diagonal: bool,
    config: &RulesConfig,
    moves: &mut MoveList,
) {
    let mut reach = profile.reach(diagonal);
    let move_range = profile.move_range(diagonal);
    let mut move_blocked = false;
    let mut current = mover.from;
    let mut step = 0u8;

    while step < reach {
        step += 1;
        let Some(sq) = current.offset(dir) else {
            break;
        };
        current = sq;

        match board.get(sq) {
            None => {
                // an empty square the piece may not enter ends the line,
                // for captures as well as moves
                if !can_occupy(mover.kind, sq) {
                    if profile.ignores_all_blocking {
                        continue;
                    }
                    break;
                }
                if mover.kind.is_heavy()
                    && crosses_river_zones(mover.from, sq)
                    && !path_crosses_bridge(mover.from, sq)
                {
                    break;
                }
                if move_blocked || step > move_range {
                    continue;
                }
                let m = Move::quiet(mover.color, mover.kind, mover.from, sq);
                moves.push(if mover.deploy { m.as_deploy() } else { m });
            }
            Some(occupant) if occupant.color == mover.color => {
                if profile.ignores_all_blocking {
                    continue;
                }
                break;
            }
            Some(occupant) => {
                if step <= profile.capture_range(diagonal, occupant.kind) {
                    let candidate = CaptureCandidate {
                        color: mover.color,
                        attacker: mover.kind,
                        from: mover.from,
                        target: sq,
                        victim: occupant.kind,
                        deploy: mover.deploy,
                    };
                    resolve_capture(candidate, config, moves);
                }
                if profile.ignores_all_blocking {
                    continue;
                }
                if profile.ignores_capture_blocking {
                    move_blocked = true;
                    continue;
                }
                if mover.kind == PieceKind::Tank && step == 1 {
                    // a tank may still shoot the square right behind an adjacent enemy
                    move_blocked = true;
                    reach = reach.min(2);
                    continue;
                }
                break;
            }
        }
    }
}
