//! Piece placement, heroic side table and commander tracking.

use crate::SquareSet;
use cotulenh_core::{Color, Piece, PieceKind, Square};

/// Board state: what stands on each square, which occupants are heroic, and
/// where each side's commander is.
///
/// Heroic status belongs to the square rather than to the [`Piece`] value so
/// that moving a stack and discarding a captured piece can treat it
/// independently. A commander carried inside a stack is tracked at the
/// stack's square.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; Square::GRID_SIZE],
    heroic: SquareSet,
    commanders: [Option<Square>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Board {
            squares: std::array::from_fn(|_| None),
            heroic: SquareSet::EMPTY,
            commanders: [None; 2],
        }
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.index() as usize].as_ref()
    }

    /// Returns true if the occupant of a square is heroic.
    #[inline]
    pub fn is_heroic(&self, sq: Square) -> bool {
        self.heroic.contains(sq)
    }

    /// Returns the heroic side table.
    #[inline]
    pub fn heroic(&self) -> SquareSet {
        self.heroic
    }

    /// Returns the square holding the given side's commander, if it is on the board.
    #[inline]
    pub fn commander(&self, color: Color) -> Option<Square> {
        self.commanders[color.index()]
    }

    /// Iterates the squares and pieces of one side.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, &Piece)> {
        Square::all().filter_map(move |sq| match self.get(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Places a piece, replacing any occupant and clearing the square's heroic status.
    ///
    /// Returns false and leaves the board unchanged if the piece would give
    /// its side a second commander.
    pub fn put(&mut self, piece: Piece, sq: Square) -> bool {
        if piece.contains(PieceKind::Commander) {
            if let Some(existing) = self.commander(piece.color) {
                if existing != sq {
                    tracing::warn!(
                        "refusing to put a second {} commander on {} (already on {})",
                        piece.color,
                        sq,
                        existing
                    );
                    return false;
                }
            }
        }
        self.take(sq);
        self.heroic.remove(sq);
        self.place(sq, piece);
        true
    }

    /// Removes and returns the piece on a square, clearing its heroic status.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.heroic.remove(sq);
        self.take(sq)
    }

    /// Sets the heroic status of a square. Has no effect on an empty square.
    pub fn set_heroic(&mut self, sq: Square, heroic: bool) {
        if self.get(sq).is_some() || !heroic {
            self.heroic.set(sq, heroic);
        }
    }

    /// Removes every piece and heroic marker.
    pub fn clear(&mut self) {
        *self = Board::new();
    }

    /// Writes a piece to a square without touching heroic status, keeping
    /// commander tracking in step.
    pub(crate) fn place(&mut self, sq: Square, piece: Piece) {
        if piece.contains(PieceKind::Commander) {
            self.commanders[piece.color.index()] = Some(sq);
        }
        self.squares[sq.index() as usize] = Some(piece);
    }

    /// Empties a square without touching heroic status, keeping commander
    /// tracking in step.
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.index() as usize].take()?;
        if self.commanders[piece.color.index()] == Some(sq) {
            self.commanders[piece.color.index()] = None;
        }
        Some(piece)
    }

    /// Replaces the whole heroic side table.
    pub(crate) fn restore_heroic(&mut self, heroic: SquareSet) {
        self.heroic = heroic;
    }

    /// Replaces the commander tracking.
    pub(crate) fn restore_commanders(&mut self, commanders: [Option<Square>; 2]) {
        self.commanders = commanders;
    }

    /// Returns the commander tracking for both sides.
    pub(crate) fn commanders(&self) -> [Option<Square>; 2] {
        self.commanders
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for sq in Square::all() {
            if let Some(piece) = self.get(sq) {
                map.entry(&sq, piece);
            }
        }
        map.finish()
    }
}
