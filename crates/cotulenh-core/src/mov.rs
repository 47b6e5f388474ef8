//! Move representation.

use crate::{Color, PieceKind, Square};
use std::fmt;

/// What a move does to the board besides leaving its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Move to an empty square.
    Quiet { to: Square },
    /// Capture that takes the victim's square.
    Capture { to: Square, captured: PieceKind },
    /// Capture that removes the victim while the attacker stays at `from`.
    StayCapture { target: Square, captured: PieceKind },
}

/// A move for one piece.
///
/// A deploy move takes one carried piece off the stack at `from`; the carrier
/// and the rest of the stack stay behind. A non-deploy move moves the whole
/// stack.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    color: Color,
    piece: PieceKind,
    from: Square,
    kind: MoveKind,
    deploy: bool,
    heroic_promotion: bool,
}

impl Move {
    /// Creates a move.
    #[inline]
    pub const fn new(
        color: Color,
        piece: PieceKind,
        from: Square,
        kind: MoveKind,
        deploy: bool,
    ) -> Self {
        Move {
            color,
            piece,
            from,
            kind,
            deploy,
            heroic_promotion: false,
        }
    }

    /// Creates a move to an empty square.
    #[inline]
    pub const fn quiet(color: Color, piece: PieceKind, from: Square, to: Square) -> Self {
        Self::new(color, piece, from, MoveKind::Quiet { to }, false)
    }

    /// Creates a replace capture.
    #[inline]
    pub const fn capture(
        color: Color,
        piece: PieceKind,
        from: Square,
        to: Square,
        captured: PieceKind,
    ) -> Self {
        Self::new(color, piece, from, MoveKind::Capture { to, captured }, false)
    }

    /// Creates a stay capture.
    #[inline]
    pub const fn stay_capture(
        color: Color,
        piece: PieceKind,
        from: Square,
        target: Square,
        captured: PieceKind,
    ) -> Self {
        Self::new(
            color,
            piece,
            from,
            MoveKind::StayCapture { target, captured },
            false,
        )
    }

    /// Returns the same move marked as a deploy from a stack.
    #[inline]
    pub const fn as_deploy(mut self) -> Self {
        self.deploy = true;
        self
    }

    /// Returns the same move marked as having promoted its piece to heroic.
    #[inline]
    pub const fn with_heroic_promotion(mut self) -> Self {
        self.heroic_promotion = true;
        self
    }

    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    #[inline]
    pub const fn piece(self) -> PieceKind {
        self.piece
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Returns where the moving piece ends up. For a stay capture this is `from`.
    #[inline]
    pub const fn to(self) -> Square {
        match self.kind {
            MoveKind::Quiet { to } | MoveKind::Capture { to, .. } => to,
            MoveKind::StayCapture { .. } => self.from,
        }
    }

    /// Returns the square the move acts on: the destination, or the square
    /// whose occupant a stay capture removes.
    #[inline]
    pub const fn target(self) -> Square {
        match self.kind {
            MoveKind::Quiet { to } | MoveKind::Capture { to, .. } => to,
            MoveKind::StayCapture { target, .. } => target,
        }
    }

    /// Returns the kind of the captured piece, if any.
    #[inline]
    pub const fn captured(self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Quiet { .. } => None,
            MoveKind::Capture { captured, .. } | MoveKind::StayCapture { captured, .. } => {
                Some(captured)
            }
        }
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        !matches!(self.kind, MoveKind::Quiet { .. })
    }

    #[inline]
    pub const fn is_stay_capture(self) -> bool {
        matches!(self.kind, MoveKind::StayCapture { .. })
    }

    #[inline]
    pub const fn is_deploy(self) -> bool {
        self.deploy
    }

    #[inline]
    pub const fn is_heroic_promotion(self) -> bool {
        self.heroic_promotion
    }

    /// Returns true if both moves perform the same action, ignoring whether
    /// the move promoted its piece.
    pub fn same_action(self, other: Move) -> bool {
        self.color == other.color
            && self.piece == other.piece
            && self.from == other.from
            && self.kind == other.kind
            && self.deploy == other.deploy
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deploy {
            write!(f, ">")?;
        }
        write!(f, "{}{}", self.piece.to_fen_char(Color::Red), self.from)?;
        match self.kind {
            MoveKind::Quiet { to } => write!(f, "-{}", to)?,
            MoveKind::Capture { to, .. } => write!(f, "x{}", to)?,
            MoveKind::StayCapture { target, .. } => write!(f, "x{}=", target)?,
        }
        if self.heroic_promotion {
            write!(f, "*")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn quiet_move() {
        let m = Move::quiet(Color::Red, PieceKind::Tank, sq("e4"), sq("e6"));
        assert_eq!(m.to(), sq("e6"));
        assert_eq!(m.target(), sq("e6"));
        assert_eq!(m.captured(), None);
        assert!(!m.is_capture());
        assert_eq!(m.to_string(), "Te4-e6");
    }

    #[test]
    fn stay_capture_stays_home() {
        let m = Move::stay_capture(
            Color::Red,
            PieceKind::AirForce,
            sq("d2"),
            sq("b2"),
            PieceKind::Navy,
        );
        assert_eq!(m.to(), sq("d2"));
        assert_eq!(m.target(), sq("b2"));
        assert_eq!(m.captured(), Some(PieceKind::Navy));
        assert!(m.is_capture());
        assert!(m.is_stay_capture());
        assert_eq!(m.to_string(), "Fd2xb2=");
    }

    #[test]
    fn deploy_and_heroic_markers() {
        let m = Move::capture(
            Color::Blue,
            PieceKind::Tank,
            sq("c3"),
            sq("c5"),
            PieceKind::Infantry,
        )
        .as_deploy()
        .with_heroic_promotion();
        assert!(m.is_deploy());
        assert!(m.is_heroic_promotion());
        assert_eq!(m.to_string(), ">Tc3xc5*");
    }

    #[test]
    fn same_action_ignores_promotion() {
        let m = Move::quiet(Color::Red, PieceKind::Tank, sq("d6"), sq("d8"));
        assert!(m.same_action(m.with_heroic_promotion()));
        assert_ne!(m, m.with_heroic_promotion());
        assert!(!m.same_action(m.as_deploy()));
    }
}
