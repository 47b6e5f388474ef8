//! Per-kind movement profiles.

use cotulenh_core::PieceKind;

/// Range used for the commander's unbounded slide. Longer than any line on the board.
pub const UNBOUNDED: u8 = 12;

/// How far and in which directions a piece moves and captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementProfile {
    /// Furthest empty square the piece may move to.
    pub move_range: u8,
    /// Furthest enemy the piece may capture. For the navy this is the
    /// torpedo range against other ships.
    pub capture_range: u8,
    /// Navy gun range against anything that is not a ship.
    pub gun_range: Option<u8>,
    /// Whether the piece walks more than one step along a line.
    pub sliding: bool,
    /// Whether the piece uses the four diagonal directions.
    pub diagonal: bool,
    /// Cap on both ranges along diagonals.
    pub diagonal_limit: Option<u8>,
    /// Capture scanning continues past pieces (artillery, missile).
    pub ignores_capture_blocking: bool,
    /// Movement and capture both pass over pieces and terrain (air force).
    pub ignores_all_blocking: bool,
}

impl MovementProfile {
    const fn step(move_range: u8, diagonal: bool) -> Self {
        MovementProfile {
            move_range,
            capture_range: move_range,
            gun_range: None,
            sliding: false,
            diagonal,
            diagonal_limit: None,
            ignores_capture_blocking: false,
            ignores_all_blocking: false,
        }
    }

    const fn slide(range: u8, diagonal: bool) -> Self {
        MovementProfile {
            sliding: true,
            ..Self::step(range, diagonal)
        }
    }

    /// Returns the profile of a kind, with the heroic bonus applied if requested.
    pub const fn of(kind: PieceKind, heroic: bool) -> Self {
        let base = match kind {
            PieceKind::Commander => MovementProfile {
                capture_range: 1,
                ..Self::slide(UNBOUNDED, true)
            },
            PieceKind::Infantry | PieceKind::Engineer | PieceKind::AntiAir => {
                Self::step(1, false)
            }
            PieceKind::Militia => Self::step(1, true),
            PieceKind::Tank => Self::slide(2, false),
            PieceKind::Artillery => MovementProfile {
                ignores_capture_blocking: true,
                ..Self::slide(3, true)
            },
            PieceKind::Missile => MovementProfile {
                diagonal_limit: Some(1),
                ignores_capture_blocking: true,
                ..Self::slide(2, true)
            },
            PieceKind::AirForce => MovementProfile {
                ignores_all_blocking: true,
                ..Self::slide(4, true)
            },
            PieceKind::Navy => MovementProfile {
                gun_range: Some(3),
                ..Self::slide(4, true)
            },
            PieceKind::Headquarter => Self::step(0, false),
        };
        if heroic {
            base.heroic(kind)
        } else {
            base
        }
    }

    const fn heroic(self, kind: PieceKind) -> Self {
        if self.move_range == 0 {
            // an immobile piece gains a single step in every direction
            return Self::step(1, true);
        }
        let move_range = if self.move_range >= UNBOUNDED {
            UNBOUNDED
        } else {
            self.move_range + 1
        };
        let capture_range = match kind {
            PieceKind::Commander => self.capture_range,
            _ => self.capture_range + 1,
        };
        MovementProfile {
            move_range,
            capture_range,
            gun_range: match self.gun_range {
                Some(r) => Some(r + 1),
                None => None,
            },
            sliding: true,
            diagonal: true,
            diagonal_limit: match self.diagonal_limit {
                Some(r) => Some(r + 1),
                None => None,
            },
            ..self
        }
    }

    /// Returns how many steps to walk along a direction.
    pub fn reach(&self, diagonal: bool) -> u8 {
        if !self.sliding {
            return self.move_range.max(self.capture_range).min(1);
        }
        self.limit(self.move_range.max(self.capture_range), diagonal)
    }

    /// Returns the move range along a direction.
    pub fn move_range(&self, diagonal: bool) -> u8 {
        self.limit(self.move_range, diagonal)
    }

    /// Returns the capture range along a direction against a target of the given kind.
    pub fn capture_range(&self, diagonal: bool, target: PieceKind) -> u8 {
        let range = match (self.gun_range, target) {
            (Some(gun), kind) if kind != PieceKind::Navy => gun,
            _ => self.capture_range,
        };
        self.limit(range, diagonal)
    }

    fn limit(&self, range: u8, diagonal: bool) -> u8 {
        match self.diagonal_limit {
            Some(cap) if diagonal => range.min(cap),
            _ => range,
        }
    }
}
