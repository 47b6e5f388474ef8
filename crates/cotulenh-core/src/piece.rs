//! Piece and stack representation.

use crate::Color;
use serde::{Deserialize, Serialize};

/// The eleven kinds of Co Tu Lenh pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PieceKind {
    Commander = 0,
    Infantry = 1,
    Tank = 2,
    Militia = 3,
    Engineer = 4,
    Artillery = 5,
    AntiAir = 6,
    Missile = 7,
    AirForce = 8,
    Navy = 9,
    Headquarter = 10,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 11] = [
        PieceKind::Commander,
        PieceKind::Infantry,
        PieceKind::Tank,
        PieceKind::Militia,
        PieceKind::Engineer,
        PieceKind::Artillery,
        PieceKind::AntiAir,
        PieceKind::Missile,
        PieceKind::AirForce,
        PieceKind::Navy,
        PieceKind::Headquarter,
    ];

    /// Returns the index of this kind (0-10).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the position-text character for this kind with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Commander => 'c',
            PieceKind::Infantry => 'i',
            PieceKind::Tank => 't',
            PieceKind::Militia => 'm',
            PieceKind::Engineer => 'e',
            PieceKind::Artillery => 'a',
            PieceKind::AntiAir => 'g',
            PieceKind::Missile => 's',
            PieceKind::AirForce => 'f',
            PieceKind::Navy => 'n',
            PieceKind::Headquarter => 'h',
        };
        match color {
            Color::Red => c.to_ascii_uppercase(),
            Color::Blue => c,
        }
    }

    /// Parses a position-text character into a kind and color.
    pub const fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::Red
        } else {
            Color::Blue
        };
        let kind = match c.to_ascii_lowercase() {
            'c' => PieceKind::Commander,
            'i' => PieceKind::Infantry,
            't' => PieceKind::Tank,
            'm' => PieceKind::Militia,
            'e' => PieceKind::Engineer,
            'a' => PieceKind::Artillery,
            'g' => PieceKind::AntiAir,
            's' => PieceKind::Missile,
            'f' => PieceKind::AirForce,
            'n' => PieceKind::Navy,
            'h' => PieceKind::Headquarter,
            _ => return None,
        };
        Some((kind, color))
    }

    /// Returns true for the artillery-class pieces bound by the river.
    #[inline]
    pub const fn is_heavy(self) -> bool {
        matches!(
            self,
            PieceKind::Artillery | PieceKind::Missile | PieceKind::AntiAir
        )
    }

    /// Returns true for the short-range foot units whose moves reset the half-move clock.
    #[inline]
    pub const fn resets_half_move_clock(self) -> bool {
        matches!(
            self,
            PieceKind::Infantry | PieceKind::Militia | PieceKind::Engineer
        )
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Commander => "Commander",
            PieceKind::Infantry => "Infantry",
            PieceKind::Tank => "Tank",
            PieceKind::Militia => "Militia",
            PieceKind::Engineer => "Engineer",
            PieceKind::Artillery => "Artillery",
            PieceKind::AntiAir => "Anti-Air",
            PieceKind::Missile => "Missile",
            PieceKind::AirForce => "Air Force",
            PieceKind::Navy => "Navy",
            PieceKind::Headquarter => "Headquarter",
        };
        write!(f, "{}", name)
    }
}

/// A piece on the board, possibly carrying other pieces.
///
/// Carried pieces always share the carrier's color and never carry anything
/// themselves, so a stack is at most one level deep.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub carried: Vec<PieceKind>,
}

impl Piece {
    /// Creates a piece that carries nothing.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            carried: Vec::new(),
        }
    }

    /// Creates a carrier stack.
    pub fn with_carried(kind: PieceKind, color: Color, carried: Vec<PieceKind>) -> Self {
        Piece {
            kind,
            color,
            carried,
        }
    }

    /// Returns true if this piece carries at least one other piece.
    #[inline]
    pub fn is_stack(&self) -> bool {
        !self.carried.is_empty()
    }

    /// Returns true if the carrier or any carried piece is of the given kind.
    pub fn contains(&self, kind: PieceKind) -> bool {
        self.kind == kind || self.carried.contains(&kind)
    }

    /// Removes one carried piece of the given kind. Returns false if none was carried.
    pub fn remove_carried(&mut self, kind: PieceKind) -> bool {
        match self.carried.iter().position(|&k| k == kind) {
            Some(idx) => {
                self.carried.remove(idx);
                true
            }
            None => false,
        }
    }
}
