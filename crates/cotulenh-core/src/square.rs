//! Board square representation.

use std::fmt;

/// A file (column) on the board, from A to K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
    J = 9,
    K = 10,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 11] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
        File::I,
        File::J,
        File::K,
    ];

    /// Creates a file from index (0-10).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::ALL.len() {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a file from a character ('a'-'k' or 'A'-'K').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        if c >= 'a' && c <= 'k' {
            Self::from_index(c as u8 - b'a')
        } else {
            None
        }
    }

    /// Returns the index (0-10).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the board, from 1 to 12. Red starts on the low ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
    R9 = 8,
    R10 = 9,
    R11 = 10,
    R12 = 11,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 12] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
        Rank::R9,
        Rank::R10,
        Rank::R11,
        Rank::R12,
    ];

    /// Creates a rank from index (0-11).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::ALL.len() {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a rank from its number as written (1-12).
    #[inline]
    pub const fn from_number(n: u8) -> Option<Self> {
        if n == 0 {
            None
        } else {
            Self::from_index(n - 1)
        }
    }

    /// Returns the index (0-11).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the rank number as written (1-12).
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A square on the board.
///
/// The 11x12 board is embedded in a grid 16 cells wide so that rank and file
/// are a shift and a mask away and a direction is a fixed index offset:
/// - a1 = 0, b1 = 1, ..., k1 = 10
/// - a2 = 16, ..., k12 = 186
///
/// Only indices whose file is below 11 and rank below 12 are valid; the
/// constructors never produce a padding cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Width of the padded grid.
    pub const GRID_WIDTH: u8 = 16;
    /// Number of cells in the padded grid, including padding.
    pub const GRID_SIZE: usize = 256;
    /// Number of playable squares.
    pub const COUNT: usize = 132;

    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * Self::GRID_WIDTH + file.index())
    }

    /// Creates a square from a padded grid index, rejecting padding cells.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        let file = index % Self::GRID_WIDTH;
        let rank = index / Self::GRID_WIDTH;
        if file < 11 && rank < 12 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4", "k12").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = File::from_char(chars.next()?)?;
        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 2 || digits.starts_with('0') {
            return None;
        }
        let n: u8 = digits.parse().ok()?;
        let rank = Rank::from_number(n)?;
        Some(Square::new(file, rank))
    }

    /// Returns the padded grid index.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        match File::from_index(self.0 % Self::GRID_WIDTH) {
            Some(f) => f,
            None => unreachable!(),
        }
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        match Rank::from_index(self.0 / Self::GRID_WIDTH) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Returns the square reached by adding a grid offset, if it is on the board.
    #[inline]
    pub const fn offset(self, delta: i16) -> Option<Self> {
        let target = self.0 as i16 + delta;
        if target < 0 || target >= Self::GRID_SIZE as i16 {
            return None;
        }
        Self::from_index(target as u8)
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Iterates every playable square, a1 first, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| File::ALL.into_iter().map(move |file| Square::new(file, rank)))
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_new() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::R4);
        assert_eq!(e4.index(), 3 * 16 + 4);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::new(File::A, Rank::R1)));
        assert_eq!(Square::from_algebraic("k12"), Some(Square::new(File::K, Rank::R12)));
        assert_eq!(Square::from_algebraic("e10"), Some(Square::new(File::E, Rank::R10)));
        assert_eq!(Square::from_algebraic("l1"), None);
        assert_eq!(Square::from_algebraic("a13"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic("a01"), None);
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::from_algebraic("e"), None);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::new(File::A, Rank::R1).to_algebraic(), "a1");
        assert_eq!(Square::new(File::K, Rank::R12).to_algebraic(), "k12");
        assert_eq!(Square::new(File::E, Rank::R4).to_algebraic(), "e4");
    }

    #[test]
    fn padding_cells_rejected() {
        assert!(Square::from_index(10).is_some());
        assert!(Square::from_index(11).is_none());
        assert!(Square::from_index(15).is_none());
        assert!(Square::from_index(186).is_some());
        assert!(Square::from_index(192).is_none());
    }

    #[test]
    fn offsets_stay_on_board() {
        let a1 = Square::new(File::A, Rank::R1);
        assert_eq!(a1.offset(-1), None);
        assert_eq!(a1.offset(-16), None);
        assert_eq!(a1.offset(16), Some(Square::new(File::A, Rank::R2)));
        assert_eq!(a1.offset(17), Some(Square::new(File::B, Rank::R2)));

        let k12 = Square::new(File::K, Rank::R12);
        assert_eq!(k12.offset(1), None);
        assert_eq!(k12.offset(16), None);
        assert_eq!(k12.offset(-17), Some(Square::new(File::J, Rank::R11)));
    }

    #[test]
    fn all_squares() {
        let squares: Vec<_> = Square::all().collect();
        assert_eq!(squares.len(), Square::COUNT);
        assert_eq!(squares[0].to_algebraic(), "a1");
        assert_eq!(squares[11].to_algebraic(), "a2");
        assert_eq!(squares[Square::COUNT - 1].to_algebraic(), "k12");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        const STEPS: [(i16, i16); 8] = [
            (0, 1),
            (1, 0),
            (0, -1),
            (-1, 0),
            (1, 1),
            (-1, 1),
            (1, -1),
            (-1, -1),
        ];

        proptest! {
            #[test]
            fn algebraic_round_trip(file in 0u8..11, rank in 0u8..12) {
                let sq = Square::new(
                    File::from_index(file).unwrap(),
                    Rank::from_index(rank).unwrap(),
                );
                prop_assert_eq!(Square::from_algebraic(&sq.to_algebraic()), Some(sq));
                prop_assert_eq!(Square::from_index(sq.index()), Some(sq));
            }

            #[test]
            fn offset_matches_file_and_rank_arithmetic(
                file in 0u8..11,
                rank in 0u8..12,
                step in 0usize..8,
                distance in 1i16..4,
            ) {
                let sq = Square::new(
                    File::from_index(file).unwrap(),
                    Rank::from_index(rank).unwrap(),
                );
                let (df, dr) = STEPS[step];
                let delta = (dr * 16 + df) * distance;
                let f = file as i16 + df * distance;
                let r = rank as i16 + dr * distance;
                let expected = if (0..11).contains(&f) && (0..12).contains(&r) {
                    Some(Square::new(
                        File::from_index(f as u8).unwrap(),
                        Rank::from_index(r as u8).unwrap(),
                    ))
                } else {
                    None
                };
                prop_assert_eq!(sq.offset(delta), expected);
            }
        }
    }
}
