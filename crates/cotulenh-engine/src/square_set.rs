//! Fixed-size set of squares over the padded grid.
//!
//! One bit per grid cell, so membership is a shift and a mask. Used for the
//! heroic side table and for collecting attacked squares.

use cotulenh_core::Square;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of squares, one bit per padded grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet([u64; 4]);

impl SquareSet {
    /// Empty set.
    pub const EMPTY: SquareSet = SquareSet([0; 4]);

    #[inline]
    const fn slot(sq: Square) -> (usize, u64) {
        let idx = sq.index() as usize;
        (idx / 64, 1u64 << (idx % 64))
    }

    /// Returns true if the set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0
    }

    /// Returns the number of squares in the set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0[0].count_ones()
            + self.0[1].count_ones()
            + self.0[2].count_ones()
            + self.0[3].count_ones()
    }

    /// Returns true if the given square is in the set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        let (word, bit) = Self::slot(sq);
        self.0[word] & bit != 0
    }

    /// Adds the given square.
    #[inline]
    pub fn insert(&mut self, sq: Square) {
        let (word, bit) = Self::slot(sq);
        self.0[word] |= bit;
    }

    /// Removes the given square.
    #[inline]
    pub fn remove(&mut self, sq: Square) {
        let (word, bit) = Self::slot(sq);
        self.0[word] &= !bit;
    }

    /// Adds or removes the given square.
    #[inline]
    pub fn set(&mut self, sq: Square, present: bool) {
        if present {
            self.insert(sq);
        } else {
            self.remove(sq);
        }
    }

    /// Iterates the squares in the set in grid order.
    pub fn iter(self) -> impl Iterator<Item = Square> {
        (0..Square::GRID_SIZE).filter_map(move |idx| {
            let word = self.0[idx / 64];
            if word & (1u64 << (idx % 64)) != 0 {
                Square::from_index(idx as u8)
            } else {
                None
            }
        })
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl BitOr for SquareSet {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        SquareSet([
            self.0[0] | rhs.0[0],
            self.0[1] | rhs.0[1],
            self.0[2] | rhs.0[2],
            self.0[3] | rhs.0[3],
        ])
    }
}

impl BitOrAssign for SquareSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl BitAnd for SquareSet {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        SquareSet([
            self.0[0] & rhs.0[0],
            self.0[1] & rhs.0[1],
            self.0[2] & rhs.0[2],
            self.0[3] & rhs.0[3],
        ])
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn insert_and_remove() {
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());
        set.insert(sq("a1"));
        set.insert(sq("k12"));
        set.insert(sq("e6"));
        assert_eq!(set.count(), 3);
        assert!(set.contains(sq("k12")));
        assert!(!set.contains(sq("k11")));

        set.remove(sq("a1"));
        assert!(!set.contains(sq("a1")));
        assert_eq!(set.count(), 2);
    }

    #[test]
    fn iterates_in_grid_order() {
        let set: SquareSet = [sq("k12"), sq("c3"), sq("a1")].into_iter().collect();
        let squares: Vec<_> = set.iter().collect();
        assert_eq!(squares, vec![sq("a1"), sq("c3"), sq("k12")]);
    }

    #[test]
    fn set_operations() {
        let a: SquareSet = [sq("a1"), sq("b2")].into_iter().collect();
        let b: SquareSet = [sq("b2"), sq("c3")].into_iter().collect();
        assert_eq!((a | b).count(), 3);
        assert_eq!((a & b).iter().collect::<Vec<_>>(), vec![sq("b2")]);
    }
}
