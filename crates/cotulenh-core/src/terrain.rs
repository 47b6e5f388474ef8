//! Static terrain classification of the board.
//!
//! Every square carries two independent properties: whether navy units may
//! stand on it and whether land units may stand on it. Files a and b are open
//! water, file c is the coastline that both may use, and files d through k are
//! land. The river between ranks 6 and 7 is navigable at d6, e6, d7 and e7.
//!
//! Heavy pieces (artillery, anti-air, missile) live in one half of the board
//! and cross the river only over a bridge, f6-f7 or h6-h7.

use crate::{File, Rank, Square};

const NAVY: u8 = 1;
const LAND: u8 = 2;
const BRIDGE: u8 = 4;

const TERRAIN: [u8; Square::GRID_SIZE] = build_terrain();

const fn build_terrain() -> [u8; Square::GRID_SIZE] {
    let mut table = [0u8; Square::GRID_SIZE];
    let mut rank = 0u8;
    while rank < 12 {
        let mut file = 0u8;
        while file < 11 {
            let idx = (rank * Square::GRID_WIDTH + file) as usize;
            let mut bits = 0;
            if file <= File::C.index() {
                bits |= NAVY;
            }
            if file >= File::C.index() {
                bits |= LAND;
            }
            let river_rank = rank == Rank::R6.index() || rank == Rank::R7.index();
            if river_rank && (file == File::D.index() || file == File::E.index()) {
                bits |= NAVY;
            }
            if river_rank && (file == File::F.index() || file == File::H.index()) {
                bits |= BRIDGE;
            }
            table[idx] = bits;
            file += 1;
        }
        rank += 1;
    }
    table
}

/// One of the two halves of the board separated by the river.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeavyZone {
    /// Ranks 1 through 6.
    Lower,
    /// Ranks 7 through 12.
    Upper,
}

#[inline]
const fn bits(sq: Square) -> u8 {
    TERRAIN[sq.index() as usize]
}

/// Returns true if a navy unit may stand on this square.
#[inline]
pub const fn is_navy_navigable(sq: Square) -> bool {
    bits(sq) & NAVY != 0
}

/// Returns true if a land unit may stand on this square.
#[inline]
pub const fn is_land_navigable(sq: Square) -> bool {
    bits(sq) & LAND != 0
}

/// Returns true for squares usable by both navy and land units.
#[inline]
pub const fn is_coast(sq: Square) -> bool {
    is_navy_navigable(sq) && is_land_navigable(sq)
}

/// Returns true for squares only navy units may stand on.
#[inline]
pub const fn is_pure_water(sq: Square) -> bool {
    is_navy_navigable(sq) && !is_land_navigable(sq)
}

/// Returns true for squares only land units may stand on.
#[inline]
pub const fn is_pure_land(sq: Square) -> bool {
    is_land_navigable(sq) && !is_navy_navigable(sq)
}

/// Returns true for the four bridge squares.
#[inline]
pub const fn is_bridge(sq: Square) -> bool {
    bits(sq) & BRIDGE != 0
}

/// Returns the river half of a land square, or `None` for open water.
#[inline]
pub const fn heavy_zone(sq: Square) -> Option<HeavyZone> {
    if !is_land_navigable(sq) {
        None
    } else if sq.rank().index() <= Rank::R6.index() {
        Some(HeavyZone::Lower)
    } else {
        Some(HeavyZone::Upper)
    }
}

/// Returns true if `from` and `to` lie in different river halves.
pub fn crosses_river_zones(from: Square, to: Square) -> bool {
    match (heavy_zone(from), heavy_zone(to)) {
        (Some(a), Some(b)) => a != b,
        _ => false,
    }
}

/// Returns the grid step that walks from `from` to `to` along a rank, file or
/// diagonal, or `None` if the squares are not aligned.
pub fn line_step(from: Square, to: Square) -> Option<i16> {
    if from == to {
        return None;
    }
    let df = to.file().index() as i16 - from.file().index() as i16;
    let dr = to.rank().index() as i16 - from.rank().index() as i16;
    if df != 0 && dr != 0 && df.abs() != dr.abs() {
        return None;
    }
    Some(dr.signum() * Square::GRID_WIDTH as i16 + df.signum())
}

/// Returns true if the straight path from `from` to `to` crosses the river,
/// and every river crossing on it is a step between the two squares of a bridge.
pub fn path_crosses_bridge(from: Square, to: Square) -> bool {
    let Some(step) = line_step(from, to) else {
        return false;
    };
    let mut crossed = false;
    let mut prev = from;
    while prev != to {
        let Some(next) = prev.offset(step) else {
            return false;
        };
        if crosses_river_zones(prev, next) {
            if !(is_bridge(prev) && is_bridge(next)) {
                return false;
            }
            crossed = true;
        }
        prev = next;
    }
    crossed
}
