//! Replace-or-stay decision for captures.

use super::MoveList;
use crate::rules::RulesConfig;
use cotulenh_core::terrain::{is_land_navigable, is_navy_navigable};
use cotulenh_core::{Color, Move, PieceKind, Square};

/// Returns true if a piece of this kind may come to rest on the square.
#[inline]
pub fn can_occupy(kind: PieceKind, sq: Square) -> bool {
    match kind {
        PieceKind::Navy => is_navy_navigable(sq),
        _ => is_land_navigable(sq),
    }
}

/// A capture the generator found: who attacks, from where, and what.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CaptureCandidate {
    pub color: Color,
    pub attacker: PieceKind,
    pub from: Square,
    pub target: Square,
    pub victim: PieceKind,
    pub deploy: bool,
}

/// Emits the capture move(s) for a candidate.
///
/// The attacker replaces the victim when it may stand on the victim's
/// square; otherwise it eliminates the victim from where it is. Kinds listed
/// in [`RulesConfig::dual_capture_on_deploy`] get both forms when deploying
/// onto a square they could occupy.
pub(crate) fn resolve_capture(c: CaptureCandidate, config: &RulesConfig, moves: &mut MoveList) {
    let finish = |m: Move| if c.deploy { m.as_deploy() } else { m };

    if can_occupy(c.attacker, c.target) {
        moves.push(finish(Move::capture(
            c.color, c.attacker, c.from, c.target, c.victim,
        )));
        if c.deploy && config.dual_capture_on_deploy(c.attacker) {
            moves.push(finish(Move::stay_capture(
                c.color, c.attacker, c.from, c.target, c.victim,
            )));
        }
    } else {
        moves.push(finish(Move::stay_capture(
            c.color, c.attacker, c.from, c.target, c.victim,
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn candidate(attacker: PieceKind, from: &str, target: &str, deploy: bool) -> CaptureCandidate {
        CaptureCandidate {
            color: Color::Red,
            attacker,
            from: sq(from),
            target: sq(target),
            victim: PieceKind::Navy,
            deploy,
        }
    }

    #[test]
    fn occupancy_by_terrain() {
        assert!(can_occupy(PieceKind::Navy, sq("a1")));
        assert!(can_occupy(PieceKind::Navy, sq("c5")));
        assert!(!can_occupy(PieceKind::Navy, sq("f5")));
        assert!(can_occupy(PieceKind::Tank, sq("c5")));
        assert!(!can_occupy(PieceKind::AirForce, sq("b2")));
    }

    #[test]
    fn land_attacker_on_water_stays() {
        let mut moves = MoveList::new();
        resolve_capture(
            candidate(PieceKind::AirForce, "d2", "b2", false),
            &RulesConfig::default(),
            &mut moves,
        );
        assert_eq!(moves.len(), 1);
        assert!(moves[0].is_stay_capture());
        assert_eq!(moves[0].to(), sq("d2"));
        assert_eq!(moves[0].target(), sq("b2"));
    }

    #[test]
    fn navy_on_coast_replaces() {
        let mut moves = MoveList::new();
        resolve_capture(
            candidate(PieceKind::Navy, "a4", "c4", false),
            &RulesConfig::default(),
            &mut moves,
        );
        assert_eq!(moves.len(), 1);
        assert!(!moves[0].is_stay_capture());
        assert_eq!(moves[0].to(), sq("c4"));
    }

    #[test]
    fn deploying_air_force_gets_both_forms() {
        let mut moves = MoveList::new();
        resolve_capture(
            candidate(PieceKind::AirForce, "c3", "e5", true),
            &RulesConfig::default(),
            &mut moves,
        );
        assert_eq!(moves.len(), 2);
        assert!(moves.as_slice().iter().all(|m| m.is_deploy()));
        assert!(moves[0].is_capture() && !moves[0].is_stay_capture());
        assert!(moves[1].is_stay_capture());
    }

    #[test]
    fn deploying_air_force_over_water_only_stays() {
        let mut moves = MoveList::new();
        resolve_capture(
            candidate(PieceKind::AirForce, "c3", "a3", true),
            &RulesConfig::default(),
            &mut moves,
        );
        assert_eq!(moves.len(), 1);
        assert!(moves[0].is_stay_capture());
    }

    #[test]
    fn deploying_tank_gets_one_form() {
        let mut moves = MoveList::new();
        resolve_capture(
            candidate(PieceKind::Tank, "c3", "c5", true),
            &RulesConfig::default(),
            &mut moves,
        );
        assert_eq!(moves.len(), 1);
        assert!(!moves[0].is_stay_capture());
    }
}
