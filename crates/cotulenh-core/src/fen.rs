//! Position text parsing and serialization.
//!
//! The format follows FEN: 12 ranks from rank 12 down to rank 1 separated by
//! `/`, then the side to move (`r` or `b`), two `-` placeholders, the
//! half-move clock and the move number. Within a rank, digits count empty
//! squares (`11` is a whole empty rank), uppercase letters are Red and
//! lowercase Blue. A `+` before a piece marks it heroic and a parenthesized
//! group is a stack, carrier first: `(NFT)` is a navy carrying an air force
//! and a tank.

use crate::{Color, File, Piece, PieceKind, Rank, Square};
use thiserror::Error;

/// Errors that can occur when parsing position text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid position: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: expected 12 ranks, got {0}")]
    InvalidRankCount(usize),

    #[error("invalid piece placement: rank {rank} has {count} squares, expected 11")]
    InvalidSquareCount { rank: u8, count: u32 },

    #[error("invalid piece placement: unmatched parenthesis in rank {rank}")]
    UnmatchedParenthesis { rank: u8 },

    #[error("invalid piece placement: nested stack in rank {rank}")]
    NestedStack { rank: u8 },

    #[error("invalid piece placement: empty stack in rank {rank}")]
    EmptyStack { rank: u8 },

    #[error("invalid piece placement: heroic marker without a piece in rank {rank}")]
    HeroicWithoutPiece { rank: u8 },

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'r' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid placeholder field: expected '-', got '{0}'")]
    InvalidPlaceholder(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid move number: {0}")]
    InvalidMoveNumber(String),
}

/// A piece read from the placement field, with its square and heroic marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedPiece {
    pub square: Square,
    pub piece: Piece,
    pub heroic: bool,
}

/// Parsed position text.
///
/// Holds the validated fields and the decoded placement. The engine turns
/// this into its own board representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Piece placement string, rank 12 first.
    pub piece_placement: String,
    /// Side to move.
    pub active_color: Color,
    /// Half-moves since the last capture or foot-unit move.
    pub halfmove_clock: u32,
    /// Move number, starting at 1 and incremented after Blue moves.
    pub move_number: u32,
    /// Every piece in the placement field, rank 12 first.
    pub pieces: Vec<PlacedPiece>,
}

impl FenParser {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "6c4/1n2fh1hf2/3a2s2a1/2n1gt1tg2/2ie2m3i/11/11/2IE2M3I/2N1GT1TG2/3A2S2A1/1N2FH1HF2/6C4 r - - 0 1";

    /// Parses position text.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let piece_placement = parts[0];
        let pieces = Self::parse_piece_placement(piece_placement)?;

        let active_color = match parts[1] {
            "r" => Color::Red,
            "b" => Color::Blue,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        for placeholder in &parts[2..4] {
            if *placeholder != "-" {
                return Err(FenError::InvalidPlaceholder(placeholder.to_string()));
            }
        }

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let move_number = parts[5]
            .parse::<u32>()
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| FenError::InvalidMoveNumber(parts[5].to_string()))?;

        Ok(FenParser {
            piece_placement: piece_placement.to_string(),
            active_color,
            halfmove_clock,
            move_number,
            pieces,
        })
    }

    fn parse_piece_placement(placement: &str) -> Result<Vec<PlacedPiece>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != Rank::ALL.len() {
            return Err(FenError::InvalidRankCount(ranks.len()));
        }

        let mut pieces = Vec::new();
        for (i, text) in ranks.iter().enumerate() {
            // ranks are listed from the top
            let rank_index = (Rank::ALL.len() - 1 - i) as u8;
            let rank_number = rank_index + 1;
            Self::parse_rank(text, rank_index, rank_number, &mut pieces)?;
        }
        Ok(pieces)
    }

    fn parse_rank(
        text: &str,
        rank_index: u8,
        rank_number: u8,
        pieces: &mut Vec<PlacedPiece>,
    ) -> Result<(), FenError> {
        let mut count: u32 = 0;
        let mut empty_run: u32 = 0;
        let mut heroic = false;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if let Some(d) = c.to_digit(10) {
                if heroic {
                    return Err(FenError::HeroicWithoutPiece { rank: rank_number });
                }
                empty_run = empty_run * 10 + d;
                if count + empty_run > File::ALL.len() as u32 {
                    return Err(FenError::InvalidSquareCount {
                        rank: rank_number,
                        count: count + empty_run,
                    });
                }
                if chars.peek().map_or(true, |n| !n.is_ascii_digit()) {
                    count += empty_run;
                    empty_run = 0;
                }
                continue;
            }

            match c {
                '+' => {
                    if heroic {
                        return Err(FenError::HeroicWithoutPiece { rank: rank_number });
                    }
                    heroic = true;
                    continue;
                }
                '(' => {
                    let mut members = Vec::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        match inner {
                            ')' => {
                                closed = true;
                                break;
                            }
                            '(' => return Err(FenError::NestedStack { rank: rank_number }),
                            _ => members.push(Self::piece_char(inner, rank_number)?),
                        }
                    }
                    if !closed {
                        return Err(FenError::UnmatchedParenthesis { rank: rank_number });
                    }
                    let Some(&(kind, color)) = members.first() else {
                        return Err(FenError::EmptyStack { rank: rank_number });
                    };
                    if members.iter().any(|&(_, c)| c != color) {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "stack mixes colors in rank {}",
                            rank_number
                        )));
                    }
                    let carried = members[1..].iter().map(|&(k, _)| k).collect();
                    let square = Self::square_at(count, rank_index, rank_number)?;
                    pieces.push(PlacedPiece {
                        square,
                        piece: Piece::with_carried(kind, color, carried),
                        heroic,
                    });
                }
                ')' => return Err(FenError::UnmatchedParenthesis { rank: rank_number }),
                _ => {
                    let (kind, color) = Self::piece_char(c, rank_number)?;
                    let square = Self::square_at(count, rank_index, rank_number)?;
                    pieces.push(PlacedPiece {
                        square,
                        piece: Piece::new(kind, color),
                        heroic,
                    });
                }
            }
            heroic = false;
            count += 1;
        }

        if heroic {
            return Err(FenError::HeroicWithoutPiece { rank: rank_number });
        }
        if count != File::ALL.len() as u32 {
            return Err(FenError::InvalidSquareCount {
                rank: rank_number,
                count,
            });
        }
        Ok(())
    }

    fn piece_char(c: char, rank_number: u8) -> Result<(PieceKind, Color), FenError> {
        PieceKind::from_fen_char(c).ok_or_else(|| {
            FenError::InvalidPiecePlacement(format!(
                "invalid character '{}' in rank {}",
                c, rank_number
            ))
        })
    }

    fn square_at(count: u32, rank_index: u8, rank_number: u8) -> Result<Square, FenError> {
        let too_many = || FenError::InvalidSquareCount {
            rank: rank_number,
            count: count + 1,
        };
        let file = u8::try_from(count)
            .ok()
            .and_then(File::from_index)
            .ok_or_else(too_many)?;
        let rank = Rank::from_index(rank_index).ok_or_else(too_many)?;
        Ok(Square::new(file, rank))
    }

    /// Converts the parsed position back to text.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} - - {} {}",
            self.piece_placement,
            self.active_color.to_fen_char(),
            self.halfmove_clock,
            self.move_number
        )
    }
}

impl Default for FenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

/// Builds a placement field from a per-square lookup returning the occupant
/// and whether it is heroic.
pub fn encode_placement<F>(occupant: F) -> String
where
    F: Fn(Square) -> Option<(Piece, bool)>,
{
    let mut out = String::new();
    for (i, rank) in Rank::ALL.iter().rev().enumerate() {
        if i > 0 {
            out.push('/');
        }
        let mut empty = 0;
        for file in File::ALL {
            let Some((piece, heroic)) = occupant(Square::new(file, *rank)) else {
                empty += 1;
                continue;
            };
            if empty > 0 {
                out.push_str(&empty.to_string());
                empty = 0;
            }
            if heroic {
                out.push('+');
            }
            if piece.is_stack() {
                out.push('(');
                out.push(piece.kind.to_fen_char(piece.color));
                for kind in &piece.carried {
                    out.push(kind.to_fen_char(piece.color));
                }
                out.push(')');
            } else {
                out.push(piece.kind.to_fen_char(piece.color));
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn parse_startpos() {
        let fen = FenParser::parse(FenParser::STARTPOS).unwrap();
        assert_eq!(fen.active_color, Color::Red);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.move_number, 1);
        assert_eq!(fen.pieces.len(), 36);

        let blue_commander = &fen.pieces[0];
        assert_eq!(blue_commander.square, sq("g12"));
        assert_eq!(
            blue_commander.piece,
            Piece::new(PieceKind::Commander, Color::Blue)
        );

        let red_navy = fen.pieces.iter().find(|p| p.square == sq("b2")).unwrap();
        assert_eq!(red_navy.piece, Piece::new(PieceKind::Navy, Color::Red));
    }

    #[test]
    fn parse_stack_and_heroic() {
        let fen = FenParser::parse("11/11/11/11/11/11/11/11/11/2(NFT)8/4+T6/10c b - - 7 12")
            .unwrap();
        assert_eq!(fen.active_color, Color::Blue);
        assert_eq!(fen.halfmove_clock, 7);
        assert_eq!(fen.move_number, 12);
        assert_eq!(
            fen.pieces[0],
            PlacedPiece {
                square: sq("c3"),
                piece: Piece::with_carried(
                    PieceKind::Navy,
                    Color::Red,
                    vec![PieceKind::AirForce, PieceKind::Tank]
                ),
                heroic: false,
            }
        );
        assert_eq!(fen.pieces[1].square, sq("e2"));
        assert!(fen.pieces[1].heroic);
        assert_eq!(fen.pieces[2].square, sq("k1"));
    }

    #[test]
    fn heroic_stack() {
        let fen = FenParser::parse("11/11/11/11/11/11/11/11/11/11/3+(tf)7/11 r - - 0 1").unwrap();
        assert!(fen.pieces[0].heroic);
        assert_eq!(fen.pieces[0].piece.carried, vec![PieceKind::AirForce]);
    }

    #[test]
    fn roundtrip() {
        let original = "11/11/11/11/11/11/11/11/11/2(NFT)8/4+T6/10c b - - 7 12";
        let parsed = FenParser::parse(original).unwrap();
        assert_eq!(parsed.to_fen(), original);
    }

    #[test]
    fn encode_matches_placement() {
        let parsed = FenParser::default();
        let encoded = encode_placement(|s| {
            parsed
                .pieces
                .iter()
                .find(|p| p.square == s)
                .map(|p| (p.piece.clone(), p.heroic))
        });
        assert_eq!(encoded, parsed.piece_placement);
    }

    #[test]
    fn invalid_part_count() {
        assert!(matches!(
            FenParser::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        ));
    }

    #[test]
    fn invalid_rank_count() {
        assert_eq!(
            FenParser::parse("11/11/11 r - - 0 1"),
            Err(FenError::InvalidRankCount(3))
        );
    }

    #[test]
    fn invalid_square_count() {
        assert_eq!(
            FenParser::parse("10/11/11/11/11/11/11/11/11/11/11/11 r - - 0 1"),
            Err(FenError::InvalidSquareCount { rank: 12, count: 10 })
        );
        assert!(matches!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/11C r - - 0 1"),
            Err(FenError::InvalidSquareCount { rank: 1, .. })
        ));
        assert!(matches!(
            FenParser::parse("99999999999/11/11/11/11/11/11/11/11/11/11/11 r - - 0 1"),
            Err(FenError::InvalidSquareCount { rank: 12, .. })
        ));
        assert_eq!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/6C12 r - - 0 1"),
            Err(FenError::InvalidSquareCount { rank: 1, count: 19 })
        );
    }

    #[test]
    fn invalid_stacks() {
        assert_eq!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/9(NF r - - 0 1"),
            Err(FenError::UnmatchedParenthesis { rank: 1 })
        );
        assert_eq!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/NF)9 r - - 0 1"),
            Err(FenError::UnmatchedParenthesis { rank: 1 })
        );
        assert_eq!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/(N(F))9 r - - 0 1"),
            Err(FenError::NestedStack { rank: 1 })
        );
        assert_eq!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/()10 r - - 0 1"),
            Err(FenError::EmptyStack { rank: 1 })
        );
        assert!(matches!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/(Nf)10 r - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_heroic_marker() {
        assert_eq!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/+11 r - - 0 1"),
            Err(FenError::HeroicWithoutPiece { rank: 1 })
        );
    }

    #[test]
    fn invalid_piece_char() {
        assert!(matches!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/X10 r - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_trailing_fields() {
        assert!(matches!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/11 w - - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
        assert!(matches!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/11 r KQ - 0 1"),
            Err(FenError::InvalidPlaceholder(_))
        ));
        assert!(matches!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/11 r - - x 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            FenParser::parse("11/11/11/11/11/11/11/11/11/11/11/11 r - - 0 0"),
            Err(FenError::InvalidMoveNumber(_))
        ));
    }
}
