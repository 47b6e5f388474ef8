//! Game state with make/unmake, legality filtering and game-over detection.
//!
//! [`Game`] owns the board, the side to move, the clocks, the deploy state
//! and the undo history. Every change to the position goes through
//! [`Game::make_move`] and [`Game::unmake_move`], or through the setup
//! methods (`put`, `remove`, `load`, `clear`).
//!
//! Legality is decided by really playing each candidate move, asking whether
//! the mover's commander is attacked, and taking the move back. The take-back
//! runs from a drop guard so it happens on every exit path.

use crate::history::HistoryEntry;
use crate::movegen::{is_attacked, pseudo_legal_moves, MoveFilter, MoveList};
use crate::rules::{DrawReason, GameResult, RulesConfig};
use crate::{Board, DeployState, EngineError};
use cotulenh_core::{encode_placement, Color, FenParser, Move, MoveKind, Piece, PieceKind, Square};

/// A game of Co Tu Lenh in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    half_moves: u32,
    move_number: u32,
    deploy: Option<DeployState>,
    history: Vec<HistoryEntry>,
    config: RulesConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game at the standard starting position with standard rules.
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    /// Creates a game at the standard starting position with the given rules.
    pub fn with_config(config: RulesConfig) -> Self {
        let mut game = Self::empty(config);
        game.set_position(&FenParser::default())
            .expect("STARTPOS is valid");
        game
    }

    /// Creates a game with an empty board and Red to move.
    pub fn empty(config: RulesConfig) -> Self {
        Game {
            board: Board::new(),
            turn: Color::Red,
            half_moves: 0,
            move_number: 1,
            deploy: None,
            history: Vec::new(),
            config,
        }
    }

    /// Creates a game from position text with standard rules.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let mut game = Self::empty(RulesConfig::default());
        game.load(fen)?;
        Ok(game)
    }

    /// Replaces the position with the one described by `fen`.
    ///
    /// History and deploy state are cleared. On error the game is unchanged.
    pub fn load(&mut self, fen: &str) -> Result<(), EngineError> {
        let parsed = FenParser::parse(fen)?;
        self.set_position(&parsed)
    }

    fn set_position(&mut self, parsed: &FenParser) -> Result<(), EngineError> {
        let mut board = Board::new();
        for placed in &parsed.pieces {
            if !board.put(placed.piece.clone(), placed.square) {
                return Err(cotulenh_core::FenError::InvalidPiecePlacement(format!(
                    "second {} commander on {}",
                    placed.piece.color, placed.square
                ))
                .into());
            }
            if placed.heroic {
                board.set_heroic(placed.square, true);
            }
        }
        self.board = board;
        self.turn = parsed.active_color;
        self.half_moves = parsed.halfmove_clock;
        self.move_number = parsed.move_number;
        self.deploy = None;
        self.history.clear();
        Ok(())
    }

    /// Returns the position as text.
    pub fn fen(&self) -> String {
        let placement = encode_placement(|sq| {
            self.board
                .get(sq)
                .map(|piece| (piece.clone(), self.board.is_heroic(sq)))
        });
        format!(
            "{} {} - - {} {}",
            placement,
            self.turn.to_fen_char(),
            self.half_moves,
            self.move_number
        )
    }

    /// Empties the board and resets turn, clocks, deploy state and history.
    pub fn clear(&mut self) {
        let config = std::mem::take(&mut self.config);
        *self = Self::empty(config);
    }

    /// Returns the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the rule settings.
    #[inline]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<&Piece> {
        self.board.get(sq)
    }

    /// Places a piece for setup. See [`Board::put`].
    pub fn put(&mut self, piece: Piece, sq: Square) -> bool {
        self.board.put(piece, sq)
    }

    /// Removes a piece for setup.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.board.remove(sq)
    }

    /// Returns true if the occupant of a square is heroic.
    #[inline]
    pub fn is_heroic(&self, sq: Square) -> bool {
        self.board.is_heroic(sq)
    }

    /// Sets the heroic status of a square for setup.
    pub fn set_heroic(&mut self, sq: Square, heroic: bool) {
        self.board.set_heroic(sq, heroic);
    }

    /// Returns the side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Sets the side to move for setup. Any deploy in progress is abandoned.
    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
        self.deploy = None;
    }

    /// Returns the half-move clock.
    #[inline]
    pub fn half_moves(&self) -> u32 {
        self.half_moves
    }

    /// Returns the move number.
    #[inline]
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Returns the deploy in progress, if any.
    #[inline]
    pub fn deploy_state(&self) -> Option<&DeployState> {
        self.deploy.as_ref()
    }

    /// Returns the applied moves, oldest first.
    pub fn history(&self) -> Vec<Move> {
        self.history.iter().map(HistoryEntry::mov).collect()
    }

    /// Returns the undo records, oldest first.
    pub fn history_entries(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Generates moves for `side`.
    ///
    /// Moves that leave `side`'s commander attacked are dropped unless the
    /// filter asks for pseudo-legal moves. A side without a commander on the
    /// board has nothing to protect, so all its moves are kept.
    pub fn generate_moves(&mut self, side: Color, filter: MoveFilter) -> MoveList {
        let mut moves = pseudo_legal_moves(
            &self.board,
            side,
            self.deploy.as_ref(),
            &filter,
            &self.config,
        );
        if filter.ignore_safety || self.board.commander(side).is_none() {
            return moves;
        }
        moves.retain(|m| self.leaves_commander_safe(*m));
        moves
    }

    /// Returns the legal moves of the side to move.
    pub fn moves(&mut self) -> MoveList {
        self.generate_moves(self.turn, MoveFilter::default())
    }

    /// Returns the moves of the side to move that pass the filter.
    pub fn moves_with(&mut self, filter: MoveFilter) -> MoveList {
        self.generate_moves(self.turn, filter)
    }

    /// Plays a move of the side to move.
    ///
    /// The move is matched against the legal moves from its square, ignoring
    /// the heroic promotion marker. Returns the move as applied.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoPieceToMove`] if the side to move has no piece on the
    /// origin square, [`EngineError::InvalidMove`] if the move is not legal.
    /// The position is unchanged on error.
    pub fn make_move(&mut self, m: Move) -> Result<Move, EngineError> {
        match self.board.get(m.from()) {
            Some(piece) if piece.color == self.turn => {}
            _ => return Err(EngineError::NoPieceToMove(m.from())),
        }
        let legal = self.generate_moves(self.turn, MoveFilter::default().from_square(m.from()));
        let Some(&chosen) = legal.iter().find(|l| l.same_action(m)) else {
            return Err(EngineError::InvalidMove(m));
        };
        self.apply(chosen)
    }

    /// Takes back the last move. Returns `None` if there is nothing to undo.
    pub fn unmake_move(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        let m = entry.mov;
        let from = m.from();
        let target = m.target();

        self.board.take(from);
        self.board.take(target);
        if let Some(piece) = entry.from_before {
            self.board.place(from, piece);
        }
        if let Some(piece) = entry.target_before {
            self.board.place(target, piece);
        }
        self.board.restore_heroic(entry.heroic);
        self.board.restore_commanders(entry.commanders);
        self.turn = entry.turn;
        self.half_moves = entry.half_moves;
        self.move_number = entry.move_number;
        self.deploy = entry.deploy;

        tracing::debug!("unmake {}", m);
        Some(m)
    }

    /// Returns true if `by` could capture on `sq`.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        is_attacked(&self.board, sq, by, &self.config)
    }

    /// Returns true if the side to move's commander is attacked.
    pub fn is_check(&self) -> bool {
        self.board
            .commander(self.turn)
            .map_or(false, |sq| self.is_attacked(sq, self.turn.opposite()))
    }

    /// Returns true if the side to move is in check with no legal moves.
    pub fn is_checkmate(&mut self) -> bool {
        self.is_check() && self.moves().is_empty()
    }

    /// Returns true if the side to move is not in check but has no legal moves.
    pub fn is_stalemate(&mut self) -> bool {
        !self.is_check() && self.moves().is_empty()
    }

    /// Returns true if the half-move clock reached the configured limit.
    pub fn is_draw_by_fifty_moves(&self) -> bool {
        self.half_moves >= self.config.fifty_move_halfmoves
    }

    /// Returns true if a commander has been captured, the side to move has no
    /// legal moves, or the fifty-move rule applies.
    pub fn is_game_over(&mut self) -> bool {
        self.result().is_some()
    }

    /// Returns the outcome if the game is over.
    pub fn result(&mut self) -> Option<GameResult> {
        match (
            self.board.commander(Color::Red),
            self.board.commander(Color::Blue),
        ) {
            (None, _) => return Some(GameResult::BlueWins),
            (_, None) => return Some(GameResult::RedWins),
            _ => {}
        }
        if self.moves().is_empty() {
            if !self.is_check() {
                return Some(GameResult::Draw(DrawReason::Stalemate));
            }
            return Some(match self.turn {
                Color::Red => GameResult::BlueWins,
                Color::Blue => GameResult::RedWins,
            });
        }
        if self.is_draw_by_fifty_moves() {
            return Some(GameResult::Draw(DrawReason::FiftyMoveRule));
        }
        None
    }

    fn leaves_commander_safe(&mut self, m: Move) -> bool {
        let side = m.color();
        let verdict = self.probe(m, |game| {
            game.board
                .commander(side)
                .map_or(true, |sq| !game.is_attacked(sq, side.opposite()))
        });
        match verdict {
            Ok(safe) => safe,
            Err(err) => {
                tracing::warn!("discarding {} after failed probe: {}", m, err);
                false
            }
        }
    }

    /// Plays `m`, runs `f` on the resulting position, and takes `m` back.
    fn probe<R>(&mut self, m: Move, f: impl FnOnce(&Game) -> R) -> Result<R, EngineError> {
        self.apply(m)?;
        tracing::trace!("probing {}", m);
        let guard = Probe { game: self };
        Ok(f(&*guard.game))
    }

    /// Applies a generated move without checking legality.
    ///
    /// The board is checked against the move before anything changes; a
    /// mismatch is reported as [`EngineError::InternalInvariant`] and leaves
    /// the game untouched.
    pub(crate) fn apply(&mut self, m: Move) -> Result<Move, EngineError> {
        let from = m.from();
        let target = m.target();
        let from_before = self.board.get(from).cloned();
        let target_before = self.board.get(target).cloned();

        let mut mover = match self.check_move(m, from_before.as_ref(), target_before.as_ref()) {
            Ok(piece) => piece.clone(),
            Err(reason) => {
                tracing::error!("refusing to apply {}: {}", m, reason);
                return Err(EngineError::InternalInvariant(reason));
            }
        };

        self.history.push(HistoryEntry {
            mov: m,
            heroic: self.board.heroic(),
            commanders: self.board.commanders(),
            turn: self.turn,
            half_moves: self.half_moves,
            move_number: self.move_number,
            deploy: self.deploy.clone(),
            from_before,
            target_before,
        });

        match m.kind() {
            MoveKind::StayCapture { target, .. } => {
                self.board.remove(target);
            }
            MoveKind::Quiet { to } | MoveKind::Capture { to, .. } => {
                self.board.remove(to);
                if m.is_deploy() {
                    mover.remove_carried(m.piece());
                    self.board.take(from);
                    self.board.place(from, mover);
                    self.board.place(to, Piece::new(m.piece(), m.color()));
                } else {
                    let heroic = self.board.is_heroic(from);
                    self.board.remove(from);
                    self.board.place(to, mover);
                    self.board.set_heroic(to, heroic);
                }
            }
        }

        self.half_moves = if m.is_capture() || m.piece().resets_half_move_clock() {
            0
        } else {
            self.half_moves + 1
        };

        let mut applied = m;
        if self.promotes(m) {
            self.board.set_heroic(m.to(), true);
            applied = applied.with_heroic_promotion();
            tracing::debug!("{} on {} becomes heroic", m.piece(), m.to());
        }

        if m.is_deploy() {
            let state = self.deploy.get_or_insert_with(|| {
                tracing::debug!("{} starts deploying from {}", m.color(), from);
                DeployState::new(from, m.color())
            });
            if m.is_stay_capture() {
                state.stayed.push(m.piece());
            }
        } else {
            if let Some(state) = self.deploy.take() {
                tracing::debug!("{} finishes deploying from {}", state.color, state.square);
            }
            if m.color() == Color::Blue {
                self.move_number += 1;
            }
            self.turn = m.color().opposite();
        }

        if let Some(entry) = self.history.last_mut() {
            entry.mov = applied;
        }
        tracing::debug!("make {}", applied);
        Ok(applied)
    }

    /// Returns true if the piece that just moved now stands heroic: it is not
    /// a headquarter, it is not already heroic, and its side attacks the
    /// enemy commander.
    fn promotes(&self, m: Move) -> bool {
        if m.piece() == PieceKind::Headquarter || (m.is_deploy() && m.is_stay_capture()) {
            return false;
        }
        if self.board.is_heroic(m.to()) {
            return false;
        }
        self.board
            .commander(m.color().opposite())
            .map_or(false, |sq| self.is_attacked(sq, m.color()))
    }

    /// Returns the piece on the move's origin if the board agrees with the move.
    fn check_move<'p>(
        &self,
        m: Move,
        mover: Option<&'p Piece>,
        victim: Option<&Piece>,
    ) -> Result<&'p Piece, String> {
        let Some(mover) = mover else {
            return Err(format!("no piece on {}", m.from()));
        };
        if mover.color != m.color() {
            return Err(format!("piece on {} belongs to {}", m.from(), mover.color));
        }
        if m.is_deploy() {
            if !mover.carried.contains(&m.piece()) {
                return Err(format!("stack on {} does not carry a {}", m.from(), m.piece()));
            }
        } else if mover.kind != m.piece() {
            return Err(format!("piece on {} is a {}, not a {}", m.from(), mover.kind, m.piece()));
        }
        if let Some(state) = self.deploy.as_ref().filter(|d| d.color == m.color()) {
            if state.square != m.from() {
                return Err(format!("{} is deploying from {}", state.color, state.square));
            }
        }
        match (m.captured(), victim) {
            (None, None) => Ok(mover),
            (None, Some(_)) => Err(format!("{} is occupied", m.target())),
            (Some(_), None) => Err(format!("nothing to capture on {}", m.target())),
            (Some(kind), Some(victim)) if victim.color == m.color() || victim.kind != kind => Err(
                format!("{} does not hold an enemy {}", m.target(), kind),
            ),
            (Some(_), Some(_)) => Ok(mover),
        }
    }
}

/// Takes back the probed move when dropped.
struct Probe<'a> {
    game: &'a mut Game,
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.game.unmake_move();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn new_game_is_startpos() {
        let game = Game::new();
        assert_eq!(game.fen(), FenParser::STARTPOS);
        assert_eq!(game.turn(), Color::Red);
        assert_eq!(game.board().commander(Color::Red), Some(sq("g1")));
        assert_eq!(game.board().commander(Color::Blue), Some(sq("g12")));
    }

    #[test]
    fn load_rejects_second_commander() {
        let mut game = Game::new();
        let result = game.load("6c4/11/11/11/11/11/11/11/11/11/11/5CC4 r - - 0 1");
        assert!(matches!(result, Err(EngineError::Fen(_))));
        assert_eq!(game.fen(), FenParser::STARTPOS);
    }

    #[test]
    fn make_and_unmake_restore_startpos() {
        let mut game = Game::new();
        let moves = game.moves();
        assert!(!moves.is_empty());
        for m in &moves {
            game.make_move(*m).unwrap();
            assert_eq!(game.unmake_move().map(|u| u.same_action(*m)), Some(true));
            assert_eq!(game.fen(), FenParser::STARTPOS);
        }
    }

    #[test]
    fn turn_and_clocks_advance() {
        let mut game = Game::new();
        let red = game
            .moves()
            .iter()
            .copied()
            .find(|m| m.piece() == PieceKind::Tank && !m.is_capture())
            .unwrap();
        game.make_move(red).unwrap();
        assert_eq!(game.turn(), Color::Blue);
        assert_eq!(game.half_moves(), 1);
        assert_eq!(game.move_number(), 1);

        let blue = game
            .moves()
            .iter()
            .copied()
            .find(|m| m.piece() == PieceKind::Infantry && !m.is_capture())
            .unwrap();
        game.make_move(blue).unwrap();
        assert_eq!(game.turn(), Color::Red);
        assert_eq!(game.half_moves(), 0);
        assert_eq!(game.move_number(), 2);
        assert_eq!(game.history(), vec![red, blue]);
    }

    #[test]
    fn wrong_side_or_illegal_move_is_rejected() {
        let mut game = Game::new();
        let before = game.fen();

        let blue_tank = Move::quiet(Color::Blue, PieceKind::Tank, sq("g9"), sq("g8"));
        assert!(matches!(
            game.make_move(blue_tank),
            Err(EngineError::NoPieceToMove(_))
        ));

        let too_far = Move::quiet(Color::Red, PieceKind::Tank, sq("g4"), sq("g7"));
        assert!(matches!(
            game.make_move(too_far),
            Err(EngineError::InvalidMove(_))
        ));

        assert_eq!(game.fen(), before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn unmake_on_empty_history() {
        let mut game = Game::new();
        assert_eq!(game.unmake_move(), None);
        assert_eq!(game.fen(), FenParser::STARTPOS);
    }

    #[test]
    fn inconsistent_move_is_refused_without_mutation() {
        let mut game = Game::from_fen("6c4/11/11/11/11/11/11/11/11/11/11/6C4 r - - 0 1").unwrap();
        let before = game.fen();
        let bogus = Move::capture(
            Color::Red,
            PieceKind::Commander,
            sq("g1"),
            sq("g2"),
            PieceKind::Tank,
        );
        assert!(matches!(
            game.apply(bogus),
            Err(EngineError::InternalInvariant(_))
        ));
        assert_eq!(game.fen(), before);
        assert!(game.history_entries().is_empty());
    }

    #[test]
    fn probe_leaves_position_untouched() {
        let mut game = Game::new();
        let m = game.moves()[0];
        let before = game.fen();
        let after = game.probe(m, |g| g.fen()).unwrap();
        assert_ne!(after, before);
        assert_eq!(game.fen(), before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn checking_move_promotes() {
        let mut game =
            Game::from_fen("11/11/11/11/4c6/11/3T7/11/11/11/11/6C4 r - - 0 1").unwrap();
        let before = game.fen();
        let applied = game
            .make_move(Move::quiet(Color::Red, PieceKind::Tank, sq("d6"), sq("d8")))
            .unwrap();
        assert!(applied.is_heroic_promotion());
        assert!(game.is_heroic(sq("d8")));
        assert!(game.is_check());
        assert_eq!(
            game.fen(),
            "11/11/11/11/3+Tc6/11/11/11/11/11/11/6C4 b - - 1 1"
        );

        game.unmake_move();
        assert_eq!(game.fen(), before);
        assert!(!game.is_heroic(sq("d8")));
    }

    #[test]
    fn heroic_status_travels_and_dies_with_pieces() {
        let mut game =
            Game::from_fen("6c4/11/11/11/11/11/11/4t6/11/4+T6/11/6C4 r - - 0 1").unwrap();
        // heroic tank on e3 captures the tank on e5
        let applied = game
            .make_move(Move::capture(
                Color::Red,
                PieceKind::Tank,
                sq("e3"),
                sq("e5"),
                PieceKind::Tank,
            ))
            .unwrap();
        assert!(!applied.is_heroic_promotion());
        assert!(game.is_heroic(sq("e5")));
        assert!(!game.is_heroic(sq("e3")));
        assert_eq!(game.half_moves(), 0);
    }

    #[test]
    fn set_turn_abandons_deploy() {
        let mut game =
            Game::from_fen("6c4/11/11/11/11/11/11/11/11/2(NT)8/11/6C4 r - - 0 1").unwrap();
        let deploy = game
            .moves()
            .iter()
            .copied()
            .find(|m| m.is_deploy() && m.piece() == PieceKind::Tank)
            .unwrap();
        game.make_move(deploy).unwrap();
        assert!(game.deploy_state().is_some());
        game.set_turn(Color::Blue);
        assert!(game.deploy_state().is_none());
    }

    #[test]
    fn clear_keeps_config() {
        let config = RulesConfig {
            fifty_move_halfmoves: 10,
            ..RulesConfig::default()
        };
        let mut game = Game::with_config(config.clone());
        game.clear();
        assert_eq!(game.config(), &config);
        assert_eq!(game.fen(), "11/11/11/11/11/11/11/11/11/11/11/11 r - - 0 1");
    }
}
