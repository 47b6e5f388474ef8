//! Game outcomes and rule settings.

mod config;

pub use config::{ConfigError, RulesConfig};

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Red wins by checkmate or by capturing Blue's commander.
    RedWins,
    /// Blue wins by checkmate or by capturing Red's commander.
    BlueWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// The half-move clock reached the configured limit.
    FiftyMoveRule,
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::RedWins => write!(f, "Red wins"),
            GameResult::BlueWins => write!(f, "Blue wins"),
            GameResult::Draw(DrawReason::Stalemate) => write!(f, "Draw by stalemate"),
            GameResult::Draw(DrawReason::FiftyMoveRule) => write!(f, "Draw by fifty-move rule"),
        }
    }
}
