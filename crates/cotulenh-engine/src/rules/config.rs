//! Tunable rule settings, loadable from TOML.

use cotulenh_core::PieceKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading rule settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the settings file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the settings as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Rule settings the engine consults during generation and game-over checks.
///
/// Missing keys take their defaults, so an empty document is the standard
/// rule set.
///
/// ```toml
/// dual_capture_on_deploy = ["air_force", "navy"]
/// fifty_move_halfmoves = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RulesConfig {
    /// Kinds that, when deploying from a stack, may capture an enemy on a
    /// square they could occupy either by replacing it or by staying put.
    #[serde(default = "default_dual_capture_on_deploy")]
    pub dual_capture_on_deploy: Vec<PieceKind>,
    /// Half-moves without a capture or foot-unit move after which the game
    /// is drawn.
    #[serde(default = "default_fifty_move_halfmoves")]
    pub fifty_move_halfmoves: u32,
}

fn default_dual_capture_on_deploy() -> Vec<PieceKind> {
    vec![PieceKind::AirForce]
}

fn default_fifty_move_halfmoves() -> u32 {
    100
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            dual_capture_on_deploy: default_dual_capture_on_deploy(),
            fifty_move_halfmoves: default_fifty_move_halfmoves(),
        }
    }
}

impl RulesConfig {
    /// Parses settings from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the document is not valid TOML
    /// or names an unknown piece kind.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Returns true if the kind emits both capture forms when deploying.
    #[inline]
    pub fn dual_capture_on_deploy(&self, kind: PieceKind) -> bool {
        self.dual_capture_on_deploy.contains(&kind)
    }
}
