//! Error types

use crate::board::Hex;
use serde::{Deserialize, Serialize};

/// Why a player move was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRejection {
    OutOfBounds,
    Border,
    AlreadyBlocked,
    CatOccupied,
    GameOver,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MoveRejection::OutOfBounds => "cell is outside the board",
            MoveRejection::Border => "border cells cannot be blocked",
            MoveRejection::AlreadyBlocked => "cell is already blocked",
            MoveRejection::CatOccupied => "the cat is standing on that cell",
            MoveRejection::GameOver => "game is already finished",
        };
        f.write_str(text)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid move at {cell}: {reason}")]
    InvalidMove { cell: Hex, reason: MoveRejection },

    #[error("Game not found: {0}")]
    NotFound(String),

    #[error("Invalid board size: {0}")]
    InvalidBoardSize(i32),

    #[error("Invalid game record: {0}")]
    InvalidRecord(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl GameError {
    /// Rejection reason, if this is a refused player move
    pub fn rejection(&self) -> Option<MoveRejection> {
        match self {
            GameError::InvalidMove { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
