//! Error types shared by the rules adapter and the search core.

use thiserror::Error;

/// Invalid operation reported by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("illegal move {0}")]
    IllegalMove(String),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("side to move cannot be switched: {0}")]
    InvalidTurnToggle(String),
    #[error("invalid fen: {0}")]
    InvalidFen(String),
    #[error("invalid uci move: {0}")]
    InvalidUci(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("rules engine rejected an operation: {0}")]
    Rules(#[from] RulesError),
}
