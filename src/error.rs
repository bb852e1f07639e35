//! Error types for search and game operations.

use std::fmt;

/// Error type for failures inside a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The evaluator could not score a position
    Evaluation { reason: String },
    /// The rules engine could not enumerate moves
    MoveGeneration { reason: String },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Evaluation { reason } => {
                write!(f, "Evaluation failed: {reason}")
            }
            SearchError::MoveGeneration { reason } => {
                write!(f, "Move generation failed: {reason}")
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Error type for game setup and move input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// FEN string could not be parsed or describes an impossible position
    InvalidFen { fen: String, reason: String },
    /// Move string is not valid UCI notation
    InvalidUci { notation: String },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidFen { fen, reason } => {
                write!(f, "Invalid FEN '{fen}': {reason}")
            }
            GameError::InvalidUci { notation } => {
                write!(f, "Invalid UCI move notation '{notation}'")
            }
            GameError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for GameError {}
