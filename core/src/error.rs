use core::fmt;
use thiserror::Error;

use crate::{CellCount, Coord2};

/// Cell state change that is never allowed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    RevealFlagged,
    FlagRevealed,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RevealFlagged => f.write_str("can't reveal a flagged cell"),
            Self::FlagRevealed => f.write_str("can't flag a revealed cell"),
        }
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid board configuration for {0} mines")]
    InvalidConfiguration(CellCount),
    #[error("Coordinates {0:?} are out of bounds")]
    OutOfBounds(Coord2),
    #[error("Illegal transition: {0}")]
    IllegalTransition(Transition),
    #[error("Invalid board data: {0}")]
    InvalidData(&'static str),
    #[error("Flood reveal reached a mine at {0:?}, board numbering is inconsistent")]
    InvariantViolation(Coord2),
}

impl BoardError {
    /// Whether the error points at a bug rather than a bad request.
    pub const fn is_defect(self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

pub type Result<T> = core::result::Result<T, BoardError>;
