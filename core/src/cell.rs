use serde::{Deserialize, Serialize};

use crate::{BoardError, Result, Transition};

/// What a cell actually holds, regardless of what the player has seen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Blank,
    /// Adjacent mine count, always in `1..=8`.
    Number(u8),
    Mine,
}

impl CellKind {
    /// Kind of a safe cell with `count` adjacent mines.
    pub fn from_adjacent(count: u8) -> Self {
        debug_assert!(count <= 8, "a cell has at most 8 neighbors");
        match count {
            0 => Self::Blank,
            n => Self::Number(n),
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_number(self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// A single grid position. Cells are values: transitions return a new cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CellRepr")]
pub struct Cell {
    kind: CellKind,
    flagged: bool,
    revealed: bool,
}

impl Cell {
    pub const fn new(kind: CellKind) -> Self {
        Self {
            kind,
            flagged: false,
            revealed: false,
        }
    }

    pub const fn kind(self) -> CellKind {
        self.kind
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    /// Neither revealed nor flagged.
    pub const fn is_open(self) -> bool {
        !self.revealed && !self.flagged
    }

    pub fn reveal(self) -> Result<Self> {
        if self.flagged {
            return Err(BoardError::IllegalTransition(Transition::RevealFlagged));
        }
        Ok(Self {
            revealed: true,
            ..self
        })
    }

    pub fn toggle_flag(self) -> Result<Self> {
        if self.revealed {
            return Err(BoardError::IllegalTransition(Transition::FlagRevealed));
        }
        Ok(Self {
            flagged: !self.flagged,
            ..self
        })
    }
}

#[derive(Deserialize)]
struct CellRepr {
    kind: CellKind,
    flagged: bool,
    revealed: bool,
}

impl TryFrom<CellRepr> for Cell {
    type Error = BoardError;

    fn try_from(repr: CellRepr) -> Result<Self> {
        if repr.flagged && repr.revealed {
            return Err(BoardError::InvalidData("cell is both flagged and revealed"));
        }
        if let CellKind::Number(n) = repr.kind
            && !(1..=8).contains(&n)
        {
            return Err(BoardError::InvalidData("cell number outside 1..=8"));
        }
        Ok(Self {
            kind: repr.kind,
            flagged: repr.flagged,
            revealed: repr.revealed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_adjacent_is_blank() {
        assert_eq!(CellKind::from_adjacent(0), CellKind::Blank);
        assert_eq!(CellKind::from_adjacent(3), CellKind::Number(3));
    }

    #[test]
    fn reveal_keeps_kind() {
        let cell = Cell::new(CellKind::Number(2)).reveal().unwrap();

        assert!(cell.is_revealed());
        assert!(!cell.is_flagged());
        assert_eq!(cell.kind(), CellKind::Number(2));
    }

    #[test]
    fn reveal_flagged_is_illegal() {
        let cell = Cell::new(CellKind::Mine).toggle_flag().unwrap();

        assert_eq!(
            cell.reveal(),
            Err(BoardError::IllegalTransition(Transition::RevealFlagged))
        );
    }

    #[test]
    fn flag_revealed_is_illegal() {
        let cell = Cell::new(CellKind::Blank).reveal().unwrap();

        assert_eq!(
            cell.toggle_flag(),
            Err(BoardError::IllegalTransition(Transition::FlagRevealed))
        );
    }

    #[test]
    fn toggle_flag_twice_restores_cell() {
        let cell = Cell::new(CellKind::Number(1));
        let flagged = cell.toggle_flag().unwrap();

        assert!(flagged.is_flagged());
        assert!(!flagged.is_open());
        assert_eq!(flagged.toggle_flag().unwrap(), cell);
    }

    #[test]
    fn deserialize_rejects_impossible_cells() {
        let both = r#"{"kind":"Blank","flagged":true,"revealed":true}"#;
        let zero = r#"{"kind":{"Number":0},"flagged":false,"revealed":false}"#;
        let nine = r#"{"kind":{"Number":9},"flagged":false,"revealed":false}"#;

        for json in [both, zero, nine] {
            assert!(serde_json::from_str::<Cell>(json).is_err(), "{json}");
        }

        let cell: Cell =
            serde_json::from_str(r#"{"kind":{"Number":8},"flagged":true,"revealed":false}"#)
                .unwrap();
        assert_eq!(cell, Cell::new(CellKind::Number(8)).toggle_flag().unwrap());
    }
}
