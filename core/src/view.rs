use core::fmt;

use crate::*;

fn kind_symbol(kind: CellKind) -> char {
    match kind {
        CellKind::Blank => '.',
        CellKind::Number(n) => char::from(b'0' + n),
        CellKind::Mine => '*',
    }
}

fn write_rows(
    f: &mut fmt::Formatter<'_>,
    board: &Board,
    symbol: impl Fn(Cell) -> char,
) -> fmt::Result {
    let (width, height) = board.size();
    for y in 0..height {
        for x in 0..width {
            write!(f, "{}", symbol(board.cell_at((x, y))))?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// Every cell's true kind, for debugging.
#[derive(Copy, Clone, Debug)]
pub struct RevealedView<'a>(&'a Board);

impl fmt::Display for RevealedView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.0, |cell| kind_symbol(cell.kind()))
    }
}

/// What the player sees: `#` for closed cells, `F` for flags.
#[derive(Copy, Clone, Debug)]
pub struct PlayerView<'a>(&'a Board);

impl fmt::Display for PlayerView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.0, |cell| {
            if cell.is_flagged() {
                'F'
            } else if cell.is_revealed() {
                kind_symbol(cell.kind())
            } else {
                '#'
            }
        })
    }
}

impl Board {
    pub fn revealed_view(&self) -> RevealedView<'_> {
        RevealedView(self)
    }

    pub fn player_view(&self) -> PlayerView<'_> {
        PlayerView(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::from_layout(&MineLayout::from_mine_coords((4, 2), &[(0, 0)]).unwrap())
    }

    #[test]
    fn revealed_view_shows_true_kinds() {
        assert_eq!(board().revealed_view().to_string(), "*1..\n11..\n");
    }

    #[test]
    fn player_view_masks_closed_and_flagged_cells() {
        let board = board()
            .toggle_flagged((0, 0))
            .unwrap()
            .click((3, 0))
            .unwrap();

        assert_eq!(board.player_view().to_string(), "F1..\n#1..\n");
    }

    #[test]
    fn fresh_board_is_fully_masked() {
        assert_eq!(board().player_view().to_string(), "####\n####\n");
    }
}
