//! Rules engine for a single-player mine-clearing grid game.
//!
//! A [`Board`] is a value: [`Board::click`] and [`Board::toggle_flagged`]
//! return a new board and leave the receiver untouched, so earlier boards
//! stay valid snapshots of the game history.

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;
mod view;

/// Board shape and mine count. The shape is derived from the mine count so
/// that roughly a quarter of all cells hold a mine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl BoardConfig {
    pub fn new(mines: CellCount) -> Result<Self> {
        match Self::dimensions(mines) {
            Some(size) => Ok(Self { size, mines }),
            None => {
                log::warn!("Rejected board configuration with {} mines", mines);
                Err(BoardError::InvalidConfiguration(mines))
            }
        }
    }

    /// `width = floor(sqrt(4 * mines))`, `height = 4 * mines / width`.
    fn dimensions(mines: CellCount) -> Option<Coord2> {
        if mines == 0 {
            return None;
        }
        let total = mines.checked_mul(4)?;
        let width = total.isqrt();
        let height = total / width;
        Some((width.try_into().ok()?, height.try_into().ok()?))
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Where the mines are, before any numbering happens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .expect("mine count fits in CellCount");
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(BoardError::OutOfBounds(coords));
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.mine_mask.dim();
        (
            width.try_into().expect("layout width fits in Coord"),
            height.try_into().expect("layout height fits in Coord"),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count()
            .try_into()
            .expect("at most 8 neighbors")
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, (x, y): Coord2) -> &mut Self::Output {
        &mut self.mine_mask[(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mines_is_invalid() {
        assert_eq!(
            BoardConfig::new(0),
            Err(BoardError::InvalidConfiguration(0))
        );
    }

    #[test]
    fn dimensions_follow_mine_count() {
        let cases = [
            (1, (2, 2)),
            (2, (2, 4)),
            (3, (3, 4)),
            (7, (5, 5)),
            (10, (6, 6)),
            (40, (12, 13)),
        ];
        for (mines, size) in cases {
            let config = BoardConfig::new(mines).unwrap();
            assert_eq!(config.size(), size, "mines = {mines}");
            assert!(config.total_cells() >= mines);
        }
    }

    #[test]
    fn oversized_board_is_invalid() {
        assert_eq!(
            BoardConfig::new(CellCount::MAX),
            Err(BoardError::InvalidConfiguration(CellCount::MAX))
        );
        assert_eq!(BoardConfig::new(20_000).unwrap().size(), (282, 283));
        assert!(BoardConfig::new(2_000_000_000).is_err());
    }

    #[test]
    fn layout_rejects_coords_outside_size() {
        assert_eq!(
            MineLayout::from_mine_coords((3, 3), &[(3, 0)]),
            Err(BoardError::OutOfBounds((3, 0)))
        );
    }

    #[test]
    fn layout_counts_adjacent_mines() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 0);
        assert_eq!(layout.adjacent_mine_count((1, 0)), 1);
        assert!(layout.contains_mine((2, 2)));
    }
}
