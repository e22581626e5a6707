use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - New -> InProgress
/// - New -> Lost
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Flood reveals keep the current state. Flagging always moves the board back
/// to `InProgress`, terminal states included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    /// Freshly generated, nothing clicked or flagged yet
    New,
    InProgress,
    Lost,
    Won,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A snapshot of the game. Moves never touch `self`, they return the next board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    cells: Array2<Cell>,
    mines: CellCount,
    state: BoardState,
}

/// Unchecked form of [`Board`] as it appears in serialized data.
#[derive(Deserialize)]
struct BoardRepr {
    cells: Array2<Cell>,
    mines: CellCount,
    state: BoardState,
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        let (width, height) = repr.cells.dim();
        if Coord::try_from(width).is_err() || Coord::try_from(height).is_err() {
            return Err(BoardError::InvalidData("grid does not fit in Coord"));
        }

        let board = Self {
            cells: repr.cells,
            mines: repr.mines,
            state: repr.state,
        };

        let actual_mines = board
            .iter()
            .filter(|(_, cell)| cell.kind().is_mine())
            .count();
        if actual_mines != board.mines as usize {
            return Err(BoardError::InvalidData("mine count does not match grid"));
        }

        for (coords, cell) in board.iter() {
            if cell.kind().is_mine() {
                continue;
            }
            let adjacent = board
                .cells
                .iter_neighbors(coords)
                .filter(|&pos| board.cell_at(pos).kind().is_mine())
                .count();
            if cell.kind() != CellKind::from_adjacent(adjacent as u8) {
                return Err(BoardError::InvalidData("cell number does not match adjacent mines"));
            }
        }

        Ok(board)
    }
}

impl Board {
    /// Randomly generated board sized for `mines`.
    pub fn new(mines: CellCount) -> Result<Self> {
        let config = BoardConfig::new(mines)?;
        Ok(Self::generate(config, RandomLayoutGenerator::from_entropy()))
    }

    pub fn generate(config: BoardConfig, generator: impl LayoutGenerator) -> Self {
        Self::from_layout(&generator.generate(config))
    }

    /// Numbers every safe cell of a complete layout.
    pub fn from_layout(layout: &MineLayout) -> Self {
        let cells = Array2::from_shape_fn(layout.size().to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            if layout.contains_mine(coords) {
                Cell::new(CellKind::Mine)
            } else {
                Cell::new(CellKind::from_adjacent(layout.adjacent_mine_count(coords)))
            }
        });

        Self {
            cells,
            mines: layout.mine_count(),
            state: BoardState::New,
        }
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.cells.dim();
        (width as Coord, height as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines
    }

    /// Mines minus flags placed, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        let flagged = self.iter().filter(|(_, cell)| cell.is_flagged()).count();
        self.mines as isize - flagged as isize
    }

    /// # Panics
    ///
    /// Panics if `coords` is outside the board.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// All cells with their coordinates, `x` outer and `y` inner.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(BoardError::OutOfBounds(coords))
        }
    }

    /// Cells neither revealed nor flagged.
    pub fn open_cells(&self) -> Vec<Cell> {
        self.iter()
            .map(|(_, cell)| cell)
            .filter(|cell| cell.is_open())
            .collect()
    }

    /// Mines without a flag on them.
    pub fn remaining_mines(&self) -> Vec<Cell> {
        self.iter()
            .map(|(_, cell)| cell)
            .filter(|cell| cell.kind().is_mine() && !cell.is_flagged())
            .collect()
    }

    /// Reveal a cell, flooding outwards when it is blank.
    pub fn click(&self, coords: Coord2) -> Result<Board> {
        let coords = self.validate_coords(coords)?;

        let mut next = self.clone();
        let cell = next.cell_at(coords).reveal()?;
        next.set(coords, cell);
        log::debug!("Click at {:?}, kind: {:?}", coords, cell.kind());

        match cell.kind() {
            CellKind::Blank => {
                next.flood_reveal(coords)?;
            }
            CellKind::Mine => {
                next.state = BoardState::Lost;
                log::debug!("Mine hit at {:?}, game lost", coords);
            }
            CellKind::Number(_) => {
                next.state = next.evaluate();
                if next.state == BoardState::Won {
                    log::debug!("Game won after click at {:?}", coords);
                }
            }
        }

        Ok(next)
    }

    pub fn toggle_flagged(&self, coords: Coord2) -> Result<Board> {
        let coords = self.validate_coords(coords)?;

        let mut next = self.clone();
        let cell = next.cell_at(coords).toggle_flag()?;
        next.set(coords, cell);
        next.state = BoardState::InProgress;
        log::debug!("Flag at {:?} set to {}", coords, cell.is_flagged());

        Ok(next)
    }

    fn set(&mut self, coords: Coord2, cell: Cell) {
        self.cells[coords.to_nd_index()] = cell;
    }

    /// Expands from an already revealed blank cell. Numbers bound the region
    /// and get revealed, flags bound it and stay untouched.
    fn flood_reveal(&mut self, start: Coord2) -> Result<()> {
        let mut to_visit: Vec<Coord2> = self.unrevealed_neighbors(start).collect();
        log::trace!(
            "Starting flood reveal from {:?}, initial neighbors: {:?}",
            start,
            to_visit
        );

        while let Some(coords) = to_visit.pop() {
            let cell = self.cell_at(coords);
            if cell.is_revealed() {
                continue;
            }

            if cell.is_flagged() {
                log::trace!("Skipping flagged cell at {:?}", coords);
                continue;
            }

            match cell.kind() {
                CellKind::Number(_) => {
                    self.set(coords, cell.reveal()?);
                }
                CellKind::Blank => {
                    self.set(coords, cell.reveal()?);
                    to_visit.extend(self.unrevealed_neighbors(coords));
                }
                CellKind::Mine => {
                    log::error!(
                        "Flood reveal from {:?} reached a mine at {:?}, numbering is broken",
                        start,
                        coords
                    );
                    return Err(BoardError::InvariantViolation(coords));
                }
            }
            log::trace!("Flood revealed cell at {:?}", coords);
        }

        Ok(())
    }

    fn unrevealed_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .iter_neighbors(coords)
            .filter(move |&pos| !self.cell_at(pos).is_revealed())
    }

    /// Winning needs every mine flagged and no numbered cell left open. Blank
    /// cells may still be closed.
    fn evaluate(&self) -> BoardState {
        let open_cells = self.open_cells();
        let remaining_mines = self.remaining_mines();

        if open_cells.is_empty() && remaining_mines.is_empty() {
            BoardState::Won
        } else if !remaining_mines.is_empty() {
            BoardState::InProgress
        } else if open_cells.iter().any(|cell| cell.kind().is_number()) {
            BoardState::InProgress
        } else {
            BoardState::Won
        }
    }
}
