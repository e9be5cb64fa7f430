use core::fmt;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::*;

/// Validated set of mine positions for a square board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    grid: Grid,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Builds a layout from distinct mine ids, leaving at least one safe cell.
    pub fn from_mine_ids(side: Coord, mine_ids: impl IntoIterator<Item = CellId>) -> Result<Self> {
        validate_dimensions(side, 0)?;

        let grid = Grid::new(side);
        let dim = usize::from(side);
        let mut mine_mask: Array2<bool> = Array2::default((dim, dim));
        let mut mine_count: CellCount = 0;

        for id in mine_ids {
            let pos = grid.pos_of(id).ok_or(GameError::InvalidCellId(id))?;
            let slot = &mut mine_mask[pos.to_nd_index()];
            if *slot {
                return Err(GameError::DuplicateMine(id));
            }
            *slot = true;
            mine_count += 1;
        }

        validate_dimensions(side, mine_count)?;

        Ok(Self {
            grid,
            mine_mask,
            mine_count,
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn side(&self) -> Coord {
        self.grid.side()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, id: CellId) -> bool {
        self.grid
            .pos_of(id)
            .is_some_and(|pos| self.mine_mask[pos.to_nd_index()])
    }

    /// Mine ids in ascending order.
    pub fn mine_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| self.grid.index_of(CellPos::new(row as Coord, col as Coord)))
    }
}

/// The cells of one game, with mines placed and adjacency counts computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_safe_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    /// Validates `config`, asks `generator` for a layout and builds the board from it.
    pub fn build<G>(config: &GameConfig, generator: &mut G) -> Result<Self>
    where
        G: MineLayoutGenerator + ?Sized,
    {
        config.validate()?;
        let layout = generator.generate(config)?;
        debug_assert_eq!(layout.side(), config.side);
        debug_assert_eq!(layout.mine_count(), config.mines);
        Ok(Self::from_layout(&layout))
    }

    pub fn from_layout(layout: &MineLayout) -> Self {
        let grid = layout.grid();
        let side = usize::from(grid.side());
        let mut cells = Array2::from_shape_fn((side, side), |(row, col)| {
            let pos = CellPos::new(row as Coord, col as Coord);
            Cell::hidden(grid.index_of(pos), pos)
        });

        for id in layout.mine_ids() {
            let Some(pos) = grid.pos_of(id) else {
                continue;
            };
            cells[pos.to_nd_index()].is_mine = true;
            for neighbor in grid.neighbor_positions(pos) {
                cells[neighbor.to_nd_index()].adjacent_mines += 1;
            }
        }

        debug_assert_eq!(
            cells.iter().filter(|cell| cell.is_mine).count(),
            usize::from(layout.mine_count())
        );
        debug_assert!(cells.iter().all(|cell| cell.adjacent_mines <= 8));

        Self {
            grid,
            cells,
            mine_count: layout.mine_count(),
            revealed_safe_count: 0,
            flagged_count: 0,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn side(&self) -> Coord {
        self.grid.side()
    }

    pub fn cell_count(&self) -> CellCount {
        self.grid.cell_count()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.cell_count() - self.mine_count
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn all_safe_revealed(&self) -> bool {
        self.revealed_safe_count == self.safe_cell_count()
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        let pos = self.grid.pos_of(id)?;
        self.cells.get(pos.to_nd_index())
    }

    /// All cells in id order.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Cells laid out as rows and columns, for renderers.
    pub fn rows(&self) -> ArrayView2<'_, Cell> {
        self.cells.view()
    }

    pub fn neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> {
        self.grid.neighbors(id)
    }

    pub fn mine_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.is_mine)
            .map(|cell| cell.id)
    }

    fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        let pos = self.grid.pos_of(id)?;
        self.cells.get_mut(pos.to_nd_index())
    }

    /// Turns a hidden cell into a revealed one, returns whether anything changed.
    pub(crate) fn reveal_cell(&mut self, id: CellId) -> bool {
        let Some(cell) = self.cell_mut(id) else {
            return false;
        };
        if !cell.visibility.is_hidden() {
            return false;
        }
        cell.visibility = Visibility::Revealed;
        if !cell.is_mine {
            self.revealed_safe_count += 1;
        }
        true
    }

    /// Reveals `triggered` and then every other mine, flagged ones included.
    pub(crate) fn reveal_mines(&mut self, triggered: CellId) -> ChangedCells {
        let mut changed = ChangedCells::new();
        if self.reveal_cell(triggered) {
            changed.push(triggered);
        }

        let mut cleared_flags: CellCount = 0;
        for cell in self.cells.iter_mut() {
            if !cell.is_mine || cell.visibility.is_revealed() {
                continue;
            }
            if cell.visibility.is_flagged() {
                cleared_flags += 1;
            }
            cell.visibility = Visibility::Revealed;
            changed.push(cell.id);
        }
        self.flagged_count -= cleared_flags;

        changed
    }

    /// Flips between hidden and flagged, returns the new visibility or `None` for revealed cells.
    pub(crate) fn toggle_flag(&mut self, id: CellId) -> Option<Visibility> {
        let cell = self.cell_mut(id)?;
        let next = match cell.visibility {
            Visibility::Hidden => Visibility::Flagged,
            Visibility::Flagged => Visibility::Hidden,
            Visibility::Revealed => return None,
        };
        cell.visibility = next;

        if next.is_flagged() {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Some(next)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
