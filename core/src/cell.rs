use serde::{Deserialize, Serialize};

use crate::{CellId, CellPos};

/// What the player currently sees of a cell.
///
/// Transitions are `Hidden -> Revealed`, `Hidden -> Flagged` and `Flagged -> Hidden`, `Revealed` is terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl Visibility {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// Read-only snapshot of one board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub pos: CellPos,
    pub is_mine: bool,
    /// Mines among the up-to-8 surrounding cells, counted the same way for mine cells.
    pub adjacent_mines: u8,
    pub visibility: Visibility,
}

impl Cell {
    pub(crate) const fn hidden(id: CellId, pos: CellPos) -> Self {
        Self {
            id,
            pos,
            is_mine: false,
            adjacent_mines: 0,
            visibility: Visibility::Hidden,
        }
    }

    /// A safe cell that bounds a flood fill.
    pub const fn is_number(&self) -> bool {
        !self.is_mine && self.adjacent_mines > 0
    }

    /// Single character used by the text rendering of a board.
    pub const fn glyph(&self) -> char {
        match self.visibility {
            Visibility::Hidden => '#',
            Visibility::Flagged => 'F',
            Visibility::Revealed if self.is_mine => '*',
            Visibility::Revealed if self.adjacent_mines == 0 => '.',
            Visibility::Revealed => (b'0' + self.adjacent_mines) as char,
        }
    }
}
