//! Game logic for a square-grid mine clearing puzzle.
//!
//! A [`GameSession`] owns one [`Board`] and the [`GameStatus`] of the game being played. Presentation layers
//! drive it through [`GameSession::on_reveal`] and [`GameSession::on_flag`] and redraw the cells listed in the
//! returned [`Update`].
#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod reveal;
mod session;
mod types;

pub const DEFAULT_SIDE: Coord = 10;
pub const DEFAULT_MINES: CellCount = 12;

/// When a game counts as won.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinPolicy {
    /// Every safe cell is revealed, flags are ignored.
    #[default]
    RevealAllSafe,
    /// Every safe cell is revealed and every mine carries a flag.
    RevealAllSafeAndFlagAllMines,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub side: Coord,
    pub mines: CellCount,
    #[serde(default)]
    pub win_policy: WinPolicy,
}

impl GameConfig {
    pub const fn new(side: Coord, mines: CellCount) -> Self {
        Self {
            side,
            mines,
            win_policy: WinPolicy::RevealAllSafe,
        }
    }

    pub const fn with_win_policy(self, win_policy: WinPolicy) -> Self {
        Self { win_policy, ..self }
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.side)
    }

    pub const fn grid(&self) -> Grid {
        Grid::new(self.side)
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.side, self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SIDE, DEFAULT_MINES)
    }
}

pub(crate) fn validate_dimensions(side: Coord, mines: CellCount) -> Result<()> {
    if side == 0 {
        return Err(ConfigError::EmptyBoard.into());
    }

    let cells = square(side);
    if mines >= cells {
        return Err(ConfigError::TooManyMines { mines, cells }.into());
    }

    Ok(())
}
