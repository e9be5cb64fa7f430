use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::*;

/// Preset mine ids, for replaying a known board or forcing a layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedLayoutGenerator {
    mine_ids: Vec<CellId>,
}

impl FixedLayoutGenerator {
    pub fn new(mine_ids: impl Into<Vec<CellId>>) -> Self {
        Self {
            mine_ids: mine_ids.into(),
        }
    }

    pub fn mine_ids(&self) -> &[CellId] {
        &self.mine_ids
    }
}

impl MineLayoutGenerator for FixedLayoutGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<MineLayout> {
        config.validate()?;
        if self.mine_ids.len() != usize::from(config.mines) {
            return Err(ConfigError::MineCountMismatch {
                expected: config.mines,
                actual: self.mine_ids.len(),
            }
            .into());
        }
        MineLayout::from_mine_ids(config.side, self.mine_ids.iter().copied())
    }
}
