use hashbrown::HashSet;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Picks `count` distinct ids in `0..range`, uniformly and without replacement.
///
/// Rejection sampling into a set: fast while `count` stays well below `range`, slower as the board fills up.
pub fn select_mine_positions(
    rng: &mut SmallRng,
    count: CellCount,
    range: CellCount,
) -> Result<HashSet<CellId>> {
    if count >= range {
        return Err(ConfigError::TooManyMines {
            mines: count,
            cells: range,
        }
        .into());
    }

    // denser than 3/4 and most draws land on an already picked id
    if u32::from(count) * 4 > u32::from(range) * 3 {
        log::warn!(
            "Dense mine placement, {} of {} cells, expect many rejected draws",
            count,
            range
        );
    }

    let target = usize::from(count);
    let mut positions = HashSet::with_capacity(target);
    let mut draws: u32 = 0;
    while positions.len() < target {
        positions.insert(rng.random_range(0..range));
        draws += 1;
    }
    log::trace!("Placed {} mines in {} draws", count, draws);

    debug_assert!(positions.iter().all(|&id| id < range));
    Ok(positions)
}

/// Purely random layouts from a seeded generator, the same seed yields the same sequence of boards.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator {
    rng: SmallRng,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineLayoutGenerator for RandomLayoutGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<MineLayout> {
        config.validate()?;
        let mine_ids = select_mine_positions(&mut self.rng, config.mines, config.total_cells())?;
        MineLayout::from_mine_ids(config.side, mine_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_exact_count_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);

        for count in [0, 1, 10, 50] {
            let positions = select_mine_positions(&mut rng, count, 64).unwrap();
            assert_eq!(positions.len(), usize::from(count));
            assert!(positions.iter().all(|&id| id < 64));
        }
    }

    #[test]
    fn nearly_full_range_terminates() {
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..20 {
            let positions = select_mine_positions(&mut rng, 99, 100).unwrap();
            assert_eq!(positions.len(), 99);
        }
    }

    #[test]
    fn full_range_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(
            select_mine_positions(&mut rng, 9, 9),
            Err(GameError::InvalidConfiguration(ConfigError::TooManyMines {
                mines: 9,
                cells: 9
            }))
        );
        assert!(select_mine_positions(&mut rng, 0, 0).is_err());
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new(9, 10);

        let first = RandomLayoutGenerator::new(1234).generate(&config).unwrap();
        let second = RandomLayoutGenerator::new(1234).generate(&config).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.mine_count(), 10);
    }

    #[test]
    fn generate_validates_config() {
        let mut generator = RandomLayoutGenerator::new(0);

        assert_eq!(
            generator.generate(&GameConfig::new(0, 0)),
            Err(GameError::InvalidConfiguration(ConfigError::EmptyBoard))
        );
    }
}
