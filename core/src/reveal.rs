use alloc::collections::VecDeque;
use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::*;

/// Ids whose visibility changed during one intent, in the order they changed.
pub type ChangedCells = SmallVec<[CellId; 8]>;

/// Reveals `start` and, through every zero cell reached, the connected region around it.
///
/// Number cells are revealed but not expanded, flagged cells and mines are never touched. Each id is
/// visited at most once, so the work is bounded by the board size.
pub fn flood_reveal(board: &mut Board, start: CellId) -> ChangedCells {
    let mut changed = ChangedCells::new();
    let grid = board.grid();

    let mut visited = HashSet::new();
    let mut pending = VecDeque::from([start]);

    while let Some(id) = pending.pop_front() {
        if !visited.insert(id) {
            continue;
        }

        let Some(&cell) = board.cell(id) else {
            continue;
        };
        if cell.is_mine || !cell.visibility.is_hidden() {
            log::trace!("Flood fill skips cell {} ({:?})", id, cell.visibility);
            continue;
        }

        board.reveal_cell(id);
        changed.push(id);

        if cell.adjacent_mines == 0 {
            pending.extend(grid.neighbors(id).filter(|neighbor| {
                !visited.contains(neighbor)
                    && board
                        .cell(*neighbor)
                        .is_some_and(|next| !next.is_mine && next.visibility.is_hidden())
            }));
        }
    }

    log::trace!("Flood fill from {} revealed {} cells", start, changed.len());
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn board(side: Coord, mines: &[CellId]) -> Board {
        Board::from_layout(&MineLayout::from_mine_ids(side, mines.iter().copied()).unwrap())
    }

    fn sorted(changed: ChangedCells) -> Vec<CellId> {
        let mut ids = changed.into_vec();
        ids.sort_unstable();
        ids
    }

    /// Zero cells reachable from `start` through zero cells, plus the safe cells bordering them.
    fn expected_region(board: &Board, start: CellId) -> Vec<CellId> {
        let mut region = Vec::from([start]);
        let mut index = 0;
        while index < region.len() {
            let id = region[index];
            index += 1;
            if board.cell(id).unwrap().adjacent_mines != 0 {
                continue;
            }
            for neighbor in board.neighbors(id) {
                if !board.cell(neighbor).unwrap().is_mine && !region.contains(&neighbor) {
                    region.push(neighbor);
                }
            }
        }
        region.sort_unstable();
        region
    }

    #[test]
    fn stops_at_number_cells() {
        // column 2 is all mines
        let mut board = board(5, &[2, 7, 12, 17, 22]);

        let changed = flood_reveal(&mut board, 0);

        assert_eq!(sorted(changed), [0, 1, 5, 6, 10, 11, 15, 16, 20, 21]);
        assert!(board.cell(3).unwrap().visibility.is_hidden());
        assert!(board.mine_ids().all(|id| board.cell(id).unwrap().visibility.is_hidden()));
        assert_eq!(board.revealed_safe_count(), 10);
    }

    #[test]
    fn flags_block_the_fill() {
        let mut board = board(5, &[2, 7, 12, 17, 22]);
        board.toggle_flag(10);

        let changed = flood_reveal(&mut board, 0);

        assert_eq!(sorted(changed), [0, 1, 5, 6, 11]);
        assert!(board.cell(10).unwrap().visibility.is_flagged());
        assert!(board.cell(15).unwrap().visibility.is_hidden());
    }

    #[test]
    fn number_cell_reveals_only_itself() {
        let mut board = board(3, &[4]);

        assert_eq!(flood_reveal(&mut board, 0).as_slice(), &[0]);
        assert_eq!(board.revealed_safe_count(), 1);
    }

    #[test]
    fn never_reveals_twice() {
        let mut board = board(4, &[15]);

        let first = flood_reveal(&mut board, 0);
        let second = flood_reveal(&mut board, 0);

        assert_eq!(first.len(), 15);
        assert!(second.is_empty());
    }

    #[test]
    fn ignores_mines_and_unknown_ids() {
        let mut board = board(3, &[4]);

        assert!(flood_reveal(&mut board, 4).is_empty());
        assert!(flood_reveal(&mut board, 100).is_empty());
        assert_eq!(board.revealed_safe_count(), 0);
    }

    #[test]
    fn matches_connected_region_on_random_boards() {
        for seed in 0..20 {
            let config = GameConfig::new(12, 20);
            let board = Board::build(&config, &mut RandomLayoutGenerator::new(seed)).unwrap();

            for start in board.cells().filter(|cell| !cell.is_mine && cell.adjacent_mines == 0) {
                let mut copy = board.clone();
                let changed = flood_reveal(&mut copy, start.id);

                assert_eq!(sorted(changed), expected_region(&board, start.id));
                assert!(copy.mine_ids().all(|id| copy.cell(id).unwrap().visibility.is_hidden()));
            }
        }
    }
}
