use serde::{Deserialize, Serialize};

/// Single coordinate axis, used for the board side length and for row/column positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Row-major cell identifier, `row * side + col`.
pub type CellId = u16;

/// Row and column of a cell, both zero-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: Coord,
    pub col: Coord,
}

impl CellPos {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for CellPos {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

/// Number of cells on a square board with the given side.
pub const fn square(side: Coord) -> CellCount {
    let side = side as CellCount;
    side.saturating_mul(side)
}

/// Geometry of a square board: all id and position arithmetic lives here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    side: Coord,
}

impl Grid {
    pub const fn new(side: Coord) -> Self {
        Self { side }
    }

    pub const fn side(self) -> Coord {
        self.side
    }

    pub const fn cell_count(self) -> CellCount {
        square(self.side)
    }

    pub const fn contains(self, id: CellId) -> bool {
        id < self.cell_count()
    }

    pub const fn contains_pos(self, pos: CellPos) -> bool {
        pos.row < self.side && pos.col < self.side
    }

    pub const fn pos_of(self, id: CellId) -> Option<CellPos> {
        if !self.contains(id) {
            return None;
        }
        let side = self.side as CellId;
        Some(CellPos::new((id / side) as Coord, (id % side) as Coord))
    }

    pub const fn id_of(self, pos: CellPos) -> Option<CellId> {
        if self.contains_pos(pos) {
            Some(self.index_of(pos))
        } else {
            None
        }
    }

    /// Row-major id of an in-bounds position.
    pub(crate) const fn index_of(self, pos: CellPos) -> CellId {
        pos.row as CellId * self.side as CellId + pos.col as CellId
    }

    pub fn neighbor_positions(self, pos: CellPos) -> NeighborIter {
        NeighborIter::new(pos, self.side)
    }

    /// Ids of the up-to-8 cells surrounding `id`; empty for an id outside the grid.
    pub fn neighbors(self, id: CellId) -> impl Iterator<Item = CellId> {
        self.pos_of(id)
            .into_iter()
            .flat_map(move |pos| self.neighbor_positions(pos))
            .map(move |pos| self.index_of(pos))
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: CellPos, delta: (i8, i8), side: Coord) -> Option<CellPos> {
    let (dr, dc) = delta;

    let row = pos.row.checked_add_signed(dr)?;
    if row >= side {
        return None;
    }

    let col = pos.col.checked_add_signed(dc)?;
    if col >= side {
        return None;
    }

    Some(CellPos::new(row, col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: CellPos,
    side: Coord,
    index: u8,
}

impl NeighborIter {
    fn new(center: CellPos, side: Coord) -> Self {
        Self {
            center,
            side,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellPos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(pos) = apply_delta(self.center, delta, self.side) {
                return Some(pos);
            }
        }
    }
}
