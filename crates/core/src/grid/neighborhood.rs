//! Moore neighborhood snapshots
//!
//! The grid is not toroidal: corner cells see 3 neighbors, edge cells 5 and
//! interior cells 8. Offsets are stored relative to the center cell, so a
//! neighbor at `(dx, dy)` sits at `(x + dx, y + dy)`.

use super::Grid;
use crate::core_types::CellState;

/// The eight Moore offsets in row-major order, center excluded.
pub const MOORE_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One neighboring cell as seen from the center cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Neighbor state at the start of the tick
    pub state: CellState,
    /// Column offset from the center cell, in {-1, 0, 1}
    pub dx: i8,
    /// Row offset from the center cell, in {-1, 0, 1}
    pub dy: i8,
}

/// Up to eight in-bounds neighbors of a cell
///
/// Stored inline, so building one per cell per tick does not allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    slots: [Neighbor; 8],
    len: usize,
}

impl Neighborhood {
    /// An empty neighborhood (a 1x1 grid's only cell)
    pub const fn empty() -> Self {
        Self {
            slots: [Neighbor {
                state: CellState::Empty,
                dx: 0,
                dy: 0,
            }; 8],
            len: 0,
        }
    }

    /// Snapshot the Moore neighborhood of `(x, y)` from `grid`
    ///
    /// Out-of-bounds offsets are skipped.
    pub fn moore(grid: &Grid, x: usize, y: usize) -> Self {
        let mut hood = Self::empty();
        let (cx, cy) = (x as i64, y as i64);
        for (dx, dy) in MOORE_OFFSETS {
            if let Some(state) = grid.state_at(cx + i64::from(dx), cy + i64::from(dy)) {
                hood.push(Neighbor { state, dx, dy });
            }
        }
        hood
    }

    /// Build a neighborhood from explicit neighbors
    ///
    /// Intended for evaluating rules against synthetic inputs. Anything past
    /// the eighth neighbor is dropped.
    pub fn from_neighbors<I>(neighbors: I) -> Self
    where
        I: IntoIterator<Item = Neighbor>,
    {
        let mut hood = Self::empty();
        for neighbor in neighbors.into_iter().take(8) {
            hood.push(neighbor);
        }
        hood
    }

    fn push(&mut self, neighbor: Neighbor) {
        self.slots[self.len] = neighbor;
        self.len += 1;
    }

    /// Number of in-bounds neighbors
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the cell has no neighbors at all
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over the in-bounds neighbors
    pub fn iter(&self) -> std::slice::Iter<'_, Neighbor> {
        self.slots[..self.len].iter()
    }

    /// Iterate over neighbors that are currently burning
    pub fn burning(&self) -> impl Iterator<Item = &Neighbor> {
        self.iter().filter(|n| n.state.is_burning())
    }
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a Neighborhood {
    type Item = &'a Neighbor;
    type IntoIter = std::slice::Iter<'a, Neighbor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_counts_by_position() {
        let grid = Grid::new(4, 3).unwrap();

        // Corners
        for (x, y) in [(0, 0), (3, 0), (0, 2), (3, 2)] {
            assert_eq!(Neighborhood::moore(&grid, x, y).len(), 3, "corner ({x}, {y})");
        }
        // Edges
        for (x, y) in [(1, 0), (2, 0), (0, 1), (3, 1), (1, 2)] {
            assert_eq!(Neighborhood::moore(&grid, x, y).len(), 5, "edge ({x}, {y})");
        }
        // Interior
        for (x, y) in [(1, 1), (2, 1)] {
            assert_eq!(Neighborhood::moore(&grid, x, y).len(), 8, "interior ({x}, {y})");
        }
    }

    #[test]
    fn test_no_wraparound() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(2, 2, CellState::Fire, 3);

        // (0, 0) would see (2, 2) on a torus
        let corner = Neighborhood::moore(&grid, 0, 0);
        assert_eq!(corner.burning().count(), 0);

        let center = Neighborhood::moore(&grid, 1, 1);
        let burning: Vec<_> = center.burning().collect();
        assert_eq!(burning.len(), 1);
        assert_eq!((burning[0].dx, burning[0].dy), (1, 1));
    }

    #[test]
    fn test_offsets_point_at_neighbor() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 0, CellState::Water, 0);
        let hood = Neighborhood::moore(&grid, 1, 1);
        let water: Vec<_> = hood
            .iter()
            .filter(|n| n.state == CellState::Water)
            .collect();
        assert_eq!(water.len(), 1);
        assert_eq!((water[0].dx, water[0].dy), (0, -1));
    }

    #[test]
    fn test_single_cell_grid_has_no_neighbors() {
        let grid = Grid::new(1, 1).unwrap();
        assert!(Neighborhood::moore(&grid, 0, 0).is_empty());
    }

    #[test]
    fn test_from_neighbors_caps_at_eight() {
        let many = (0..12).map(|_| Neighbor {
            state: CellState::Fire,
            dx: 1,
            dy: 0,
        });
        assert_eq!(Neighborhood::from_neighbors(many).len(), 8);
    }
}
