//! Fixed-size 2D landscape grid
//!
//! Stores two parallel row-major buffers (`y * width + x`): the cell state and
//! the fuel counter. Dimensions are fixed for the grid's lifetime and both
//! buffers always hold exactly `width * height` entries.

use crate::core_types::{Cell, CellState, Health};
use crate::error::GridError;
use serde::{Deserialize, Serialize};

/// Landscape grid of cell states and fuel values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GridSnapshot", try_from = "GridSnapshot")]
pub struct Grid {
    width: usize,
    height: usize,
    /// Cell states in row-major order
    pub(crate) state: Vec<CellState>,
    /// Fuel counters in row-major order
    pub(crate) health: Vec<Health>,
}

impl Grid {
    /// Create a grid with every cell `Empty` and health 0
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if either dimension is zero or
    /// the cell count overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let cells = checked_cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            state: vec![CellState::Empty; cells],
            health: vec![0; cells],
        })
    }

    /// Create a grid from pre-built row-major buffers
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] for bad dimensions and
    /// [`GridError::ShapeMismatch`] if either buffer is not `width * height` long.
    pub fn from_parts(
        width: usize,
        height: usize,
        state: Vec<CellState>,
        health: Vec<Health>,
    ) -> Result<Self, GridError> {
        let expected = checked_cell_count(width, height)?;
        for actual in [state.len(), health.len()] {
            if actual != expected {
                return Err(GridError::ShapeMismatch { expected, actual });
            }
        }
        Ok(Self {
            width,
            height,
            state,
            health,
        })
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Matrix shape as `(rows, columns)`, i.e. `(height, width)`
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.state.len()
    }

    /// Flat index for in-bounds coordinates, `None` otherwise
    #[inline]
    pub fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// True if `(x, y)` lies inside the grid
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.index_of(x, y).is_some()
    }

    /// Read a cell, or `None` when `(x, y)` is out of bounds
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<Cell> {
        self.index_of(x, y).map(|idx| self.cell_at(idx))
    }

    /// Overwrite a cell's state and health. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i64, y: i64, state: CellState, health: Health) {
        if let Some(idx) = self.index_of(x, y) {
            self.state[idx] = state;
            self.health[idx] = health;
        }
    }

    /// Read a cell by flat index
    ///
    /// # Panics
    ///
    /// Panics if `idx >= cell_count()`.
    #[inline]
    pub fn cell_at(&self, idx: usize) -> Cell {
        Cell::new(self.state[idx], self.health[idx])
    }

    /// State of a cell, or `None` when out of bounds
    #[inline]
    pub fn state_at(&self, x: i64, y: i64) -> Option<CellState> {
        self.index_of(x, y).map(|idx| self.state[idx])
    }

    /// Set a fuel cell on fire with its state's initial fuel
    ///
    /// Only `Tree` and `Grass` cells can be lit. Returns `true` if the cell
    /// was ignited.
    pub fn ignite(&mut self, x: i64, y: i64) -> bool {
        let Some(idx) = self.index_of(x, y) else {
            return false;
        };
        let current = self.state[idx];
        if !current.is_fuel() {
            return false;
        }
        self.state[idx] = CellState::Fire;
        self.health[idx] = current.initial_health();
        true
    }

    /// All cell states in row-major order
    pub fn states(&self) -> &[CellState] {
        &self.state
    }

    /// All fuel counters in row-major order
    pub fn healths(&self) -> &[Health] {
        &self.health
    }

    /// Iterate over rows of cell states, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.state.chunks_exact(self.width)
    }

    /// Count cells per state
    pub fn census(&self) -> Census {
        let mut counts = [0_usize; CellState::COUNT];
        for state in &self.state {
            counts[state.index()] += 1;
        }
        Census { counts }
    }

    /// True if any cell is burning
    pub fn has_fire(&self) -> bool {
        self.state.iter().any(|s| s.is_burning())
    }
}

pub(crate) fn checked_cell_count(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimension { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(GridError::InvalidDimension { width, height })
}

/// Per-state cell counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    counts: [usize; CellState::COUNT],
}

impl Census {
    /// Number of cells in `state`
    pub fn count(&self, state: CellState) -> usize {
        self.counts[state.index()]
    }

    /// Cells that can still burn
    pub fn fuel(&self) -> usize {
        self.count(CellState::Tree) + self.count(CellState::Grass)
    }

    /// Total cells counted
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl std::fmt::Display for Census {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for state in CellState::ALL {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}={}", state, self.count(state))?;
        }
        Ok(())
    }
}

/// Serialized form of a [`Grid`]
///
/// Deserializing into a `Grid` goes through [`Grid::from_parts`], so a
/// snapshot with inconsistent dimensions is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Row-major cell states
    pub state: Vec<CellState>,
    /// Row-major fuel counters
    pub health: Vec<Health>,
}

impl From<Grid> for GridSnapshot {
    fn from(grid: Grid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            state: grid.state,
            health: grid.health,
        }
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = GridError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        Grid::from_parts(
            snapshot.width,
            snapshot.height,
            snapshot.state,
            snapshot.health,
        )
    }
}
