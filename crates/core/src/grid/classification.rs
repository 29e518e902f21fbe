//! Land-cover classification codes to cell states
//!
//! A raster-loading collaborator hands the engine a matrix of land-cover
//! classification codes. This module maps each code to a [`CellState`] and its
//! initial fuel, then builds a [`Grid`].
//!
//! # Default lookup
//!
//! | Code      | State   | Initial health |
//! |-----------|---------|----------------|
//! | 4, 5      | `Water` | 0              |
//! | 31        | `Tree`  | 10             |
//! | 22, 32    | `Grass` | 4              |
//! | any other | `Empty` | 0              |

use super::cell_grid::checked_cell_count;
use super::Grid;
use crate::core_types::{Cell, CellState};
use crate::error::GridError;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::info;

/// Fixed land-cover lookup for a classification code
pub const fn land_cover(code: u32) -> CellState {
    match code {
        4 | 5 => CellState::Water,
        31 => CellState::Tree,
        22 | 32 => CellState::Grass,
        _ => CellState::Empty,
    }
}

/// Interpret a raw raster value as a classification code
///
/// Returns `None` unless the value is a finite, non-negative integer that fits
/// in a `u32`.
pub fn code_from_value(value: f64) -> Option<u32> {
    let valid = value.is_finite()
        && value >= 0.0
        && value.fract() == 0.0
        && value <= f64::from(u32::MAX);
    valid.then_some(value as u32)
}

/// Classification code table with optional per-code overrides
///
/// Codes without an override fall back to [`land_cover`].
#[derive(Debug, Clone, Default)]
pub struct ClassificationMap {
    overrides: FxHashMap<u32, CellState>,
}

impl ClassificationMap {
    /// Create a map using only the default lookup
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `code` to `state`, replacing the default lookup for that code
    pub fn with_override(mut self, code: u32, state: CellState) -> Self {
        self.overrides.insert(code, state);
        self
    }

    /// Map a code to a cell carrying its state's initial fuel
    pub fn classify(&self, code: u32) -> Cell {
        let state = self
            .overrides
            .get(&code)
            .copied()
            .unwrap_or_else(|| land_cover(code));
        Cell::with_initial_health(state)
    }

    /// Build a grid from integer classification codes in row-major order
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] for bad dimensions and
    /// [`GridError::ShapeMismatch`] if `codes` is not `width * height` long.
    pub fn codes_to_grid(
        &self,
        codes: &[u32],
        width: usize,
        height: usize,
    ) -> Result<Grid, GridError> {
        check_shape(codes.len(), width, height)?;
        let cells: Vec<Cell> = codes.par_iter().map(|&code| self.classify(code)).collect();
        assemble(cells, width, height)
    }

    /// Build a grid from raw raster values in row-major order
    ///
    /// Rasters often arrive as floating point. Every value must be a finite,
    /// non-negative integer; the whole input is validated before any cell is
    /// built.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] or [`GridError::ShapeMismatch`]
    /// for bad shapes, and [`GridError::InvalidClassificationCode`] for the
    /// first (row-major) value that is not a valid code.
    pub fn raster_to_grid(
        &self,
        data: &[f64],
        width: usize,
        height: usize,
    ) -> Result<Grid, GridError> {
        check_shape(data.len(), width, height)?;

        if let Some(idx) = data
            .par_iter()
            .position_first(|&value| code_from_value(value).is_none())
        {
            return Err(GridError::InvalidClassificationCode {
                x: idx % width,
                y: idx / width,
                value: data[idx],
            });
        }

        let cells: Vec<Cell> = data
            .par_iter()
            .map(|&value| self.classify(value as u32))
            .collect();
        assemble(cells, width, height)
    }
}

fn assemble(cells: Vec<Cell>, width: usize, height: usize) -> Result<Grid, GridError> {
    let (state, health): (Vec<_>, Vec<_>) =
        cells.into_iter().map(|cell| (cell.state, cell.health)).unzip();
    let grid = Grid::from_parts(width, height, state, health)?;
    info!(
        "Classified {}x{} raster into grid: {}",
        width,
        height,
        grid.census()
    );
    Ok(grid)
}

fn check_shape(len: usize, width: usize, height: usize) -> Result<(), GridError> {
    let expected = checked_cell_count(width, height)?;
    if len == expected {
        Ok(())
    } else {
        Err(GridError::ShapeMismatch {
            expected,
            actual: len,
        })
    }
}
