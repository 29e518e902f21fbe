//! Fuel decay of burning cells

use crate::core_types::{Cell, CellState, Environment};
use crate::grid::Neighborhood;
use crate::random::RandomSource;

/// Smallest fuel loss per burning tick.
pub const DECAY_MIN: u32 = 1;

/// Largest fuel loss per burning tick.
pub const DECAY_MAX: u32 = 2;

/// Burn down a `Fire` cell by 1 or 2 units of fuel
///
/// A cell whose fuel reaches zero turns to `(Ash, 0)`. Other states pass
/// through unchanged.
pub fn burning(
    _x: usize,
    _y: usize,
    cell: Cell,
    _neighbors: &Neighborhood,
    _env: &Environment,
    rng: &mut dyn RandomSource,
) -> Cell {
    if !cell.state.is_burning() {
        return cell;
    }
    let decay = rng.int_inclusive(DECAY_MIN, DECAY_MAX);
    match cell.health.saturating_sub(decay) {
        0 => Cell::new(CellState::Ash, 0),
        remaining => Cell::new(CellState::Fire, remaining),
    }
}
