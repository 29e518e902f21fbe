//! Wind-, humidity- and temperature-modulated ignition
//!
//! Each burning neighbor contributes ignition pressure
//!
//! ```text
//! pressure += 1 + 0.02 · (dx·wind.x + dy·wind.y)
//! ```
//!
//! where `(dx, dy)` is the offset from the cell to the burning neighbor. The
//! probability of catching fire this tick is
//!
//! ```text
//! P = pressure · prob · (1 − 0.01 · humidity) · (1 + 0.02 · (temperature − 20))
//! ```
//!
//! with humidity in percent. One uniform draw below `P` ignites the cell.

use crate::core_types::{Cell, CellState, Environment, REFERENCE_TEMPERATURE};
use crate::grid::Neighborhood;
use crate::random::RandomSource;

/// Weight of wind alignment per burning neighbor.
pub const WIND_ALIGNMENT_COEFFICIENT: f64 = 0.02;

/// Probability reduction per percentage point of relative humidity.
pub const HUMIDITY_COEFFICIENT: f64 = 0.01;

/// Probability change per °C away from the reference temperature.
pub const TEMPERATURE_COEFFICIENT: f64 = 0.02;

/// Summed ignition pressure from the burning neighbors
pub fn ignition_pressure(neighbors: &Neighborhood, env: &Environment) -> f64 {
    neighbors
        .burning()
        .map(|n| {
            let alignment = f64::from(n.dx) * env.wind.x + f64::from(n.dy) * env.wind.y;
            1.0 + WIND_ALIGNMENT_COEFFICIENT * alignment
        })
        .sum()
}

/// Ignition probability for a fuel cell under `env`
///
/// Not clamped: values above 1 always ignite, values at or below 0 never do.
pub fn ignition_probability(neighbors: &Neighborhood, env: &Environment) -> f64 {
    let humidity_factor = 1.0 - HUMIDITY_COEFFICIENT * env.humidity;
    let temperature_factor =
        1.0 + TEMPERATURE_COEFFICIENT * (env.temperature - REFERENCE_TEMPERATURE);
    ignition_pressure(neighbors, env)
        * env.ignition_probability
        * humidity_factor
        * temperature_factor
}

/// Ignite `Tree` and `Grass` cells next to fire
///
/// Health is left as it was; fuel is set when the cell is classified. All
/// other states, and fuel cells with no burning neighbor, pass through
/// unchanged without consuming a draw.
pub fn ignite(
    _x: usize,
    _y: usize,
    cell: Cell,
    neighbors: &Neighborhood,
    env: &Environment,
    rng: &mut dyn RandomSource,
) -> Cell {
    if !cell.state.is_fuel() || neighbors.burning().next().is_none() {
        return cell;
    }
    if rng.unit() < ignition_probability(neighbors, env) {
        Cell::new(CellState::Fire, cell.health)
    } else {
        cell
    }
}
