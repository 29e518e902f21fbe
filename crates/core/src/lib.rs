//! Wildfire cellular-automaton core library
//!
//! Each cell of a 2D landscape holds a land-cover state and a fuel counter.
//! An ordered pipeline of transition rules advances the whole grid
//! synchronously each tick, modulated by wind, humidity and temperature.
//!
//! This is a discrete, rule-driven approximation, not a physical fire model.
//!
//! ## Modules
//!
//! - [`core_types`]: cell states, fuel and per-step environment
//! - [`grid`]: the landscape grid, Moore neighborhoods and raster classification
//! - [`rules`]: reference ignition and burning rules and the rule pipeline
//! - [`simulation`]: double-buffered stepping and ignition-time bookkeeping
//! - [`random`]: injectable random sources
//!
//! ## Example
//!
//! ```rust
//! use flamecell_core::{ClassificationMap, Environment, RulePipeline, Simulation};
//!
//! let codes = [31, 31, 31, 31, 31, 31, 4, 4, 4];
//! let mut grid = ClassificationMap::new().codes_to_grid(&codes, 3, 3).unwrap();
//! assert!(grid.ignite(1, 1));
//!
//! let mut sim = Simulation::with_seed(grid, RulePipeline::standard(), 7).with_max_steps(20);
//! let env = Environment::default().with_ignition_probability(0.8);
//! while !sim.reached_max_steps() && sim.is_burning() {
//!     sim.step(&env);
//! }
//! ```

pub mod core_types;
pub mod error;
pub mod grid;
pub mod random;
pub mod rules;
pub mod simulation;

// Re-export core types
pub use core_types::{Cell, CellState, Environment, EnvironmentError, Health, Wind};
pub use error::GridError;
pub use grid::{ClassificationMap, Grid, GridSnapshot, Neighbor, Neighborhood};
pub use random::{FixedDraws, RandomSource};
pub use rules::{burning, ignite, RulePipeline, TransitionRule};
pub use simulation::{IgnitionLog, Simulation, StepSummary};
