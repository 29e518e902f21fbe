//! Transition rules and the ordered rule pipeline
//!
//! A transition rule is a plain function with a uniform signature:
//!
//! ```text
//! (x, y, cell, neighbors, environment, rng) -> cell
//! ```
//!
//! The [`RulePipeline`] runs its rules in insertion order for every cell,
//! threading the `(state, health)` pair through the chain: rule *i + 1* sees
//! the output of rule *i*. Neighbor states always come from the frozen
//! start-of-tick snapshot.
//!
//! # Ordering
//!
//! [`RulePipeline::standard`] runs [`burning`] before [`ignite`]. A cell that
//! catches fire this tick therefore does not lose fuel until the next tick.
//! Reversing the order makes freshly lit cells decay immediately; the
//! pipeline does not enforce either policy.
//!
//! # Example
//!
//! ```rust
//! use flamecell_core::rules::{burning, ignite, RulePipeline};
//!
//! let mut pipeline = RulePipeline::new();
//! pipeline.add_rule(burning);
//! pipeline.add_rule(ignite);
//! assert_eq!(pipeline.len(), 2);
//! ```

pub mod burning;
pub mod ignition;

pub use burning::{burning, DECAY_MAX, DECAY_MIN};
pub use ignition::{
    ignite, ignition_pressure, ignition_probability, HUMIDITY_COEFFICIENT,
    TEMPERATURE_COEFFICIENT, WIND_ALIGNMENT_COEFFICIENT,
};

use crate::core_types::{Cell, Environment};
use crate::grid::{Grid, Neighborhood};
use crate::random::RandomSource;

/// A single transition rule
///
/// Receives the cell coordinates, the cell value produced by the previous
/// rule in the chain, the start-of-tick neighborhood, the step environment and
/// the simulation's random source. Returns the next cell value.
pub type TransitionRule = fn(
    x: usize,
    y: usize,
    cell: Cell,
    neighbors: &Neighborhood,
    env: &Environment,
    rng: &mut dyn RandomSource,
) -> Cell;

/// Ordered chain of transition rules
#[derive(Debug, Clone, Default)]
pub struct RulePipeline {
    rules: Vec<TransitionRule>,
}

impl RulePipeline {
    /// Create an empty pipeline. Every cell passes through unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference fire pipeline: `[burning, ignite]`
    #[must_use]
    pub fn standard() -> Self {
        Self::new().with_rule(burning).with_rule(ignite)
    }

    /// Append a rule to the end of the chain
    ///
    /// Adding the same rule twice applies it twice.
    pub fn add_rule(&mut self, rule: TransitionRule) {
        self.rules.push(rule);
    }

    /// Builder form of [`add_rule`](Self::add_rule)
    pub fn with_rule(mut self, rule: TransitionRule) -> Self {
        self.add_rule(rule);
        self
    }

    /// Number of rules in the chain
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if the chain has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule for the cell at `(x, y)` of `grid`
    ///
    /// `grid` is the start-of-tick snapshot and is only read. Returns `None`
    /// when `(x, y)` lies outside the grid; no rule runs in that case.
    pub fn apply(
        &self,
        x: usize,
        y: usize,
        grid: &Grid,
        neighbors: &Neighborhood,
        env: &Environment,
        rng: &mut dyn RandomSource,
    ) -> Option<Cell> {
        if x >= grid.width() || y >= grid.height() {
            return None;
        }
        let start = grid.cell_at(y * grid.width() + x);
        Some(self.apply_to(x, y, start, neighbors, env, rng))
    }

    /// Run every rule starting from an explicit cell value
    pub fn apply_to(
        &self,
        x: usize,
        y: usize,
        cell: Cell,
        neighbors: &Neighborhood,
        env: &Environment,
        rng: &mut dyn RandomSource,
    ) -> Cell {
        let mut current = cell;
        for rule in &self.rules {
            current = rule(x, y, current, neighbors, env, rng);
        }
        current
    }
}
