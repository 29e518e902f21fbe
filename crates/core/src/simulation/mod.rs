//! Synchronous cellular-automaton stepping
//!
//! `Simulation` owns one [`Grid`] and one [`RulePipeline`] and advances the
//! whole grid one tick per [`Simulation::step`] call. Each tick has two phases
//! that never interleave:
//!
//! 1. **Read**: every cell's neighborhood and rule chain are evaluated against
//!    the unmodified start-of-tick grid. Results go to a back buffer.
//! 2. **Commit**: the back buffer is swapped in and `step_count` advances by 1.
//!
//! Results are therefore independent of traversal order. The grid is owned by
//! value and only lent out between steps, so no second writer can exist.
//!
//! The simulation never stops itself. `max_steps` is exposed for the driver,
//! which decides when to stop calling `step`.

mod ignition_log;

pub use ignition_log::IgnitionLog;

use crate::core_types::{CellState, Environment, Health};
use crate::grid::{Grid, Neighborhood};
use crate::random::RandomSource;
use crate::rules::RulePipeline;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use tracing::{debug, info};

/// Default step ceiling exposed to drivers.
pub const DEFAULT_MAX_STEPS: u32 = 1000;

/// What changed during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSummary {
    /// Tick index that was just computed (the `step_count` before the call)
    pub tick: u32,
    /// Fuel cells that caught fire this tick
    pub newly_ignited: usize,
    /// Burning cells that turned to ash this tick
    pub burned_out: usize,
    /// Cells burning after the tick
    pub burning: usize,
}

/// Cellular-automaton fire simulation
///
/// Generic over its random source; the default is [`ChaCha12Rng`].
pub struct Simulation<R = ChaCha12Rng> {
    grid: Grid,
    pipeline: RulePipeline,
    rng: R,
    step_count: u32,
    max_steps: u32,
    ignition: IgnitionLog,

    // Back buffers for the next tick (written during read phase, then swapped)
    back_state: Vec<CellState>,
    back_health: Vec<Health>,
}

impl Simulation<ChaCha12Rng> {
    /// Create a simulation seeded from the thread-local generator
    pub fn new(grid: Grid, pipeline: RulePipeline) -> Self {
        Self::with_rng(grid, pipeline, ChaCha12Rng::from_rng(&mut rand::rng()))
    }

    /// Create a reproducible simulation from a fixed seed
    pub fn with_seed(grid: Grid, pipeline: RulePipeline, seed: u64) -> Self {
        Self::with_rng(grid, pipeline, ChaCha12Rng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Create a simulation drawing from `rng`
    ///
    /// # Arguments
    ///
    /// * `grid` - Initial landscape, taken by value
    /// * `pipeline` - Rules applied to every cell each tick
    /// * `rng` - Random source lent to the rules
    pub fn with_rng(grid: Grid, pipeline: RulePipeline, rng: R) -> Self {
        info!(
            "Creating simulation: {}x{} grid, {} rules, {}",
            grid.width(),
            grid.height(),
            pipeline.len(),
            grid.census()
        );
        let cells = grid.cell_count();
        Self {
            ignition: IgnitionLog::new(grid.width(), grid.height()),
            back_state: vec![CellState::Empty; cells],
            back_health: vec![0; cells],
            grid,
            pipeline,
            rng,
            step_count: 0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Set the step ceiling reported to drivers
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Advance the whole grid by one tick
    ///
    /// Cells burning at the start of the tick that have no ignition time yet
    /// are stamped with the current `step_count`.
    pub fn step(&mut self, env: &Environment) -> StepSummary {
        let tick = self.step_count;
        let width = self.grid.width();
        let height = self.grid.height();
        let mut summary = StepSummary {
            tick,
            ..StepSummary::default()
        };

        // Read phase: self.grid is not written until the swap below
        for y in 0..height {
            for x in 0..width {
                let idx = y * width + x;
                let before = self.grid.cell_at(idx);
                if before.state.is_burning() {
                    self.ignition.stamp(idx, tick);
                }

                let neighbors = Neighborhood::moore(&self.grid, x, y);
                let after = self
                    .pipeline
                    .apply_to(x, y, before, &neighbors, env, &mut self.rng);

                self.back_state[idx] = after.state;
                self.back_health[idx] = after.health;

                if before.state.is_fuel() && after.state.is_burning() {
                    summary.newly_ignited += 1;
                }
                if before.state.is_burning() && after.state == CellState::Ash {
                    summary.burned_out += 1;
                }
                if after.state.is_burning() {
                    summary.burning += 1;
                }
            }
        }

        // Commit phase
        std::mem::swap(&mut self.grid.state, &mut self.back_state);
        std::mem::swap(&mut self.grid.health, &mut self.back_health);
        self.step_count += 1;

        debug!(
            "Step {}: ignited={}, burned_out={}, burning={}",
            tick, summary.newly_ignited, summary.burned_out, summary.burning
        );
        summary
    }

    /// Current grid (read between steps)
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Set a fuel cell of the owned grid on fire between steps
    ///
    /// See [`Grid::ignite`]. Returns `true` if the cell was ignited.
    pub fn ignite(&mut self, x: i64, y: i64) -> bool {
        self.grid.ignite(x, y)
    }

    /// Overwrite one cell of the owned grid between steps
    ///
    /// Out-of-bounds writes are ignored. The grid itself cannot be replaced,
    /// so its dimensions always match the back buffers and ignition log.
    pub fn set(&mut self, x: i64, y: i64, state: CellState, health: Health) {
        self.grid.set(x, y, state, health);
    }

    /// Give the grid back, ending the simulation
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Rule chain in use
    pub fn pipeline(&self) -> &RulePipeline {
        &self.pipeline
    }

    /// Number of completed ticks, starting from 0
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Step ceiling for drivers
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// True once `step_count >= max_steps`. Stepping further is still allowed.
    pub fn reached_max_steps(&self) -> bool {
        self.step_count >= self.max_steps
    }

    /// True if any cell is burning
    pub fn is_burning(&self) -> bool {
        self.grid.has_fire()
    }

    /// Recorded ignition times
    pub fn ignition(&self) -> &IgnitionLog {
        &self.ignition
    }

    /// First tick at which `(x, y)` was seen burning, if ever
    pub fn ignition_time(&self, x: i64, y: i64) -> Option<u32> {
        self.grid
            .index_of(x, y)
            .and_then(|idx| self.ignition.tick_at(idx))
    }

    /// Dense row-major ignition-time matrix, 0 where a cell never burned
    pub fn ignition_map(&self) -> Vec<u32> {
        self.ignition.to_dense()
    }
}

impl<R> std::fmt::Debug for Simulation<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("width", &self.grid.width())
            .field("height", &self.grid.height())
            .field("rules", &self.pipeline.len())
            .field("step_count", &self.step_count)
            .field("max_steps", &self.max_steps)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Cell;
    use crate::random::FixedDraws;
    use crate::rules::{burning, ignite};

    fn certain() -> Environment {
        Environment::default()
            .with_ignition_probability(1.0)
            .with_humidity(0.0)
    }

    fn forest(width: usize, height: usize, health: Health) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for y in 0..height as i64 {
            for x in 0..width as i64 {
                grid.set(x, y, CellState::Tree, health);
            }
        }
        grid
    }

    #[test]
    fn test_step_count_starts_at_zero_and_increments() {
        let grid = Grid::new(2, 2).unwrap();
        let mut sim = Simulation::with_seed(grid, RulePipeline::standard(), 1).with_max_steps(3);
        assert_eq!(sim.step_count(), 0);
        for expected in 1..=5 {
            let summary = sim.step(&Environment::default());
            assert_eq!(summary.tick, expected - 1);
            assert_eq!(sim.step_count(), expected);
        }
        // No self-termination past max_steps
        assert!(sim.reached_max_steps());
        assert_eq!(sim.step_count(), 5);
    }

    #[test]
    fn test_default_max_steps() {
        let sim = Simulation::with_seed(Grid::new(1, 1).unwrap(), RulePipeline::new(), 0);
        assert_eq!(sim.max_steps(), DEFAULT_MAX_STEPS);
        assert!(!sim.reached_max_steps());
    }

    #[test]
    fn test_tree_next_to_fire_ignites_in_one_step() {
        let mut grid = forest(2, 1, 10);
        grid.set(0, 0, CellState::Fire, 5);
        let pipeline = RulePipeline::new().with_rule(ignite);
        let mut sim = Simulation::with_rng(grid, pipeline, FixedDraws::always_ignite());

        let summary = sim.step(&certain());
        assert_eq!(sim.grid().get(1, 0), Some(Cell::new(CellState::Fire, 10)));
        assert_eq!(summary.newly_ignited, 1);
        assert_eq!(summary.burning, 2);
    }

    #[test]
    fn test_isolated_tree_never_ignites() {
        let grid = forest(3, 3, 10);
        let mut sim = Simulation::with_rng(
            grid,
            RulePipeline::standard(),
            FixedDraws::always_ignite(),
        );
        for _ in 0..10 {
            sim.step(&certain());
        }
        assert!(sim.grid().states().iter().all(|&s| s == CellState::Tree));
    }

    #[test]
    fn test_read_phase_uses_frozen_snapshot() {
        // A row of trees with fire at the left end. If updates leaked into the
        // same tick the fire would race across the whole row.
        let mut grid = forest(6, 1, 10);
        grid.set(0, 0, CellState::Fire, 10);
        let mut sim = Simulation::with_rng(
            grid,
            RulePipeline::standard(),
            FixedDraws::always_ignite(),
        );

        sim.step(&certain());
        let fire: Vec<bool> = sim
            .grid()
            .states()
            .iter()
            .map(|s| s.is_burning())
            .collect();
        assert_eq!(fire, vec![true, true, false, false, false, false]);

        sim.step(&certain());
        assert_eq!(sim.grid().state_at(2, 0), Some(CellState::Fire));
        assert_eq!(sim.grid().state_at(3, 0), Some(CellState::Tree));
    }

    #[test]
    fn test_decay_to_ash_and_still_burning() {
        let mut grid = Grid::new(2, 1).unwrap();
        grid.set(0, 0, CellState::Fire, 1);
        grid.set(1, 0, CellState::Fire, 3);
        let pipeline = RulePipeline::new().with_rule(burning);
        let mut sim = Simulation::with_rng(grid, pipeline, FixedDraws::new(0.0, 1));

        let summary = sim.step(&Environment::default());
        assert_eq!(sim.grid().get(0, 0), Some(Cell::new(CellState::Ash, 0)));
        assert_eq!(sim.grid().get(1, 0), Some(Cell::new(CellState::Fire, 2)));
        assert_eq!(summary.burned_out, 1);
        assert_eq!(summary.burning, 1);
    }

    #[test]
    fn test_ignition_time_stamped_at_first_observation() {
        let mut grid = forest(3, 1, 3);
        grid.set(0, 0, CellState::Fire, 2);
        let mut sim = Simulation::with_rng(
            grid,
            RulePipeline::standard(),
            FixedDraws::always_ignite(),
        );

        // Seeded fire is not stamped before the first step
        assert_eq!(sim.ignition_time(0, 0), None);

        sim.step(&certain());
        assert_eq!(sim.ignition_time(0, 0), Some(0));
        // (1, 0) caught fire during tick 0 but is first observed burning at tick 1
        assert_eq!(sim.ignition_time(1, 0), None);

        sim.step(&certain());
        assert_eq!(sim.ignition_time(0, 0), Some(0));
        assert_eq!(sim.ignition_time(1, 0), Some(1));

        sim.step(&certain());
        assert_eq!(sim.ignition_time(2, 0), Some(2));
        assert_eq!(sim.ignition_map(), vec![0, 1, 2]);
        assert_eq!(sim.ignition_time(9, 0), None);
    }

    #[test]
    fn test_ignite_between_steps() {
        let grid = forest(3, 3, 10);
        let mut sim = Simulation::with_rng(
            grid,
            RulePipeline::standard(),
            FixedDraws::always_ignite(),
        );
        assert!(!sim.is_burning());
        assert!(!sim.ignite(5, 5));
        assert!(sim.ignite(1, 1));
        assert!(!sim.ignite(1, 1));
        assert!(sim.is_burning());

        let summary = sim.step(&certain());
        assert_eq!(summary.newly_ignited, 8);
        assert_eq!(sim.into_grid().census().count(CellState::Fire), 9);
    }

    #[test]
    fn test_external_edits_keep_grid_shape() {
        let mut sim = Simulation::with_rng(
            forest(4, 2, 3),
            RulePipeline::standard(),
            FixedDraws::always_ignite(),
        );
        sim.set(3, 1, CellState::Fire, 2);
        sim.set(4, 0, CellState::Fire, 2);
        sim.set(-1, 0, CellState::Fire, 2);
        assert_eq!(sim.grid().census().count(CellState::Fire), 1);

        for _ in 0..12 {
            sim.step(&certain());
            assert_eq!(sim.grid().shape(), (2, 4));
            assert_eq!(sim.grid().states().len(), 8);
            assert_eq!(sim.grid().healths().len(), 8);
            assert_eq!(sim.ignition_map().len(), 8);
        }
        assert_eq!(sim.grid().census().count(CellState::Ash), 8);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = |seed| {
            let mut grid = forest(12, 12, 10);
            grid.set(6, 6, CellState::Fire, 10);
            let mut sim = Simulation::with_seed(grid, RulePipeline::standard(), seed);
            for _ in 0..15 {
                sim.step(&Environment::default().with_ignition_probability(0.6));
            }
            sim.into_grid()
        };
        assert_eq!(run(99), run(99));
    }
}
