//! Land-cover states and per-cell fuel
//!
//! Every grid cell is one of six states. `Tree` and `Grass` carry fuel, `Fire`
//! is burning down its fuel counter, and `Ash`, `Water` and `Empty` are inert.
//! `Water` never changes under the reference rules and acts as a firebreak.

use serde::{Deserialize, Serialize};

/// Remaining burn duration of a cell, in ticks of decay.
pub type Health = u32;

/// Initial fuel for forest cells. Trees burn out slower than grass.
pub const TREE_INITIAL_HEALTH: Health = 10;

/// Initial fuel for grassland cells.
pub const GRASS_INITIAL_HEALTH: Health = 4;

/// Land-cover / fire state of a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellState {
    /// Bare ground, urban or unclassified land
    #[default]
    Empty,
    /// Forest fuel
    Tree,
    /// Grassland fuel
    Grass,
    /// Actively burning
    Fire,
    /// Burned out
    Ash,
    /// Open water, immutable
    Water,
}

impl CellState {
    /// Number of distinct states.
    pub const COUNT: usize = 6;

    /// All states in declaration order.
    pub const ALL: [CellState; Self::COUNT] = [
        CellState::Empty,
        CellState::Tree,
        CellState::Grass,
        CellState::Fire,
        CellState::Ash,
        CellState::Water,
    ];

    /// True for states that can catch fire (`Tree`, `Grass`).
    #[inline]
    pub const fn is_fuel(self) -> bool {
        matches!(self, CellState::Tree | CellState::Grass)
    }

    /// True while the cell is burning.
    #[inline]
    pub const fn is_burning(self) -> bool {
        matches!(self, CellState::Fire)
    }

    /// Fuel a freshly classified cell of this state starts with.
    pub const fn initial_health(self) -> Health {
        match self {
            CellState::Tree => TREE_INITIAL_HEALTH,
            CellState::Grass => GRASS_INITIAL_HEALTH,
            _ => 0,
        }
    }

    /// Position in [`CellState::ALL`], used for dense per-state tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-character glyph for terminal output.
    pub const fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Tree => 'T',
            CellState::Grass => ',',
            CellState::Fire => '*',
            CellState::Ash => '_',
            CellState::Water => '~',
        }
    }
}

impl std::fmt::Display for CellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CellState::Empty => "EMPTY",
            CellState::Tree => "TREE",
            CellState::Grass => "GRASS",
            CellState::Fire => "FIRE",
            CellState::Ash => "ASH",
            CellState::Water => "WATER",
        };
        f.write_str(name)
    }
}

/// A cell's state together with its fuel counter
///
/// This is the value threaded through the rule pipeline for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Land-cover / fire state
    pub state: CellState,
    /// Remaining fuel
    pub health: Health,
}

impl Cell {
    /// Create a cell from its parts
    #[must_use]
    pub const fn new(state: CellState, health: Health) -> Self {
        Self { state, health }
    }

    /// Create a cell of `state` carrying that state's initial fuel
    #[must_use]
    pub const fn with_initial_health(state: CellState) -> Self {
        Self {
            state,
            health: state.initial_health(),
        }
    }
}
