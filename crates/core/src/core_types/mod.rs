//! Core data types: cell states, fuel and per-step environment

pub mod cell;
pub mod environment;

pub use cell::{Cell, CellState, Health, GRASS_INITIAL_HEALTH, TREE_INITIAL_HEALTH};
pub use environment::{
    Environment, EnvironmentError, Wind, DEFAULT_HUMIDITY, DEFAULT_IGNITION_PROBABILITY,
    REFERENCE_TEMPERATURE,
};
