//! Landscape grid, neighborhoods and raster classification

mod cell_grid;
pub mod classification;
pub mod neighborhood;

// Re-export main types
pub use cell_grid::{Census, Grid, GridSnapshot};
pub use classification::{code_from_value, land_cover, ClassificationMap};
pub use neighborhood::{Neighbor, Neighborhood, MOORE_OFFSETS};
