//! First-ignition bookkeeping for risk maps
//!
//! Records the tick at which each cell was first seen burning at the start of
//! a step. Rules never read it; it feeds risk visualization only.

/// Per-cell first ignition tick, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnitionLog {
    width: usize,
    height: usize,
    ticks: Vec<Option<u32>>,
}

impl IgnitionLog {
    /// Create an empty log for a `width` x `height` grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ticks: vec![None; width * height],
        }
    }

    /// Record `tick` for the cell at `idx` unless it already has a time
    pub(crate) fn stamp(&mut self, idx: usize, tick: u32) {
        let slot = &mut self.ticks[idx];
        if slot.is_none() {
            *slot = Some(tick);
        }
    }

    /// Ignition tick of the cell at flat index `idx`
    pub fn tick_at(&self, idx: usize) -> Option<u32> {
        self.ticks.get(idx).copied().flatten()
    }

    /// Number of cells that have burned so far
    pub fn ignited_count(&self) -> usize {
        self.ticks.iter().filter(|t| t.is_some()).count()
    }

    /// Latest recorded ignition tick
    pub fn latest(&self) -> Option<u32> {
        self.ticks.iter().filter_map(|t| *t).max()
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Dense matrix with 0 for cells that never burned
    ///
    /// Tick 0 and "never" share the value 0 here; use [`tick_at`](Self::tick_at)
    /// to tell them apart.
    pub fn to_dense(&self) -> Vec<u32> {
        self.ticks.iter().map(|t| t.unwrap_or(0)).collect()
    }
}
