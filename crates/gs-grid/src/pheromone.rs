//! A decaying scalar field laid over the lattice.
//!
//! Values live in `[0, 1]`.  Deposits saturate at 1; each tick the scheduler
//! calls [`decay`](PheromoneField::decay), which multiplies every cell by
//! `1 - evaporation`.  The field is never owned by an agent: movers only
//! read it during the decision phase and the scheduler writes it during
//! commit.

use gs_core::Pos;

use crate::GridWorld;

/// Evaporation rate used when a scenario enables the field without one.
pub const DEFAULT_EVAPORATION: f32 = 0.05;

#[derive(Clone, Debug)]
pub struct PheromoneField {
    width:       u32,
    height:      u32,
    evaporation: f32,
    values:      Vec<f32>,
}

impl PheromoneField {
    /// A zeroed field matching `grid`'s dimensions.
    ///
    /// `evaporation` is clamped to `[0, 1]`.
    pub fn new(grid: &GridWorld, evaporation: f32) -> Self {
        Self {
            width:       grid.width(),
            height:      grid.height(),
            evaporation: evaporation.clamp(0.0, 1.0),
            values:      vec![0.0; grid.cell_count()],
        }
    }

    pub fn evaporation(&self) -> f32 {
        self.evaporation
    }

    /// Field value at `pos`; 0 for off-grid positions.
    pub fn value(&self, pos: Pos) -> f32 {
        self.index(pos).map_or(0.0, |i| self.values[i])
    }

    /// Add `amount` at `pos`, saturating at 1.  Off-grid deposits are dropped.
    pub fn deposit(&mut self, pos: Pos, amount: f32) {
        if let Some(i) = self.index(pos) {
            self.values[i] = (self.values[i] + amount.max(0.0)).min(1.0);
        }
    }

    /// One tick of geometric decay.
    pub fn decay(&mut self) {
        let keep = 1.0 - self.evaporation;
        for v in &mut self.values {
            *v = (*v * keep).max(0.0);
        }
    }

    /// Sum over all cells.
    pub fn total(&self) -> f32 {
        self.values.iter().sum()
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        let inside = pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.width
            && (pos.y as u32) < self.height;
        inside.then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }
}
