//! The lattice and its occupancy index.
//!
//! # Data layout
//!
//! Cells are stored row-major in one `Vec`, so the occupants of `(x, y)` live
//! at `cells[y * width + x]`.  A second `Vec` indexed by `AgentId` records
//! where each agent stands.  The two are only ever mutated together inside
//! [`place`](GridWorld::place), [`remove`](GridWorld::remove) and
//! [`move_agent`](GridWorld::move_agent), which is what keeps the occupancy
//! invariant (agent in exactly one cell, and that cell is its position).
//!
//! Occupant lists are kept sorted by `AgentId` so iteration over a cell is
//! deterministic regardless of arrival order.

use gs_core::{AgentId, Delta, Pos};

use crate::{GridError, GridResult};

// ── Topology / Connectivity ──────────────────────────────────────────────────

/// What happens at the lattice edges.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Topology {
    /// Edges clip: positions outside `[0, width) × [0, height)` are invalid.
    #[default]
    Bounded,
    /// Edges wrap: the opposite edge is adjacent.
    Toroidal,
}

/// Which cells count as adjacent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Connectivity {
    /// 8-neighborhood.
    #[default]
    Moore,
    /// 4-neighborhood.
    VonNeumann,
}

impl Connectivity {
    #[inline]
    fn admits(self, dx: i32, dy: i32) -> bool {
        match self {
            Connectivity::Moore      => true,
            Connectivity::VonNeumann => dx == 0 || dy == 0,
        }
    }
}

// ── GridWorld ─────────────────────────────────────────────────────────────────

/// A fixed-size 2-D lattice with multi-occupancy cells.
#[derive(Clone, Debug)]
pub struct GridWorld {
    width:     u32,
    height:    u32,
    topology:  Topology,
    /// Row-major occupant lists, each sorted by `AgentId`.
    cells:     Vec<Vec<AgentId>>,
    /// Position of each agent, indexed by `AgentId`.  `None` when unplaced.
    positions: Vec<Option<Pos>>,
}

impl GridWorld {
    /// Create an empty grid.  Both dimensions must be positive.
    pub fn new(width: u32, height: u32, topology: Topology) -> GridResult<Self> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(GridError::ZeroDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            topology,
            cells: vec![Vec::new(); width as usize * height as usize],
            positions: Vec::new(),
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// `true` if `pos` lies inside `[0, width) × [0, height)` (ignores wrap).
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Row-major index of an in-range position.
    #[inline]
    pub fn cell_index(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(pos), "cell_index({pos}) out of range");
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Inverse of [`cell_index`](Self::cell_index).
    #[inline]
    pub fn pos_of(&self, index: usize) -> Pos {
        let w = self.width as usize;
        Pos::new((index % w) as i32, (index / w) as i32)
    }

    /// Iterator over every cell position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cells.len()).map(|i| self.pos_of(i))
    }

    // ── Topology-aware arithmetic ─────────────────────────────────────────

    /// Map `pos` onto the lattice: toroidal grids wrap, bounded grids reject.
    pub fn normalize(&self, pos: Pos) -> GridResult<Pos> {
        match self.topology {
            Topology::Toroidal => Ok(Pos::new(
                pos.x.rem_euclid(self.width as i32),
                pos.y.rem_euclid(self.height as i32),
            )),
            Topology::Bounded if self.contains(pos) => Ok(pos),
            Topology::Bounded => Err(GridError::OutOfBounds(pos)),
        }
    }

    /// Resolve `pos + delta` under the grid's topology.
    #[inline]
    pub fn translate(&self, pos: Pos, delta: Delta) -> GridResult<Pos> {
        self.normalize(pos.offset(delta))
    }

    /// The shortest displacement leading from `from` to `to`.
    ///
    /// On a toroidal grid each axis picks the shorter way around, so stepping
    /// across the seam yields `±1` rather than `∓(width − 1)`.
    pub fn delta_between(&self, from: Pos, to: Pos) -> Delta {
        let mut dx = to.x - from.x;
        let mut dy = to.y - from.y;
        if self.topology == Topology::Toroidal {
            dx = wrap_axis(dx, self.width as i32);
            dy = wrap_axis(dy, self.height as i32);
        }
        Delta::new(dx, dy)
    }

    /// Adjacent positions of `pos`, in x-major then y-minor order.
    ///
    /// Bounded grids drop positions past the edge; toroidal grids wrap them.
    /// A position reachable through two offsets (grids narrower than three
    /// cells) is listed once.
    pub fn neighbors(&self, pos: Pos, connectivity: Connectivity, include_center: bool) -> Vec<Pos> {
        let mut out = Vec::with_capacity(9);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    if include_center && !out.contains(&pos) {
                        out.push(pos);
                    }
                    continue;
                }
                if !connectivity.admits(dx, dy) {
                    continue;
                }
                if let Ok(n) = self.translate(pos, Delta::new(dx, dy)) {
                    if (include_center || n != pos) && !out.contains(&n) {
                        out.push(n);
                    }
                }
            }
        }
        out
    }

    // ── Occupancy queries ─────────────────────────────────────────────────

    /// Agents standing on `pos`, sorted by id.  Empty for off-grid positions.
    pub fn occupants(&self, pos: Pos) -> &[AgentId] {
        if self.contains(pos) {
            &self.cells[self.cell_index(pos)]
        } else {
            &[]
        }
    }

    pub fn is_empty_cell(&self, pos: Pos) -> bool {
        self.occupants(pos).is_empty()
    }

    /// Where `agent` currently stands.
    pub fn position(&self, agent: AgentId) -> Option<Pos> {
        self.positions.get(agent.index()).copied().flatten()
    }

    /// Number of agents currently on the grid.
    pub fn placed_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Put an unplaced agent on `pos`.  Returns the (wrapped) cell used.
    pub fn place(&mut self, agent: AgentId, pos: Pos) -> GridResult<Pos> {
        let pos = self.normalize(pos)?;
        if let Some(current) = self.position(agent) {
            return Err(GridError::AlreadyPlaced(agent, current));
        }
        if self.positions.len() <= agent.index() {
            self.positions.resize(agent.index() + 1, None);
        }
        self.insert_occupant(agent, pos);
        self.positions[agent.index()] = Some(pos);
        Ok(pos)
    }

    /// Take `agent` off the grid.  Returns the cell it stood on.
    pub fn remove(&mut self, agent: AgentId) -> GridResult<Pos> {
        let pos = self.position(agent).ok_or(GridError::NotPlaced(agent))?;
        self.remove_occupant(agent, pos);
        self.positions[agent.index()] = None;
        Ok(pos)
    }

    /// Relocate a placed agent.  The destination is validated before anything
    /// changes, so a failed move leaves the grid untouched.
    pub fn move_agent(&mut self, agent: AgentId, to: Pos) -> GridResult<Pos> {
        let to = self.normalize(to)?;
        let from = self.position(agent).ok_or(GridError::NotPlaced(agent))?;
        if from != to {
            self.remove_occupant(agent, from);
            self.insert_occupant(agent, to);
            self.positions[agent.index()] = Some(to);
        }
        Ok(to)
    }

    /// Verify the occupancy invariant in both directions.
    ///
    /// O(cells + agents); intended for tests and `debug_assert!`.
    pub fn is_consistent(&self) -> bool {
        let forward = self.positions.iter().enumerate().all(|(i, p)| match p {
            Some(pos) => {
                let cell = &self.cells[self.cell_index(*pos)];
                cell.iter().filter(|a| a.index() == i).count() == 1
            }
            None => true,
        });
        let backward = self.cells.iter().enumerate().all(|(idx, cell)| {
            let here = self.pos_of(idx);
            cell.windows(2).all(|w| w[0] < w[1])
                && cell.iter().all(|a| self.position(*a) == Some(here))
        });
        forward && backward
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn insert_occupant(&mut self, agent: AgentId, pos: Pos) {
        let idx = self.cell_index(pos);
        let cell = &mut self.cells[idx];
        if let Err(at) = cell.binary_search(&agent) {
            cell.insert(at, agent);
        }
    }

    fn remove_occupant(&mut self, agent: AgentId, pos: Pos) {
        let idx = self.cell_index(pos);
        let cell = &mut self.cells[idx];
        if let Ok(at) = cell.binary_search(&agent) {
            cell.remove(at);
        }
    }
}

/// Fold a raw axis offset into `(-len/2, len/2]`.
#[inline]
fn wrap_axis(d: i32, len: i32) -> i32 {
    let d = d.rem_euclid(len);
    if d > len / 2 { d - len } else { d }
}
