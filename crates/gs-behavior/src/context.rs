//! Read-only simulation state passed to every behavior callback.

use gs_agent::{AgentKind, AgentStore};
use gs_core::{AgentId, Orientation, Pos, Tick};
use gs_grid::{Connectivity, GridWorld, PheromoneField};
use gs_signal::SignalController;

/// A read-only view of the pre-tick world, shared by every `decide` call.
///
/// Built once per tick by gs-sim.  All borrows live for the decision phase
/// only; the commit phase starts after the context is dropped.
pub struct SimContext<'a> {
    /// Tick being decided.
    pub tick: Tick,

    /// Neighborhood used for search and random walks.
    pub connectivity: Connectivity,

    pub grid: &'a GridWorld,

    pub signals: &'a SignalController,

    pub agents: &'a AgentStore,

    /// Present only when the scenario enables the pheromone field.
    pub pheromone: Option<&'a PheromoneField>,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(
        tick:         Tick,
        connectivity: Connectivity,
        grid:         &'a GridWorld,
        signals:      &'a SignalController,
        agents:       &'a AgentStore,
        pheromone:    Option<&'a PheromoneField>,
    ) -> Self {
        Self { tick, connectivity, grid, signals, agents, pheromone }
    }

    /// Where `agent` stands, `None` if it is off the grid.
    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Pos> {
        self.grid.position(agent)
    }

    /// `true` if any occupant of `pos` has `kind`.
    pub fn holds_kind(&self, pos: Pos, kind: AgentKind) -> bool {
        self.grid
            .occupants(pos)
            .iter()
            .any(|a| self.agents.is_alive(*a) && self.agents.kind(*a) == kind)
    }

    /// Cells search movers may enter.
    #[inline]
    pub fn is_passable(&self, pos: Pos) -> bool {
        !self.holds_kind(pos, AgentKind::Obstacle)
    }

    /// Cells holding an unserviced target.
    #[inline]
    pub fn has_target(&self, pos: Pos) -> bool {
        self.holds_kind(pos, AgentKind::Target)
    }

    /// `true` when `pos` holds a red signal gating traffic along `orientation`.
    #[inline]
    pub fn is_red_at(&self, pos: Pos, orientation: Orientation) -> bool {
        self.signals.is_red_at(pos, orientation)
    }
}
