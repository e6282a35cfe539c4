//! Which kinds may share a cell.
//!
//! The same rule gates both commit-time moves and construction-time
//! placement, so a world can never start in a state a move could not reach.

use gs_agent::{AgentKind, AgentStore};
use gs_core::{AgentId, Pos};
use gs_grid::GridWorld;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OccupancyRules {
    /// Standard, transit and aggressive vehicles exclude one another.
    pub vehicles_exclusive: bool,
}

impl Default for OccupancyRules {
    fn default() -> Self {
        Self { vehicles_exclusive: true }
    }
}

impl OccupancyRules {
    /// `true` if an agent of `incoming` may stand alongside one of `present`.
    pub fn compatible(&self, incoming: AgentKind, present: AgentKind) -> bool {
        if incoming == AgentKind::Obstacle || present == AgentKind::Obstacle {
            return false;
        }
        !(self.vehicles_exclusive
            && incoming.is_exclusive_vehicle()
            && present.is_exclusive_vehicle())
    }

    /// `true` if `agent` may enter `pos` given the cell's live occupants.
    /// The agent itself is ignored, so staying put is always admitted.
    pub fn admits(&self, grid: &GridWorld, agents: &AgentStore, agent: AgentId, pos: Pos) -> bool {
        let incoming = agents.kind(agent);
        grid.occupants(pos)
            .iter()
            .filter(|o| **o != agent && agents.is_alive(**o))
            .all(|o| self.compatible(incoming, agents.kind(*o)))
    }
}
