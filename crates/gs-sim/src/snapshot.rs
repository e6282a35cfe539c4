//! Read-only post-tick views handed to observers.

use gs_agent::{AgentKind, AgentStore};
use gs_core::{AgentId, Orientation, Pos, Tick};
use gs_grid::GridWorld;
use gs_signal::{Phase, SignalController};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgentView {
    pub id:      AgentId,
    pub kind:    AgentKind,
    pub pos:     Pos,
    /// Happiness for vehicles, services for search movers, 0 otherwise.
    pub display: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignalView {
    pub pos:         Pos,
    pub orientation: Orientation,
    pub group:       u16,
    pub phase:       Phase,
}

/// The world as it stands after a tick, owned so observers can keep it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub tick:    Tick,
    pub agents:  Vec<AgentView>,
    pub signals: Vec<SignalView>,
}

impl WorldSnapshot {
    /// Capture live, placed agents in id order and every signal's phase.
    pub fn capture(
        tick:    Tick,
        grid:    &GridWorld,
        agents:  &AgentStore,
        signals: &SignalController,
    ) -> Self {
        let agents = agents
            .live_ids()
            .filter_map(|id| {
                grid.position(id).map(|pos| AgentView {
                    id,
                    kind: agents.kind(id),
                    pos,
                    display: agents.display_value(id),
                })
            })
            .collect();
        let signals = signals
            .signals()
            .iter()
            .map(|s| SignalView {
                pos:         s.pos,
                orientation: s.orientation,
                group:       s.group,
                phase:       signals.phase(s.orientation),
            })
            .collect();
        Self { tick, agents, signals }
    }

    pub fn agents_of(&self, kind: AgentKind) -> impl Iterator<Item = &AgentView> + '_ {
        self.agents.iter().filter(move |a| a.kind == kind)
    }
}
