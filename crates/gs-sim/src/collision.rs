//! Conflicting-occupancy events and the rule deciding which moves count.

use gs_core::{Pos, Tick};
use serde::{Deserialize, Serialize};

#[cfg(feature = "fx-hash")]
type EventSet = rustc_hash::FxHashSet<(Pos, Tick)>;
#[cfg(not(feature = "fx-hash"))]
type EventSet = std::collections::HashSet<(Pos, Tick)>;

/// Which committed moves produce a collision event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionRule {
    /// A move flagged as running a red signal records at its destination.
    #[default]
    Violations,
    /// Any vehicle entering a cell whose signal for its orientation is red,
    /// emergency vehicles included.
    RedOccupancy,
    Disabled,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub pos:  Pos,
    pub tick: Tick,
}

/// Append-only log of collision events, at most one per `(pos, tick)`.
#[derive(Debug, Default)]
pub struct CollisionRegistry {
    seen:   EventSet,
    events: Vec<CollisionEvent>,
}

impl CollisionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a collision.  Returns `false` when `(pos, tick)` was already
    /// recorded, leaving the registry unchanged.
    pub fn record(&mut self, pos: Pos, tick: Tick) -> bool {
        if !self.seen.insert((pos, tick)) {
            return false;
        }
        self.events.push(CollisionEvent { pos, tick });
        true
    }

    /// Running total.
    pub fn count(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Events recorded during `tick`.
    pub fn at_tick(&self, tick: Tick) -> impl Iterator<Item = &CollisionEvent> + '_ {
        self.events.iter().filter(move |e| e.tick == tick)
    }
}
