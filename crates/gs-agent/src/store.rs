//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The parallel decision phase needs `&mut AgentRngs` (each agent's private
//! RNG) and `&AgentStore` (shared read access to every agent's state) at the
//! same time.  Keeping the RNGs outside the store lets both borrows coexist:
//!
//! ```ignore
//! // gs-sim decision phase (simplified):
//! let store: &AgentStore = &sim.store;
//! let decisions = sim.rngs.inner
//!     .par_iter_mut()
//!     .enumerate()
//!     .map(|(i, rng)| behavior.decide(AgentId(i as u32), &ctx, rng))
//!     .collect::<Vec<_>>();
//! ```

use gs_core::{AgentId, AgentRng};

use crate::{AgentKind, AgentState, StateUpdate};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`].
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them.  Removed agents (serviced targets) keep their slot
/// with `alive == false`.
pub struct AgentStore {
    /// Number of agent slots.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Kind tag plus inline behavior state.
    pub state: Vec<AgentState>,

    /// Happiness accumulator.  Starts at [`INITIAL_HAPPINESS`](crate::INITIAL_HAPPINESS)
    /// for vehicles and stays 0 for everything else.
    pub happiness: Vec<f32>,

    /// Targets serviced by each search mover.
    pub serviced: Vec<u32>,

    /// Cells walked by each search mover.
    pub steps_taken: Vec<u32>,

    /// `false` once an agent has been removed from the world.
    pub alive: Vec<bool>,
}

impl AgentStore {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Iterator over the ids of agents still in the world.
    pub fn live_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(|a| self.alive[a.index()])
    }

    #[inline]
    pub fn kind(&self, agent: AgentId) -> AgentKind {
        self.state[agent.index()].kind()
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.alive.get(agent.index()).copied().unwrap_or(false)
    }

    /// Number of live agents of `kind`.
    pub fn count_kind(&self, kind: AgentKind) -> usize {
        self.live_ids().filter(|a| self.kind(*a) == kind).count()
    }

    /// The numeric attribute shown next to an agent: happiness for vehicles,
    /// services for search movers, 0 otherwise.
    pub fn display_value(&self, agent: AgentId) -> f32 {
        let i = agent.index();
        match self.kind(agent) {
            k if k.is_vehicle() => self.happiness[i],
            AgentKind::Search   => self.serviced[i] as f32,
            _                   => 0.0,
        }
    }

    /// Mean happiness over live vehicles, `None` when there are none.
    pub fn mean_happiness(&self) -> Option<f32> {
        let (sum, n) = self
            .live_ids()
            .filter(|a| self.kind(*a).is_vehicle())
            .fold((0.0_f64, 0usize), |(s, n), a| (s + self.happiness[a.index()] as f64, n + 1));
        (n > 0).then(|| (sum / n as f64) as f32)
    }

    /// Total services and steps over all search movers.
    pub fn search_totals(&self) -> (u64, u64) {
        self.agent_ids()
            .filter(|a| self.kind(*a) == AgentKind::Search)
            .fold((0, 0), |(s, t), a| {
                (s + self.serviced[a.index()] as u64, t + self.steps_taken[a.index()] as u64)
            })
    }

    // ── Apply-phase mutation ──────────────────────────────────────────────

    /// Apply a deferred state update.  Mismatched updates are dropped.
    pub fn apply(&mut self, agent: AgentId, update: StateUpdate) -> bool {
        self.state[agent.index()].apply(update)
    }

    /// Add `delta` to an agent's happiness.
    #[inline]
    pub fn adjust_happiness(&mut self, agent: AgentId, delta: f32) {
        self.happiness[agent.index()] += delta;
    }

    /// Mark an agent as removed.  Returns `false` if it already was.
    pub fn retire(&mut self, agent: AgentId) -> bool {
        std::mem::replace(&mut self.alive[agent.index()], false)
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(state: Vec<AgentState>) -> Self {
        let count = state.len();
        let happiness = state
            .iter()
            .map(|s| if s.kind().is_vehicle() { crate::INITIAL_HAPPINESS } else { 0.0 })
            .collect();
        Self {
            count,
            state,
            happiness,
            serviced: vec![0; count],
            steps_taken: vec![0; count],
            alive: vec![true; count],
        }
    }
}
