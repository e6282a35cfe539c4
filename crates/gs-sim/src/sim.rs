//! The `Sim` struct and its tick loop.

use gs_agent::{AgentKind, AgentRngs, AgentState, AgentStore, StateUpdate};
use gs_behavior::{mood, BehaviorModel, Decision, Intent, SimContext};
use gs_core::{AgentId, Pos, SimClock, Tick};
use gs_grid::{GridWorld, PheromoneField};
use gs_signal::SignalController;
use tracing::{debug, info, trace, warn};

use crate::{
    CollisionRegistry, CollisionRule, NoopObserver, SimObserver, SimResult, SimSettings,
    TickMetrics, WorldSnapshot,
};

/// A move that passed the grid bounds and waits for occupancy admission.
struct PendingMove {
    agent:     AgentId,
    kind:      AgentKind,
    from:      Pos,
    to:        Pos,
    update:    Option<StateUpdate>,
    happiness: f32,
    violation: bool,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B>` holds all world state and drives the tick loop:
///
/// 1. **Decision phase** (parallel with the `parallel` feature): every live
///    agent's [`BehaviorModel::decide`] runs against one shared
///    [`SimContext`] built from the pre-tick world.
/// 2. **Commit phase** (sequential, ascending `AgentId`): waits and idles
///    settle first.  Moves are then admitted in passes over the live grid,
///    so a cell vacated by an admitted move is free for the next pass.  A
///    move still refused when a pass admits nothing is rejected and the
///    agent stays put.
/// 3. **Advance**: the signal clock ticks and the pheromone field decays.
/// 4. **Report**: metrics are collected and observers notified.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel> {
    pub settings: SimSettings,

    pub clock: SimClock,

    /// Lattice and occupancy.  Mutated only during the commit phase.
    pub grid: GridWorld,

    pub signals: SignalController,

    /// Agent state (SoA arrays).  Behavior models read it through
    /// `SimContext`.
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    pub pheromone: Option<PheromoneField>,

    pub collisions: CollisionRegistry,

    pub behavior: B,

    /// Cell whose arrivals are counted.
    pub terminus: Option<Pos>,

    pub(crate) terminus_arrivals: u64,
    pub(crate) serviced_total:    u64,
    pub(crate) last_metrics:      TickMetrics,
}

impl<B: BehaviorModel> Sim<B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the step budget is spent or, with `stop_when_serviced`,
    /// until every target has been serviced.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickMetrics> {
        self.run_while(|_| true, observer)
    }

    /// Like [`run`](Self::run), but also stops as soon as `keep_going`
    /// returns `false`.  The predicate is checked before every tick.
    pub fn run_while<O, F>(&mut self, mut keep_going: F, observer: &mut O) -> SimResult<TickMetrics>
    where
        O: SimObserver,
        F: FnMut(&Self) -> bool,
    {
        while !self.should_stop() && keep_going(self) {
            self.step_observed(observer)?;
        }
        self.finish(observer);
        Ok(self.last_metrics.clone())
    }

    /// Run exactly `n` ticks from the current position (ignores the budget
    /// and the serviced condition).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_observed(observer)?;
        }
        Ok(())
    }

    /// Execute one tick without an observer.
    pub fn step(&mut self) -> SimResult<TickMetrics> {
        self.step_observed(&mut NoopObserver)
    }

    /// `true` when `run` would not start another tick.
    pub fn should_stop(&self) -> bool {
        self.clock.current_tick >= Tick(self.settings.steps)
            || (self.settings.stop_when_serviced && self.all_serviced())
    }

    /// Search movers exist and no target is left.
    pub fn all_serviced(&self) -> bool {
        self.agents.count_kind(AgentKind::Search) > 0
            && self.agents.count_kind(AgentKind::Target) == 0
    }

    /// Metrics of the most recent tick (tick-0 baseline before the first).
    pub fn metrics(&self) -> &TickMetrics {
        &self.last_metrics
    }

    /// Capture the current world.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(self.clock.current_tick, &self.grid, &self.agents, &self.signals)
    }

    // ── Tick processing ───────────────────────────────────────────────────

    fn step_observed<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickMetrics> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let metrics = self.process_tick(now)?;
        observer.on_tick_end(&metrics);
        if self.settings.snapshots {
            observer.on_snapshot(&self.snapshot());
        }
        self.clock.advance();
        Ok(metrics)
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickMetrics> {
        // ── Phase 1: decide against the pre-tick world ────────────────────
        let decisions = self.compute_decisions(now);
        self.apply_decisions(decisions, now)
    }

    /// Commit `decisions` (ascending id), advance shared fields and collect
    /// the tick's metrics.
    pub(crate) fn apply_decisions(&mut self, decisions: Vec<(AgentId, Decision)>, now: Tick) -> SimResult<TickMetrics> {
        // ── Phase 2: commit in ascending id order ─────────────────────────
        let mut rejected = 0u64;
        let mut pending = Vec::new();
        for (agent, decision) in decisions {
            if let Some(mv) = self.commit_in_place(agent, decision, &mut rejected)? {
                pending.push(mv);
            }
        }
        self.resolve_moves(pending, now, &mut rejected)?;

        // ── Phase 3: advance shared fields ────────────────────────────────
        self.signals.advance();
        if let Some(field) = &mut self.pheromone {
            field.decay();
        }
        debug_assert!(self.grid.is_consistent(), "occupancy invariant broken at {now}");

        // ── Phase 4: metrics ──────────────────────────────────────────────
        let metrics = self.collect_metrics(now, rejected);
        debug!(
            tick = %now,
            serviced = metrics.serviced,
            remaining = metrics.remaining_targets,
            collisions = metrics.collisions,
            rejected,
            "tick complete"
        );
        self.last_metrics = metrics.clone();
        Ok(metrics)
    }

    /// Call `decide` for every live agent.
    ///
    /// With the `parallel` Cargo feature the calls run on Rayon's thread
    /// pool.  Results come back in ascending id order either way.
    fn compute_decisions(&mut self, now: Tick) -> Vec<(AgentId, Decision)> {
        #[cfg(feature = "parallel")]
        return self.decide_parallel(now);

        #[cfg(not(feature = "parallel"))]
        return self.decide_sequential(now);
    }

    #[cfg_attr(feature = "parallel", allow(dead_code))]
    pub(crate) fn decide_sequential(&mut self, now: Tick) -> Vec<(AgentId, Decision)> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let agents   = &self.agents;
        let behavior = &self.behavior;
        let ctx = SimContext::new(
            now,
            self.settings.connectivity,
            &self.grid,
            &self.signals,
            agents,
            self.pheromone.as_ref(),
        );

        self.rngs.inner
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| agents.alive[*i])
            .map(|(i, rng)| {
                let agent = AgentId(i as u32);
                (agent, behavior.decide(agent, &ctx, rng))
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn decide_parallel(&mut self, now: Tick) -> Vec<(AgentId, Decision)> {
        use rayon::prelude::*;

        let agents   = &self.agents;
        let behavior = &self.behavior;
        let ctx = SimContext::new(
            now,
            self.settings.connectivity,
            &self.grid,
            &self.signals,
            agents,
            self.pheromone.as_ref(),
        );

        self.rngs.inner
            .par_iter_mut()
            .enumerate()
            .filter(|(i, _)| agents.alive[*i])
            .map(|(i, rng)| {
                let agent = AgentId(i as u32);
                (agent, behavior.decide(agent, &ctx, rng))
            })
            .collect()
    }

    /// Settle a non-moving decision, or turn a move into a [`PendingMove`].
    fn commit_in_place(
        &mut self,
        agent:    AgentId,
        decision: Decision,
        rejected: &mut u64,
    ) -> SimResult<Option<PendingMove>> {
        if !self.agents.is_alive(agent) {
            return Ok(None);
        }
        let kind = self.agents.kind(agent);
        let Decision { intent, update, mood: happiness, violation } = decision;
        let Some(from) = self.grid.position(agent) else {
            return Ok(None);
        };

        let Intent::Move(delta) = intent else {
            if let Some(StateUpdate::Path(planned)) = &update {
                self.trace_replan(agent, planned.len());
            }
            self.settle(agent, kind, update, happiness);
            if kind == AgentKind::Search {
                self.service(agent, from)?;
            }
            return Ok(None);
        };

        match self.grid.translate(from, delta) {
            Ok(to) => Ok(Some(PendingMove { agent, kind, from, to, update, happiness, violation })),
            Err(_) => {
                *rejected += 1;
                trace!(%agent, %from, dx = delta.dx, dy = delta.dy, "move leaves the grid, holding");
                Ok(None)
            }
        }
    }

    /// Admit pending moves in ascending-id passes until a pass admits
    /// nothing.  Whatever is left is rejected.
    fn resolve_moves(&mut self, mut pending: Vec<PendingMove>, now: Tick, rejected: &mut u64) -> SimResult<()> {
        while !pending.is_empty() {
            let before = pending.len();
            let mut blocked = Vec::with_capacity(before);
            for mv in pending {
                if self.settings.occupancy.admits(&self.grid, &self.agents, mv.agent, mv.to) {
                    self.apply_move(mv, now)?;
                } else {
                    blocked.push(mv);
                }
            }
            pending = blocked;
            if pending.len() == before {
                break;
            }
        }

        for mv in pending {
            *rejected += 1;
            if mv.kind.is_vehicle() {
                self.agents.adjust_happiness(mv.agent, mood::REJECTED);
            }
            trace!(agent = %mv.agent, from = %mv.from, to = %mv.to, "destination occupied, move rejected");
        }
        Ok(())
    }

    fn apply_move(&mut self, mv: PendingMove, now: Tick) -> SimResult<()> {
        let PendingMove { agent, kind, from, to, update, happiness, violation } = mv;
        self.grid.move_agent(agent, to)?;
        self.settle(agent, kind, update, happiness);

        if self.counts_as_collision(agent, kind, violation, to) && self.collisions.record(to, now) {
            debug!(%agent, pos = %to, tick = %now, "collision recorded");
        }
        if kind == AgentKind::Search {
            self.agents.steps_taken[agent.index()] += 1;
            self.service(agent, to)?;
            if let Some(field) = &mut self.pheromone {
                field.deposit(to, self.settings.pheromone_deposit);
            }
        }
        if self.terminus == Some(to) && from != to && kind.is_mover() {
            self.terminus_arrivals += 1;
        }
        Ok(())
    }

    /// Apply the deferred parts of an accepted decision.
    fn settle(&mut self, agent: AgentId, kind: AgentKind, update: Option<StateUpdate>, happiness: f32) {
        if let Some(update) = update {
            self.agents.apply(agent, update);
        }
        if kind.is_vehicle() && happiness != 0.0 {
            self.agents.adjust_happiness(agent, happiness);
        }
    }

    fn trace_replan(&self, agent: AgentId, steps: usize) {
        if let AgentState::Search { path, .. } = &self.agents.state[agent.index()] {
            if !path.is_empty() {
                trace!(%agent, "stale path discarded");
            }
        }
        if steps == 0 {
            trace!(%agent, "no reachable target");
        } else {
            trace!(%agent, steps, "path planned");
        }
    }

    fn counts_as_collision(&self, agent: AgentId, kind: AgentKind, violation: bool, to: Pos) -> bool {
        match self.settings.collision_rule {
            CollisionRule::Violations   => violation,
            CollisionRule::RedOccupancy => {
                kind.is_vehicle()
                    && self.agents.state[agent.index()]
                        .orientation()
                        .is_some_and(|o| self.signals.is_red_at(to, o))
            }
            CollisionRule::Disabled     => false,
        }
    }

    /// Remove every unserviced target on `at` and credit `agent`.
    fn service(&mut self, agent: AgentId, at: Pos) -> SimResult<()> {
        let targets: Vec<AgentId> = self
            .grid
            .occupants(at)
            .iter()
            .copied()
            .filter(|o| self.agents.is_alive(*o) && self.agents.kind(*o) == AgentKind::Target)
            .collect();
        for target in targets {
            self.grid.remove(target)?;
            self.agents.retire(target);
            self.agents.serviced[agent.index()] += 1;
            self.serviced_total += 1;
            debug!(%agent, %target, pos = %at, "target serviced");
        }
        Ok(())
    }

    pub(crate) fn collect_metrics(&self, tick: Tick, rejected: u64) -> TickMetrics {
        let (_, steps) = self.agents.search_totals();
        let at_terminus = self.terminus.map_or(0, |t| {
            self.grid
                .occupants(t)
                .iter()
                .filter(|a| self.agents.kind(**a).is_mover())
                .count() as u64
        });
        let avg_path_length = if self.serviced_total > 0 {
            steps as f64 / self.serviced_total as f64
        } else {
            0.0
        };
        TickMetrics {
            tick,
            at_terminus,
            terminus_arrivals: self.terminus_arrivals,
            collisions:        self.collisions.count() as u64,
            serviced:          self.serviced_total,
            remaining_targets: self.agents.count_kind(AgentKind::Target) as u64,
            avg_path_length,
            mean_happiness:    self.agents.mean_happiness().map_or(0.0, f64::from),
            rejected_moves:    rejected,
        }
    }

    fn finish<O: SimObserver>(&mut self, observer: &mut O) {
        let m = &self.last_metrics;
        info!(
            ticks = self.clock.current_tick.0,
            serviced = m.serviced,
            collisions = m.collisions,
            terminus_arrivals = m.terminus_arrivals,
            "run finished"
        );
        if m.remaining_targets > 0 && self.agents.count_kind(AgentKind::Search) > 0 {
            warn!(remaining = m.remaining_targets, "run ended with unserviced targets");
        }
        observer.on_sim_end(self.clock.current_tick, &self.last_metrics);
    }
}
