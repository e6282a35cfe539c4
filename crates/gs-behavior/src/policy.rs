//! `DefaultPolicy`: the built-in decision rule for every agent kind.
//!
//! Dispatch is a single `match` on the agent's inline state.  Each arm is a
//! free function so applications writing their own [`BehaviorModel`] can
//! reuse individual rules.
//!
//! Vehicles look one cell ahead along their heading: a red signal of their
//! orientation standing there means the vehicle is at the stop line.

use gs_agent::{AgentState, StateUpdate};
use gs_core::{AgentId, AgentRng, Heading, Pos};
use gs_grid::{Path, SearchQuery, SearchStrategy};

use crate::{BehaviorModel, Decision, SimContext};

/// Happiness deltas applied at commit.
pub mod mood {
    /// Any vehicle held at a red signal (standard, transit).
    pub const RED_WAIT:        f32 = -1.0;
    pub const STANDARD_MOVE:   f32 = 0.1;
    pub const EMERGENCY_MOVE:  f32 = 0.5;
    /// Each tick a transit vehicle spends on a stop.
    pub const DWELL:           f32 = 1.0;
    pub const LEAVE_STOP:      f32 = -2.0;
    pub const RAN_RED:         f32 = 1.0;
    pub const AGGRESSIVE_OBEY: f32 = -1.0;
    pub const AGGRESSIVE_MOVE: f32 = -0.5;
    /// A move refused at commit because the destination was taken.
    pub const REJECTED:        f32 = -1.0;
}

/// Cells an emergency vehicle covers per tick.
pub const EMERGENCY_STRIDE: i32 = 2;

/// The built-in policy.
pub struct DefaultPolicy;

impl BehaviorModel for DefaultPolicy {
    fn decide(&self, agent: AgentId, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Decision {
        let Some(pos) = ctx.position(agent) else {
            return Decision::idle();
        };
        match &ctx.agents.state[agent.index()] {
            AgentState::Standard { heading } => standard(pos, *heading, ctx),
            AgentState::Emergency { heading } => emergency(*heading),
            AgentState::Transit { heading, stops, dwell_ticks, dwell } => {
                transit(pos, *heading, stops, *dwell_ticks, *dwell, ctx)
            }
            AgentState::Aggressive { heading, disobedience } => {
                aggressive(pos, *heading, *disobedience, ctx, rng)
            }
            AgentState::Search { strategy, path } => search(pos, *strategy, path, ctx, rng),
            AgentState::Target | AgentState::Obstacle(_) => Decision::idle(),
        }
    }
}

// ── Vehicles ──────────────────────────────────────────────────────────────────

/// `true` when the next cell along `heading` shows red for this vehicle.
pub fn red_ahead(pos: Pos, heading: Heading, ctx: &SimContext<'_>) -> bool {
    ctx.grid
        .translate(pos, heading.delta())
        .is_ok_and(|next| ctx.is_red_at(next, heading.orientation()))
}

pub fn standard(pos: Pos, heading: Heading, ctx: &SimContext<'_>) -> Decision {
    if red_ahead(pos, heading, ctx) {
        Decision::wait(mood::RED_WAIT)
    } else {
        Decision::step(heading.delta(), mood::STANDARD_MOVE)
    }
}

/// Emergency vehicles never look at signals.
pub fn emergency(heading: Heading) -> Decision {
    Decision::step(heading.delta().times(EMERGENCY_STRIDE), mood::EMERGENCY_MOVE)
}

pub fn transit(
    pos:         Pos,
    heading:     Heading,
    stops:       &[Pos],
    dwell_ticks: u32,
    dwell:       u32,
    ctx:         &SimContext<'_>,
) -> Decision {
    let red = red_ahead(pos, heading, ctx);
    if !stops.contains(&pos) {
        return if red {
            Decision::wait(mood::RED_WAIT)
        } else {
            Decision::step(heading.delta(), 0.0)
        };
    }
    if dwell < dwell_ticks {
        return Decision::wait(mood::DWELL).with_update(StateUpdate::Dwell(dwell + 1));
    }
    // Dwell finished.  The counter resets only once the bus actually pulls
    // away, so a red signal or a blocked cell keeps it ready to leave.
    if red {
        Decision::wait(mood::RED_WAIT)
    } else {
        Decision::step(heading.delta(), mood::LEAVE_STOP).with_update(StateUpdate::Dwell(0))
    }
}

pub fn aggressive(
    pos:          Pos,
    heading:      Heading,
    disobedience: f64,
    ctx:          &SimContext<'_>,
    rng:          &mut AgentRng,
) -> Decision {
    if !red_ahead(pos, heading, ctx) {
        return Decision::step(heading.delta(), mood::AGGRESSIVE_MOVE);
    }
    if rng.gen_bool(disobedience) {
        Decision::step(heading.delta(), mood::RAN_RED).violating()
    } else {
        Decision::wait(mood::AGGRESSIVE_OBEY)
    }
}

// ── Search movers ─────────────────────────────────────────────────────────────

/// Follow the current path while its target is still unserviced; otherwise
/// plan a new one and idle this tick.
///
/// A mover already standing on a target stays put; the commit phase
/// services targets under an idle search mover.
pub fn search(
    pos:      Pos,
    strategy: SearchStrategy,
    path:     &Path,
    ctx:      &SimContext<'_>,
    rng:      &mut AgentRng,
) -> Decision {
    if ctx.has_target(pos) {
        return Decision::idle();
    }
    let Some(finder) = strategy.pathfinder() else {
        return random_walk(pos, ctx, rng);
    };

    if let (Some(next), Some(goal)) = (path.next_step(), path.target()) {
        if ctx.has_target(goal) && ctx.is_passable(next) {
            return Decision::step(ctx.grid.delta_between(pos, next), 0.0)
                .with_update(StateUpdate::Path(path.advanced()));
        }
    }

    let passable = |p: Pos| ctx.is_passable(p);
    let is_target = |p: Pos| ctx.has_target(p);
    let query = SearchQuery {
        connectivity: ctx.connectivity,
        passable:     &passable,
        is_target:    &is_target,
    };
    let planned = finder.search(ctx.grid, pos, &query).unwrap_or_default();
    Decision::idle().with_update(StateUpdate::Path(planned))
}

/// One step to a random passable neighbor.  With a pheromone field the
/// choice is restricted to the least-marked neighbors.
pub fn random_walk(pos: Pos, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Decision {
    let mut options: Vec<Pos> = ctx
        .grid
        .neighbors(pos, ctx.connectivity, false)
        .into_iter()
        .filter(|p| ctx.is_passable(*p))
        .collect();

    if let Some(field) = ctx.pheromone {
        let least = options.iter().map(|p| field.value(*p)).fold(f32::INFINITY, f32::min);
        options.retain(|p| field.value(*p) <= least);
    }

    match rng.choose(&options) {
        Some(&to) => Decision::step(ctx.grid.delta_between(pos, to), 0.0),
        None => Decision::idle(),
    }
}
