//! A no-op behavior model: agents never move.

use gs_core::{AgentId, AgentRng};

use crate::{BehaviorModel, Decision, SimContext};

/// A [`BehaviorModel`] under which every agent idles.
///
/// Useful in tests that exercise the scheduler without movement.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn decide(&self, _agent: AgentId, _ctx: &SimContext<'_>, _rng: &mut AgentRng) -> Decision {
        Decision::idle()
    }
}
