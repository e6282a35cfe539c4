//! The `BehaviorModel` trait: the extension point for custom policies.

use gs_core::{AgentId, AgentRng};

use crate::{Decision, SimContext};

/// Pluggable agent behavior.
///
/// `decide` receives a read-only [`SimContext`] and the agent's private
/// [`AgentRng`], so results do not depend on the order (or thread) in which
/// agents are evaluated.
///
/// # Thread safety
///
/// The simulation may call `decide` for many agents in parallel via Rayon,
/// so implementations must be `Send + Sync`.  State that varies per agent
/// must live in `AgentStore` and change through [`Decision::update`].
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysEast;
///
/// impl BehaviorModel for AlwaysEast {
///     fn decide(&self, agent: AgentId, ctx: &SimContext<'_>, _rng: &mut AgentRng) -> Decision {
///         if ctx.agents.kind(agent).is_mover() {
///             Decision::step(Heading::East.delta(), 0.0)
///         } else {
///             Decision::idle()
///         }
///     }
/// }
/// ```
pub trait BehaviorModel: Send + Sync + 'static {
    /// Called once per live agent per tick.
    fn decide(&self, agent: AgentId, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Decision;
}
