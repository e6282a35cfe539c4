//! `gs-behavior`: agent behavior model trait and decision types.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`intent`]  | `Intent` (`Move`, `Wait`, `Idle`) and `Decision`                |
//! | [`context`] | `SimContext<'a>`: read-only tick snapshot shared by all agents |
//! | [`model`]   | `BehaviorModel` trait                                           |
//! | [`policy`]  | `DefaultPolicy`: per-kind dispatch for every built-in kind     |
//! | [`noop`]    | `NoopBehavior`: every agent idles                              |
//!
//! # Design notes
//!
//! The tick loop in gs-sim has two phases:
//!
//! 1. **Decision phase** (parallel): every live agent's `decide` runs against
//!    the same `&SimContext`.  Nothing is mutated except the agent's own RNG.
//!
//! 2. **Commit phase** (sequential, ascending id): each `Decision` is checked
//!    against the live grid and either applied or rejected.
//!
//! So a `BehaviorModel` only needs to be `Send + Sync`; per-agent state lives
//! in `AgentStore` and changes only through `Decision::update`.

pub mod context;
pub mod intent;
pub mod model;
pub mod noop;
pub mod policy;

#[cfg(test)]
mod tests;

pub use context::SimContext;
pub use intent::{Decision, Intent};
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
pub use policy::{mood, DefaultPolicy};
