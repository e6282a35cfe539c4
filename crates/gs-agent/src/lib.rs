//! `gs-agent`: Structure-of-Arrays agent storage for the `gridsim` engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`kind`]      | `AgentKind` tag, `AgentState` (inline per-kind state), `StateUpdate` |
//! | [`store`]     | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)    |
//! | [`builder`]   | `AgentStoreBuilder` (fluent construction)                 |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                            |
//!
//! Positions are not stored here: the grid is the single authority on where
//! an agent stands.

pub mod builder;
pub mod error;
pub mod kind;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use kind::{AgentKind, AgentState, ObstacleKind, StateUpdate, DEFAULT_DWELL_TICKS, INITIAL_HAPPINESS};
pub use store::{AgentRngs, AgentStore};
