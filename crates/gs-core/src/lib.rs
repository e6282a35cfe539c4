//! `gs-core`: foundational types for the `gridsim` engine.
//!
//! This crate is a dependency of every other `gs-*` crate.  It has no `gs-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `SignalId`                                     |
//! | [`pos`]     | `Pos`, `Delta`, `Heading`, `Orientation`                  |
//! | [`time`]    | `Tick`, `SimClock`                                        |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod pos;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, SignalId};
pub use pos::{Delta, Heading, Orientation, Pos};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick};
