//! `gs-signal`: signal groups and their phase cycle.
//!
//! # Cycle model
//!
//! Every signal shares one period of `2 × cycle_length` ticks.  At elapsed
//! tick `t`:
//!
//! ```text
//! cycle_pos          = t % (2 * cycle_length)
//! horizontal green   ⇔ cycle_pos < cycle_length
//! vertical green     ⇔ not horizontal green
//! ```
//!
//! Because the phase is a pure function of `t`, `cycle_length` and
//! orientation, two signals of the same orientation can never disagree.
//! The controller only stores `t`; the scheduler bumps it once per tick
//! after the commit phase.

pub mod controller;
pub mod error;

#[cfg(test)]
mod tests;

pub use controller::{Phase, Signal, SignalController};
pub use error::{SignalError, SignalResult};
