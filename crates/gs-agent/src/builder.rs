//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use gs_agent::{AgentKind, AgentState, AgentStoreBuilder};
//! use gs_core::Heading;
//!
//! let mut builder = AgentStoreBuilder::new(/*seed=*/ 42);
//! let car = builder.push(AgentState::standard(Heading::East));
//! let (store, rngs) = builder.with(AgentState::Target).build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(rngs.len(),  2);
//! assert_eq!(store.kind(car), AgentKind::Standard);
//! ```

use gs_core::AgentId;

use crate::{AgentRngs, AgentState, AgentStore};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Ids are handed out in push order starting at 0, so the caller can place
/// agents on the grid before the store exists.
pub struct AgentStoreBuilder {
    seed:   u64,
    states: Vec<AgentState>,
}

impl AgentStoreBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed, states: Vec::new() }
    }

    /// Add one agent and return the id it will have.
    pub fn push(&mut self, state: AgentState) -> AgentId {
        let id = AgentId(self.states.len() as u32);
        self.states.push(state);
        id
    }

    /// Chaining form of [`push`](Self::push).
    pub fn with(mut self, state: AgentState) -> Self {
        self.push(state);
        self
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The id the next pushed agent will receive.
    pub fn next_id(&self) -> AgentId {
        AgentId(self.states.len() as u32)
    }

    /// Construct `AgentStore` and `AgentRngs`.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let rngs = AgentRngs::new(self.states.len(), self.seed);
        let store = AgentStore::new(self.states);
        (store, rngs)
    }
}
