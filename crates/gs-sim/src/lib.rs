//! `gs-sim`: tick loop orchestrator for the gridsim engine.
//!
//! # Simultaneous-activation tick loop
//!
//! ```text
//! for tick in 0..settings.steps:
//!   ① Decide : BehaviorModel::decide for every live agent against the
//!               pre-tick world (parallel with the `parallel` feature).
//!   ② Commit : in ascending AgentId order, apply each decision:
//!                 Wait     → mood and state update only
//!                 Idle     → state update only (e.g. a new search path)
//!                 Move(d)  → deferred to admission passes
//!               Admission repeats over the deferred moves until a pass
//!               admits nothing; what remains is rejected.
//!               Search movers service targets on the cell they enter or
//!               stand on.
//!   ③ Advance: signal clock ticks, pheromone field decays.
//!   ④ Report : TickMetrics to observers, then a WorldSnapshot.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the decision phase on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the collision dedup set.                    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gs_behavior::DefaultPolicy;
//! use gs_sim::{NoopObserver, ScenarioConfig, SimBuilder};
//!
//! let config = ScenarioConfig::load("scenario.toml".as_ref())?;
//! let mut sim = SimBuilder::from_config(&config, DefaultPolicy)?.build()?;
//! let last = sim.run(&mut NoopObserver)?;
//! println!("serviced {} targets", last.serviced);
//! ```

pub mod builder;
pub mod collision;
pub mod config;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod observer;
pub mod occupancy;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use collision::{CollisionEvent, CollisionRegistry, CollisionRule};
pub use config::{
    BehaviorConfig, GridConfig, LightConfig, ObstaclePlacement, PheromoneConfig, Placement,
    PopulationConfig, ScenarioConfig, SignalConfig, SimSettings,
};
pub use error::{SimError, SimResult};
pub use loader::{load_placements_csv, load_placements_reader};
pub use metrics::TickMetrics;
pub use observer::{NoopObserver, RecordingObserver, SimObserver};
pub use occupancy::OccupancyRules;
pub use sim::Sim;
pub use snapshot::{AgentView, SignalView, WorldSnapshot};
