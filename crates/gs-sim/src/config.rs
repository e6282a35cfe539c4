//! Scenario configuration: TOML schema, validation, and runtime settings.
//!
//! # Example
//!
//! ```toml
//! seed  = 42
//! steps = 200
//!
//! [grid]
//! width    = 10
//! height   = 10
//! topology = "toroidal"
//!
//! [signals]
//! cycle_length = 5
//! lights = [{ x = 6, y = 0, orientation = "horizontal" }]
//!
//! [[placements]]
//! kind    = "standard"
//! x       = 0
//! y       = 0
//! heading = "east"
//! ```
//!
//! Everything except `[grid]` has a default.  [`ScenarioConfig::validate`]
//! runs every check that does not need a populated grid; spawn conflicts and
//! free-cell shortages surface when the builder places agents.

use std::path::{Path, PathBuf};

use gs_agent::{AgentKind, ObstacleKind, DEFAULT_DWELL_TICKS};
use gs_core::{Heading, Orientation, Pos};
use gs_grid::{Connectivity, SearchStrategy, Topology, pheromone::DEFAULT_EVAPORATION};
use serde::{Deserialize, Serialize};

use crate::{CollisionRule, OccupancyRules, SimError, SimResult};

// ── SimSettings ───────────────────────────────────────────────────────────────

/// Runtime knobs read by the tick loop.
#[derive(Clone, Debug, PartialEq)]
pub struct SimSettings {
    /// Step budget: `run` stops once this many ticks have executed.
    pub steps:              u64,
    /// Master seed for placement and per-agent RNG streams.
    pub seed:               u64,
    pub connectivity:       Connectivity,
    /// Stop early once search movers have serviced every target.
    pub stop_when_serviced: bool,
    pub collision_rule:     CollisionRule,
    pub occupancy:          OccupancyRules,
    /// Publish a `WorldSnapshot` to observers after every tick.
    pub snapshots:          bool,
    /// Amount a search mover leaves on each cell it enters.
    pub pheromone_deposit:  f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            steps:              default_steps(),
            seed:               0,
            connectivity:       Connectivity::Moore,
            stop_when_serviced: false,
            collision_rule:     CollisionRule::Violations,
            occupancy:          OccupancyRules::default(),
            snapshots:          true,
            pheromone_deposit:  default_deposit(),
        }
    }
}

// ── TOML schema ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_steps")]
    pub steps: u64,
    #[serde(default)]
    pub stop_when_serviced: bool,
    #[serde(default)]
    pub collision_rule: CollisionRule,
    #[serde(default = "default_true")]
    pub snapshots: bool,
    /// Cell whose arrivals are counted, as `[x, y]`.
    #[serde(default)]
    pub terminus: Option<[i32; 2]>,
    /// Extra placements in CSV form (`kind,x,y,heading`).  Relative paths are
    /// resolved against the scenario file's directory by [`ScenarioConfig::load`].
    #[serde(default)]
    pub placements_csv: Option<PathBuf>,

    pub grid: GridConfig,
    #[serde(default)]
    pub signals: SignalConfig,
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub pheromone: Option<PheromoneConfig>,
    #[serde(default)]
    pub placements: Vec<Placement>,
    #[serde(default)]
    pub obstacles: Vec<ObstaclePlacement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width:  u32,
    pub height: u32,
    #[serde(default)]
    pub topology: Topology,
    #[serde(default)]
    pub connectivity: Connectivity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    #[serde(default = "default_cycle")]
    pub cycle_length: u32,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    pub x: i32,
    pub y: i32,
    pub orientation: String,
    #[serde(default)]
    pub group: u16,
}

/// Agents placed on random free cells, per kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopulationConfig {
    #[serde(default)]
    pub standard:   usize,
    #[serde(default)]
    pub emergency:  usize,
    #[serde(default)]
    pub transit:    usize,
    #[serde(default)]
    pub aggressive: usize,
    #[serde(default)]
    pub search:     usize,
    #[serde(default)]
    pub targets:    usize,
    #[serde(default)]
    pub obstacles:  usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub strategy: SearchStrategy,
    /// Red-signal disobedience probability for aggressive vehicles.
    #[serde(default = "default_disobedience")]
    pub disobedience: f64,
    #[serde(default = "default_dwell")]
    pub dwell_ticks: u32,
    /// Stops shared by every transit vehicle, as `[x, y]`.
    #[serde(default)]
    pub transit_stops: Vec<[i32; 2]>,
    #[serde(default = "default_true")]
    pub vehicles_exclusive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PheromoneConfig {
    #[serde(default = "default_evaporation")]
    pub evaporation: f32,
    #[serde(default = "default_deposit")]
    pub deposit: f32,
}

/// One explicitly placed agent.  Shared by the TOML list and the CSV loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: String,
    pub x:    i32,
    pub y:    i32,
    /// Vehicles only; defaults to east.
    #[serde(default)]
    pub heading: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePlacement {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub kind: ObstacleKind,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

fn default_steps() -> u64 { 100 }
fn default_cycle() -> u32 { 5 }
fn default_disobedience() -> f64 { 0.8 }
fn default_dwell() -> u32 { DEFAULT_DWELL_TICKS }
fn default_evaporation() -> f32 { DEFAULT_EVAPORATION }
fn default_deposit() -> f32 { 1.0 }
fn default_true() -> bool { true }

impl Default for SignalConfig {
    fn default() -> Self {
        Self { cycle_length: default_cycle(), lights: Vec::new() }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            strategy:           SearchStrategy::default(),
            disobedience:       default_disobedience(),
            dwell_ticks:        default_dwell(),
            transit_stops:      Vec::new(),
            vehicles_exclusive: true,
        }
    }
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self { evaporation: default_evaporation(), deposit: default_deposit() }
    }
}

// ── Loading / validation ──────────────────────────────────────────────────────

impl ScenarioConfig {
    /// Read, parse and validate a scenario file.
    pub fn load(path: &Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(csv) = config.placements_csv.take() {
            config.placements_csv = Some(match path.parent() {
                Some(dir) if csv.is_relative() => dir.join(csv),
                _ => csv,
            });
        }
        Ok(config)
    }

    /// Parse and validate a scenario held in memory.
    pub fn from_toml_str(text: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every constraint that does not depend on placement order.
    pub fn validate(&self) -> SimResult<()> {
        let GridConfig { width, height, .. } = self.grid;
        if width == 0 || height == 0 {
            return Err(config_err(format!("grid dimensions must be positive, got {width}x{height}")));
        }
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(config_err(format!("grid dimensions {width}x{height} are too large")));
        }
        if self.signals.cycle_length == 0 {
            return Err(config_err("signal cycle_length must be positive"));
        }
        let p = self.behavior.disobedience;
        if !(0.0..=1.0).contains(&p) {
            return Err(config_err(format!("disobedience must lie in [0, 1], got {p}")));
        }
        if let Some(ph) = &self.pheromone {
            if !(0.0..=1.0).contains(&ph.evaporation) {
                return Err(config_err(format!("evaporation must lie in [0, 1], got {}", ph.evaporation)));
            }
            if ph.deposit.is_nan() || ph.deposit < 0.0 {
                return Err(config_err(format!("pheromone deposit must be non-negative, got {}", ph.deposit)));
            }
        }

        for light in &self.signals.lights {
            light.orientation.parse::<Orientation>()?;
            self.check_cell("signal", light.x, light.y)?;
        }
        for p in &self.placements {
            p.resolve()?;
            self.check_cell("placement", p.x, p.y)?;
        }
        for o in &self.obstacles {
            self.check_cell("obstacle", o.x, o.y)?;
        }
        for [x, y] in &self.behavior.transit_stops {
            self.check_cell("transit stop", *x, *y)?;
        }
        if let Some([x, y]) = self.terminus {
            self.check_cell("terminus", x, y)?;
        }
        Ok(())
    }

    /// Runtime settings derived from this scenario.
    pub fn settings(&self) -> SimSettings {
        SimSettings {
            steps:              self.steps,
            seed:               self.seed,
            connectivity:       self.grid.connectivity,
            stop_when_serviced: self.stop_when_serviced,
            collision_rule:     self.collision_rule,
            occupancy:          OccupancyRules { vehicles_exclusive: self.behavior.vehicles_exclusive },
            snapshots:          self.snapshots,
            pheromone_deposit:  self.pheromone.as_ref().map_or(default_deposit(), |p| p.deposit),
        }
    }

    pub fn transit_stops(&self) -> Vec<Pos> {
        self.behavior.transit_stops.iter().map(|&[x, y]| Pos::new(x, y)).collect()
    }

    /// Coordinates outside the lattice are only allowed when the grid wraps.
    fn check_cell(&self, what: &str, x: i32, y: i32) -> SimResult<()> {
        let inside = x >= 0 && y >= 0 && (x as u32) < self.grid.width && (y as u32) < self.grid.height;
        if inside || self.grid.topology == Topology::Toroidal {
            Ok(())
        } else {
            Err(config_err(format!(
                "{what} at ({x}, {y}) lies outside the {}x{} grid",
                self.grid.width, self.grid.height
            )))
        }
    }
}

impl Placement {
    /// Parse the kind and heading columns.
    pub fn resolve(&self) -> SimResult<(AgentKind, Option<ObstacleKind>, Heading)> {
        let kind: AgentKind = self.kind.parse()?;
        let obstacle = match kind {
            AgentKind::Obstacle => Some(self.kind.parse::<ObstacleKind>().unwrap_or_default()),
            _ => None,
        };
        let heading = match self.heading.as_deref().map(str::trim) {
            None | Some("") => Heading::default(),
            Some(h) => h.parse()?,
        };
        Ok((kind, obstacle, heading))
    }

    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }
}

fn config_err(msg: impl Into<String>) -> SimError {
    SimError::Config(msg.into())
}
