//! Agent kinds and their inline behavior state.
//!
//! Every agent carries one [`AgentState`] variant.  The variant is both the
//! kind tag used for occupancy rules and the private state the default policy
//! reads when deciding.  Immovable kinds (targets, obstacles) carry nothing
//! beyond their tag.

use std::fmt;
use std::str::FromStr;

use gs_core::{Heading, Orientation, Pos};
use gs_grid::{Path, SearchStrategy};

use crate::AgentError;

/// Starting value of every vehicle's happiness accumulator.
pub const INITIAL_HAPPINESS: f32 = 100.0;

/// Ticks a transit vehicle waits on a stop unless configured otherwise.
pub const DEFAULT_DWELL_TICKS: u32 = 5;

// ── AgentKind ─────────────────────────────────────────────────────────────────

/// Kind tag, without state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AgentKind {
    Standard,
    Emergency,
    Transit,
    Aggressive,
    Search,
    Target,
    Obstacle,
}

impl AgentKind {
    pub const ALL: [AgentKind; 7] = [
        AgentKind::Standard,
        AgentKind::Emergency,
        AgentKind::Transit,
        AgentKind::Aggressive,
        AgentKind::Search,
        AgentKind::Target,
        AgentKind::Obstacle,
    ];

    /// Road vehicles: they follow a heading and carry happiness.
    #[inline]
    pub fn is_vehicle(self) -> bool {
        matches!(
            self,
            AgentKind::Standard | AgentKind::Emergency | AgentKind::Transit | AgentKind::Aggressive
        )
    }

    /// Vehicles that may not share a cell with one another.  Emergency
    /// vehicles are exempt.
    #[inline]
    pub fn is_exclusive_vehicle(self) -> bool {
        matches!(self, AgentKind::Standard | AgentKind::Transit | AgentKind::Aggressive)
    }

    /// Anything that can emit a `Move`.
    #[inline]
    pub fn is_mover(self) -> bool {
        self.is_vehicle() || self == AgentKind::Search
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Standard   => "standard",
            AgentKind::Emergency  => "emergency",
            AgentKind::Transit    => "transit",
            AgentKind::Aggressive => "aggressive",
            AgentKind::Search     => "search",
            AgentKind::Target     => "target",
            AgentKind::Obstacle   => "obstacle",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "car"          => Ok(AgentKind::Standard),
            "emergency" | "ambulance"   => Ok(AgentKind::Emergency),
            "transit" | "bus"           => Ok(AgentKind::Transit),
            "aggressive"                => Ok(AgentKind::Aggressive),
            "search" | "cleaner"        => Ok(AgentKind::Search),
            "target" | "dirt"           => Ok(AgentKind::Target),
            "obstacle"                  => Ok(AgentKind::Obstacle),
            // Obstacle sub-kinds are accepted as kinds in their own right.
            other if other.parse::<ObstacleKind>().is_ok() => Ok(AgentKind::Obstacle),
            other => Err(AgentError::UnknownKind(other.to_owned())),
        }
    }
}

// ── ObstacleKind ──────────────────────────────────────────────────────────────

/// Display tag for immovable cells.  All kinds block movers identically.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ObstacleKind {
    #[default]
    Building,
    Roundabout,
    Boundary,
}

impl ObstacleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObstacleKind::Building   => "building",
            ObstacleKind::Roundabout => "roundabout",
            ObstacleKind::Boundary   => "boundary",
        }
    }
}

impl FromStr for ObstacleKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "building" | "obstacle" => Ok(ObstacleKind::Building),
            "roundabout"            => Ok(ObstacleKind::Roundabout),
            "boundary" | "wall"     => Ok(ObstacleKind::Boundary),
            other => Err(AgentError::UnknownObstacle(other.to_owned())),
        }
    }
}

// ── AgentState ────────────────────────────────────────────────────────────────

/// Kind-specific behavior state, stored inline per agent.
#[derive(Clone, Debug, PartialEq)]
pub enum AgentState {
    Standard {
        heading: Heading,
    },
    Emergency {
        heading: Heading,
    },
    Transit {
        heading:     Heading,
        stops:       Vec<Pos>,
        dwell_ticks: u32,
        /// Ticks already spent on the current stop.
        dwell:       u32,
    },
    Aggressive {
        heading:      Heading,
        /// Probability in `[0, 1]` of running a red signal.
        disobedience: f64,
    },
    Search {
        strategy: SearchStrategy,
        path:     Path,
    },
    Target,
    Obstacle(ObstacleKind),
}

impl AgentState {
    pub fn standard(heading: Heading) -> Self {
        AgentState::Standard { heading }
    }

    pub fn emergency(heading: Heading) -> Self {
        AgentState::Emergency { heading }
    }

    pub fn transit(heading: Heading, stops: Vec<Pos>, dwell_ticks: u32) -> Self {
        AgentState::Transit { heading, stops, dwell_ticks, dwell: 0 }
    }

    pub fn aggressive(heading: Heading, disobedience: f64) -> Self {
        AgentState::Aggressive { heading, disobedience }
    }

    pub fn search(strategy: SearchStrategy) -> Self {
        AgentState::Search { strategy, path: Path::empty() }
    }

    pub fn kind(&self) -> AgentKind {
        match self {
            AgentState::Standard { .. }   => AgentKind::Standard,
            AgentState::Emergency { .. }  => AgentKind::Emergency,
            AgentState::Transit { .. }    => AgentKind::Transit,
            AgentState::Aggressive { .. } => AgentKind::Aggressive,
            AgentState::Search { .. }     => AgentKind::Search,
            AgentState::Target            => AgentKind::Target,
            AgentState::Obstacle(_)       => AgentKind::Obstacle,
        }
    }

    /// Travel direction for vehicles; `None` for everything else.
    pub fn heading(&self) -> Option<Heading> {
        match self {
            AgentState::Standard { heading }
            | AgentState::Emergency { heading }
            | AgentState::Transit { heading, .. }
            | AgentState::Aggressive { heading, .. } => Some(*heading),
            _ => None,
        }
    }

    /// Axis a vehicle travels along, which selects the signals it obeys.
    pub fn orientation(&self) -> Option<Orientation> {
        self.heading().map(Heading::orientation)
    }

    /// Apply a deferred update produced during the decision phase.
    ///
    /// Returns `false` when the update does not fit this kind; the state is
    /// then left untouched.
    pub fn apply(&mut self, update: StateUpdate) -> bool {
        match (self, update) {
            (AgentState::Transit { dwell, .. }, StateUpdate::Dwell(n)) => {
                *dwell = n;
                true
            }
            (AgentState::Search { path, .. }, StateUpdate::Path(p)) => {
                *path = p;
                true
            }
            _ => false,
        }
    }
}

// ── StateUpdate ───────────────────────────────────────────────────────────────

/// A change to an agent's own state, carried by a decision and applied at
/// commit.
#[derive(Clone, Debug, PartialEq)]
pub enum StateUpdate {
    /// New dwell counter for a transit vehicle.
    Dwell(u32),
    /// Replacement path for a search mover.
    Path(Path),
}
