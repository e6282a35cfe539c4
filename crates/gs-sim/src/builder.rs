//! Fluent builder for constructing a [`Sim`].

use gs_agent::{AgentKind, AgentState, AgentStoreBuilder, ObstacleKind};
use gs_behavior::BehaviorModel;
use gs_core::{AgentId, Heading, Pos, SimClock, SimRng, Tick};
use gs_grid::{GridWorld, PheromoneField};
use gs_signal::SignalController;
use tracing::info;

use crate::config::BehaviorConfig;
use crate::{
    load_placements_csv, CollisionRegistry, Placement, ScenarioConfig, Sim, SimError,
    SimResult, SimSettings, TickMetrics,
};

/// Fluent builder for [`Sim<B>`].
///
/// Agents are placed on the grid as they are spawned, so every placement is
/// checked against the occupancy rules immediately.
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default         |
/// |-------------------|-----------------|
/// | `.pheromone(e)`   | no field        |
/// | `.terminus(pos)`  | no terminus     |
///
/// # Example
///
/// ```rust,ignore
/// let grid = GridWorld::new(10, 10, Topology::Toroidal)?;
/// let signals = SignalController::new(5)?;
/// let mut builder = SimBuilder::new(SimSettings::default(), grid, signals, DefaultPolicy);
/// builder.spawn(AgentState::standard(Heading::East), Pos::new(0, 0))?;
/// builder.populate(20, |_| AgentState::Target)?;
/// let mut sim = builder.terminus(Pos::new(9, 0)).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<B: BehaviorModel> {
    settings:    SimSettings,
    grid:        GridWorld,
    signals:     SignalController,
    agents:      AgentStoreBuilder,
    /// Kind of every spawned agent, indexed by id.
    kinds:       Vec<AgentKind>,
    behavior:    B,
    rng:         SimRng,
    evaporation: Option<f32>,
    terminus:    Option<Pos>,
}

impl<B: BehaviorModel> SimBuilder<B> {
    pub fn new(settings: SimSettings, grid: GridWorld, signals: SignalController, behavior: B) -> Self {
        let rng = SimRng::new(settings.seed).child(1);
        let agents = AgentStoreBuilder::new(settings.seed);
        Self {
            settings,
            grid,
            signals,
            agents,
            kinds: Vec::new(),
            behavior,
            rng,
            evaporation: None,
            terminus: None,
        }
    }

    /// Build everything a scenario file describes.
    ///
    /// Spawn order (and therefore id order) is: listed obstacles, TOML
    /// placements, CSV placements, then random populations of obstacles,
    /// targets, search movers, standard, emergency, transit and aggressive
    /// vehicles.
    pub fn from_config(config: &ScenarioConfig, behavior: B) -> SimResult<Self> {
        config.validate()?;
        let grid = GridWorld::new(config.grid.width, config.grid.height, config.grid.topology)?;
        let mut signals = SignalController::new(config.signals.cycle_length)?;
        for light in &config.signals.lights {
            let pos = grid.normalize(Pos::new(light.x, light.y))?;
            signals.add(pos, light.orientation.parse()?, light.group)?;
        }
        let stops = config
            .transit_stops()
            .into_iter()
            .map(|p| grid.normalize(p))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = SimBuilder::new(config.settings(), grid, signals, behavior);
        if let Some(ph) = &config.pheromone {
            builder = builder.pheromone(ph.evaporation);
        }
        if let Some([x, y]) = config.terminus {
            builder = builder.terminus(Pos::new(x, y));
        }

        // ── Explicit placements ───────────────────────────────────────────
        for o in &config.obstacles {
            builder.spawn(AgentState::Obstacle(o.kind), Pos::new(o.x, o.y))?;
        }
        let from_csv = match &config.placements_csv {
            Some(path) => load_placements_csv(path)?,
            None => Vec::new(),
        };
        for p in config.placements.iter().chain(&from_csv) {
            builder.spawn_placement(p, &config.behavior, &stops)?;
        }

        // ── Random populations ────────────────────────────────────────────
        let pop = &config.population;
        let b = &config.behavior;
        builder.populate(pop.obstacles, |_| AgentState::Obstacle(ObstacleKind::Building))?;
        builder.populate(pop.targets, |_| AgentState::Target)?;
        builder.populate(pop.search, |_| AgentState::search(b.strategy))?;
        builder.populate(pop.standard, |rng| AgentState::standard(random_heading(rng)))?;
        builder.populate(pop.emergency, |rng| AgentState::emergency(random_heading(rng)))?;
        builder.populate(pop.transit, |rng| {
            AgentState::transit(random_heading(rng), stops.clone(), b.dwell_ticks)
        })?;
        builder.populate(pop.aggressive, |rng| {
            AgentState::aggressive(random_heading(rng), b.disobedience)
        })?;

        Ok(builder)
    }

    /// Enable the pheromone field with the given evaporation rate.
    pub fn pheromone(mut self, evaporation: f32) -> Self {
        self.evaporation = Some(evaporation);
        self
    }

    /// Count arrivals on `pos`.
    pub fn terminus(mut self, pos: Pos) -> Self {
        self.terminus = Some(pos);
        self
    }

    pub fn settings_mut(&mut self) -> &mut SimSettings {
        &mut self.settings
    }

    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    /// Place one agent.
    ///
    /// Fails with a grid error when `pos` is off a bounded grid, and with
    /// [`SimError::SpawnConflict`] when the cell's occupants may not share
    /// with this kind.
    pub fn spawn(&mut self, state: AgentState, pos: Pos) -> SimResult<AgentId> {
        let kind = state.kind();
        let pos = self.grid.normalize(pos)?;
        let rules = self.settings.occupancy;
        let blocked = self
            .grid
            .occupants(pos)
            .iter()
            .any(|o| !rules.compatible(kind, self.kinds[o.index()]));
        if blocked {
            return Err(SimError::SpawnConflict { kind: kind.as_str(), pos });
        }
        let id = self.agents.next_id();
        self.grid.place(id, pos)?;
        self.agents.push(state);
        self.kinds.push(kind);
        Ok(id)
    }

    /// Place `count` agents on distinct empty cells chosen by the seeded
    /// placement RNG.  `make` builds each agent's state.
    pub fn populate<F>(&mut self, count: usize, mut make: F) -> SimResult<Vec<AgentId>>
    where
        F: FnMut(&mut SimRng) -> AgentState,
    {
        if count == 0 {
            return Ok(Vec::new());
        }
        let states: Vec<AgentState> = (0..count).map(|_| make(&mut self.rng)).collect();
        let mut free: Vec<Pos> = self
            .grid
            .positions()
            .filter(|p| self.grid.is_empty_cell(*p))
            .collect();
        if free.len() < count {
            return Err(SimError::NotEnoughCells {
                kind:   states[0].kind().as_str(),
                wanted: count,
                free:   free.len(),
            });
        }
        self.rng.shuffle(&mut free);
        states
            .into_iter()
            .zip(free)
            .map(|(state, pos)| self.spawn(state, pos))
            .collect()
    }

    /// Validate remaining inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<B>> {
        let terminus = self.terminus.map(|t| self.grid.normalize(t)).transpose()?;
        let pheromone = self.evaporation.map(|e| PheromoneField::new(&self.grid, e));
        let (agents, rngs) = self.agents.build();

        info!(
            width = self.grid.width(),
            height = self.grid.height(),
            agents = agents.count,
            signals = self.signals.len(),
            seed = self.settings.seed,
            "simulation built"
        );

        let mut sim = Sim {
            settings:          self.settings,
            clock:             SimClock::new(),
            grid:              self.grid,
            signals:           self.signals,
            agents,
            rngs,
            pheromone,
            collisions:        CollisionRegistry::new(),
            behavior:          self.behavior,
            terminus,
            terminus_arrivals: 0,
            serviced_total:    0,
            last_metrics:      TickMetrics::default(),
        };
        sim.last_metrics = sim.collect_metrics(Tick::ZERO, 0);
        Ok(sim)
    }

    fn spawn_placement(&mut self, p: &Placement, cfg: &BehaviorConfig, stops: &[Pos]) -> SimResult<AgentId> {
        let (kind, obstacle, heading) = p.resolve()?;
        let state = match kind {
            AgentKind::Standard   => AgentState::standard(heading),
            AgentKind::Emergency  => AgentState::emergency(heading),
            AgentKind::Transit    => AgentState::transit(heading, stops.to_vec(), cfg.dwell_ticks),
            AgentKind::Aggressive => AgentState::aggressive(heading, cfg.disobedience),
            AgentKind::Search     => AgentState::search(cfg.strategy),
            AgentKind::Target     => AgentState::Target,
            AgentKind::Obstacle   => AgentState::Obstacle(obstacle.unwrap_or_default()),
        };
        self.spawn(state, p.pos())
    }
}

/// East or north with equal odds.
fn random_heading(rng: &mut SimRng) -> Heading {
    if rng.gen_range(0..2u8) == 0 { Heading::East } else { Heading::North }
}
