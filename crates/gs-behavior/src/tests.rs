//! Unit tests for gs-behavior.

#[cfg(test)]
mod helpers {
    use gs_agent::{AgentRngs, AgentState, AgentStore, AgentStoreBuilder};
    use gs_core::{AgentId, Pos, Tick};
    use gs_grid::{Connectivity, GridWorld, PheromoneField, Topology};
    use gs_signal::SignalController;

    use crate::{BehaviorModel, Decision, DefaultPolicy, SimContext};

    /// A hand-built world with everything `decide` reads.
    pub struct World {
        pub grid:      GridWorld,
        pub signals:   SignalController,
        pub store:     AgentStore,
        pub rngs:      AgentRngs,
        pub pheromone: Option<PheromoneField>,
    }

    pub fn world(size: u32, topology: Topology, agents: Vec<(AgentState, Pos)>) -> World {
        let mut grid = GridWorld::new(size, size, topology).unwrap();
        let mut builder = AgentStoreBuilder::new(11);
        for (state, pos) in agents {
            let id = builder.push(state);
            grid.place(id, pos).unwrap();
        }
        let (store, rngs) = builder.build();
        World {
            grid,
            signals: SignalController::new(5).unwrap(),
            store,
            rngs,
            pheromone: None,
        }
    }

    impl World {
        pub fn decide(&mut self, agent: AgentId) -> Decision {
            let ctx = SimContext::new(
                Tick::ZERO,
                Connectivity::Moore,
                &self.grid,
                &self.signals,
                &self.store,
                self.pheromone.as_ref(),
            );
            DefaultPolicy.decide(agent, &ctx, self.rngs.get_mut(agent))
        }
    }
}

// ── Decision ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod decision {
    use gs_agent::StateUpdate;
    use gs_core::Delta;

    use crate::{Decision, Intent};

    #[test]
    fn default_is_idle() {
        let d = Decision::default();
        assert_eq!(d.intent, Intent::Idle);
        assert!(d.update.is_none());
        assert!(!d.violation);
    }

    #[test]
    fn builders_compose() {
        let d = Decision::step(Delta::new(1, 0), 0.5)
            .with_update(StateUpdate::Dwell(0))
            .violating();
        assert!(d.intent.is_move());
        assert_eq!(d.update, Some(StateUpdate::Dwell(0)));
        assert!(d.violation);
        assert_eq!(d.mood, 0.5);
    }
}

// ── Vehicles ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vehicles {
    use gs_agent::{AgentState, StateUpdate};
    use gs_core::{AgentId, Delta, Heading, Orientation, Pos};
    use gs_grid::Topology;

    use super::helpers::world;
    use crate::{mood, Decision, Intent};

    const CAR: AgentId = AgentId(0);

    #[test]
    fn standard_moves_along_heading() {
        let mut w = world(10, Topology::Toroidal, vec![(AgentState::standard(Heading::East), Pos::new(2, 0))]);
        assert_eq!(w.decide(CAR), Decision::step(Delta::new(1, 0), mood::STANDARD_MOVE));
    }

    #[test]
    fn standard_waits_before_red() {
        // Vertical is red at elapsed 0.
        let mut w = world(10, Topology::Toroidal, vec![(AgentState::standard(Heading::North), Pos::new(0, 2))]);
        w.signals.add(Pos::new(0, 3), Orientation::Vertical, 0).unwrap();
        assert_eq!(w.decide(CAR), Decision::wait(mood::RED_WAIT));

        for _ in 0..5 {
            w.signals.advance();
        }
        assert_eq!(w.decide(CAR).intent, Intent::Move(Delta::new(0, 1)));
    }

    #[test]
    fn cross_orientation_signal_is_ignored() {
        let mut w = world(10, Topology::Toroidal, vec![(AgentState::standard(Heading::East), Pos::new(2, 0))]);
        w.signals.add(Pos::new(3, 0), Orientation::Vertical, 0).unwrap();
        assert!(w.decide(CAR).intent.is_move());
    }

    #[test]
    fn signal_seen_across_the_seam() {
        let mut w = world(10, Topology::Toroidal, vec![(AgentState::standard(Heading::North), Pos::new(4, 9))]);
        w.signals.add(Pos::new(4, 0), Orientation::Vertical, 0).unwrap();
        assert_eq!(w.decide(CAR).intent, Intent::Wait);
    }

    #[test]
    fn emergency_ignores_red_and_strides_two() {
        let mut w = world(10, Topology::Toroidal, vec![(AgentState::emergency(Heading::North), Pos::new(0, 2))]);
        w.signals.add(Pos::new(0, 3), Orientation::Vertical, 0).unwrap();
        let d = w.decide(CAR);
        assert_eq!(d, Decision::step(Delta::new(0, 2), mood::EMERGENCY_MOVE));
        assert!(!d.violation);
    }

    #[test]
    fn transit_dwells_then_leaves() {
        let stop = Pos::new(3, 1);
        let mut w = world(10, Topology::Toroidal, vec![(AgentState::transit(Heading::East, vec![stop], 5), stop)]);
        let d = w.decide(CAR);
        assert_eq!(d.intent, Intent::Wait);
        assert_eq!(d.mood, mood::DWELL);
        assert_eq!(d.update, Some(StateUpdate::Dwell(1)));

        w.store.apply(CAR, StateUpdate::Dwell(5));
        let d = w.decide(CAR);
        assert_eq!(d.intent, Intent::Move(Delta::new(1, 0)));
        assert_eq!(d.mood, mood::LEAVE_STOP);
        assert_eq!(d.update, Some(StateUpdate::Dwell(0)));
    }

    #[test]
    fn transit_ready_to_leave_holds_at_red() {
        let stop = Pos::new(0, 2);
        let mut w = world(10, Topology::Toroidal, vec![(AgentState::transit(Heading::North, vec![stop], 2), stop)]);
        w.signals.add(Pos::new(0, 3), Orientation::Vertical, 0).unwrap();
        w.store.apply(CAR, StateUpdate::Dwell(2));
        assert_eq!(w.decide(CAR), Decision::wait(mood::RED_WAIT));
    }

    #[test]
    fn transit_off_stop_drives_like_a_car() {
        let mut w = world(
            10,
            Topology::Toroidal,
            vec![(AgentState::transit(Heading::West, vec![Pos::new(9, 9)], 5), Pos::new(5, 5))],
        );
        let d = w.decide(CAR);
        assert_eq!(d.intent, Intent::Move(Delta::new(-1, 0)));
        assert!(d.update.is_none());
    }

    #[test]
    fn aggressive_always_runs_red_at_p1() {
        let mut w = world(10, Topology::Toroidal, vec![(AgentState::aggressive(Heading::North, 1.0), Pos::new(0, 2))]);
        w.signals.add(Pos::new(0, 3), Orientation::Vertical, 0).unwrap();
        let d = w.decide(CAR);
        assert_eq!(d.intent, Intent::Move(Delta::new(0, 1)));
        assert!(d.violation);
        assert_eq!(d.mood, mood::RAN_RED);
    }

    #[test]
    fn aggressive_never_runs_red_at_p0() {
        let mut w = world(10, Topology::Toroidal, vec![(AgentState::aggressive(Heading::North, 0.0), Pos::new(0, 2))]);
        w.signals.add(Pos::new(0, 3), Orientation::Vertical, 0).unwrap();
        for _ in 0..20 {
            assert_eq!(w.decide(CAR), Decision::wait(mood::AGGRESSIVE_OBEY));
        }
    }

    #[test]
    fn aggressive_on_green_is_ordinary() {
        let mut w = world(10, Topology::Toroidal, vec![(AgentState::aggressive(Heading::East, 1.0), Pos::new(0, 0))]);
        let d = w.decide(CAR);
        assert_eq!(d, Decision::step(Delta::new(1, 0), mood::AGGRESSIVE_MOVE));
    }

    #[test]
    fn static_kinds_idle() {
        let mut w = world(
            5,
            Topology::Bounded,
            vec![
                (AgentState::Target, Pos::new(1, 1)),
                (AgentState::Obstacle(Default::default()), Pos::new(2, 2)),
            ],
        );
        assert_eq!(w.decide(AgentId(0)), Decision::idle());
        assert_eq!(w.decide(AgentId(1)), Decision::idle());
    }
}

// ── Search movers ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use gs_agent::{AgentState, ObstacleKind, StateUpdate};
    use gs_core::{AgentId, Delta, Pos};
    use gs_grid::{Path, PheromoneField, SearchStrategy, Topology};

    use super::helpers::world;
    use crate::{Decision, Intent};

    const BOT: AgentId = AgentId(0);

    #[test]
    fn plans_then_follows() {
        let mut w = world(
            5,
            Topology::Bounded,
            vec![
                (AgentState::search(SearchStrategy::Bfs), Pos::new(0, 0)),
                (AgentState::Target, Pos::new(0, 2)),
            ],
        );
        let planned = Path::new([Pos::new(0, 1), Pos::new(0, 2)]);
        let d = w.decide(BOT);
        assert_eq!(d.intent, Intent::Idle);
        assert_eq!(d.update, Some(StateUpdate::Path(planned.clone())));

        w.store.apply(BOT, StateUpdate::Path(planned.clone()));
        let d = w.decide(BOT);
        assert_eq!(d.intent, Intent::Move(Delta::new(0, 1)));
        assert_eq!(d.update, Some(StateUpdate::Path(planned.advanced())));
    }

    #[test]
    fn holds_still_on_a_target() {
        for strategy in [SearchStrategy::Bfs, SearchStrategy::Dfs, SearchStrategy::Random] {
            let mut w = world(
                5,
                Topology::Bounded,
                vec![
                    (AgentState::search(strategy), Pos::new(2, 2)),
                    (AgentState::Target, Pos::new(2, 2)),
                ],
            );
            let d = w.decide(BOT);
            assert_eq!(d, Decision::idle(), "{strategy:?}");
        }
    }

    #[test]
    fn stale_path_is_replanned() {
        let mut w = world(
            5,
            Topology::Bounded,
            vec![
                (AgentState::search(SearchStrategy::Bfs), Pos::new(0, 0)),
                (AgentState::Target, Pos::new(4, 0)),
            ],
        );
        // The path points at (0, 2), which holds nothing.
        w.store.apply(BOT, StateUpdate::Path(Path::new([Pos::new(0, 1), Pos::new(0, 2)])));
        let d = w.decide(BOT);
        assert_eq!(d.intent, Intent::Idle);
        let Some(StateUpdate::Path(p)) = d.update else { panic!("expected a new path") };
        assert_eq!(p.target(), Some(Pos::new(4, 0)));
        assert_eq!(p.len(), 4);
    }

    #[test]
    fn nothing_to_find_clears_path() {
        let mut w = world(5, Topology::Bounded, vec![(AgentState::search(SearchStrategy::Dfs), Pos::new(2, 2))]);
        let d = w.decide(BOT);
        assert_eq!(d, Decision::idle().with_update(StateUpdate::Path(Path::empty())));
    }

    #[test]
    fn dfs_finds_a_reachable_target() {
        let mut w = world(
            6,
            Topology::Bounded,
            vec![
                (AgentState::search(SearchStrategy::Dfs), Pos::new(0, 0)),
                (AgentState::Target, Pos::new(5, 5)),
            ],
        );
        let Some(StateUpdate::Path(p)) = w.decide(BOT).update else { panic!("expected a path") };
        assert_eq!(p.target(), Some(Pos::new(5, 5)));
        assert!(p.len() >= 5);
    }

    #[test]
    fn random_walk_prefers_least_pheromone() {
        let mut w = world(3, Topology::Bounded, vec![(AgentState::search(SearchStrategy::Random), Pos::new(1, 1))]);
        let mut field = PheromoneField::new(&w.grid, 0.05);
        for p in w.grid.positions().collect::<Vec<_>>() {
            if p != Pos::new(2, 2) {
                field.deposit(p, 1.0);
            }
        }
        w.pheromone = Some(field);
        for _ in 0..10 {
            assert_eq!(w.decide(BOT).intent, Intent::Move(Delta::new(1, 1)));
        }
    }

    #[test]
    fn random_walk_stays_on_passable_cells() {
        let mut agents = vec![(AgentState::search(SearchStrategy::Random), Pos::new(0, 0))];
        agents.push((AgentState::Obstacle(ObstacleKind::Boundary), Pos::new(1, 0)));
        agents.push((AgentState::Obstacle(ObstacleKind::Boundary), Pos::new(1, 1)));
        let mut w = world(3, Topology::Bounded, agents);
        for _ in 0..10 {
            assert_eq!(w.decide(BOT).intent, Intent::Move(Delta::new(0, 1)));
        }
    }

    #[test]
    fn boxed_in_walker_idles() {
        let mut agents = vec![(AgentState::search(SearchStrategy::Random), Pos::new(0, 0))];
        for p in [Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)] {
            agents.push((AgentState::Obstacle(ObstacleKind::Building), p));
        }
        let mut w = world(3, Topology::Bounded, agents);
        assert_eq!(w.decide(BOT), Decision::idle());
    }
}

#[cfg(test)]
mod noop {
    use gs_agent::AgentStoreBuilder;
    use gs_core::{AgentId, Heading, Tick};
    use gs_grid::{Connectivity, GridWorld, Topology};
    use gs_signal::SignalController;

    use crate::{BehaviorModel, Decision, NoopBehavior, SimContext};

    #[test]
    fn noop_always_idles() {
        let grid = GridWorld::new(2, 2, Topology::Bounded).unwrap();
        let signals = SignalController::new(1).unwrap();
        let (store, mut rngs) = AgentStoreBuilder::new(0)
            .with(gs_agent::AgentState::standard(Heading::East))
            .build();
        let ctx = SimContext::new(Tick::ZERO, Connectivity::Moore, &grid, &signals, &store, None);
        assert_eq!(NoopBehavior.decide(AgentId(0), &ctx, rngs.get_mut(AgentId(0))), Decision::idle());
    }
}
