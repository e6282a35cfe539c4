//! Unit tests for gs-agent.

#[cfg(test)]
mod kind {
    use gs_core::{Heading, Orientation, Pos};
    use gs_grid::{Path, SearchStrategy};

    use crate::{AgentError, AgentKind, AgentState, ObstacleKind, StateUpdate};

    #[test]
    fn state_reports_kind() {
        assert_eq!(AgentState::standard(Heading::East).kind(), AgentKind::Standard);
        assert_eq!(AgentState::search(SearchStrategy::Bfs).kind(), AgentKind::Search);
        assert_eq!(AgentState::Obstacle(ObstacleKind::Boundary).kind(), AgentKind::Obstacle);
    }

    #[test]
    fn vehicle_classes() {
        assert!(AgentKind::Emergency.is_vehicle());
        assert!(!AgentKind::Emergency.is_exclusive_vehicle());
        assert!(AgentKind::Transit.is_exclusive_vehicle());
        assert!(AgentKind::Search.is_mover());
        assert!(!AgentKind::Search.is_vehicle());
        assert!(!AgentKind::Target.is_mover());
    }

    #[test]
    fn heading_and_orientation() {
        let bus = AgentState::transit(Heading::North, vec![Pos::new(0, 3)], 5);
        assert_eq!(bus.heading(), Some(Heading::North));
        assert_eq!(bus.orientation(), Some(Orientation::Vertical));
        assert_eq!(AgentState::Target.heading(), None);
    }

    #[test]
    fn parse_kinds_and_aliases() {
        assert_eq!("bus".parse::<AgentKind>().unwrap(), AgentKind::Transit);
        assert_eq!(" Car ".parse::<AgentKind>().unwrap(), AgentKind::Standard);
        assert_eq!("roundabout".parse::<AgentKind>().unwrap(), AgentKind::Obstacle);
        assert_eq!(
            "tram".parse::<AgentKind>().unwrap_err(),
            AgentError::UnknownKind("tram".into())
        );
        assert_eq!("wall".parse::<ObstacleKind>().unwrap(), ObstacleKind::Boundary);
    }

    #[test]
    fn apply_matching_update() {
        let mut bus = AgentState::transit(Heading::East, vec![], 5);
        assert!(bus.apply(StateUpdate::Dwell(3)));
        assert!(matches!(bus, AgentState::Transit { dwell: 3, .. }));

        let mut robot = AgentState::search(SearchStrategy::Dfs);
        let path = Path::new([Pos::new(1, 0)]);
        assert!(robot.apply(StateUpdate::Path(path.clone())));
        assert!(matches!(robot, AgentState::Search { path: ref p, .. } if *p == path));
    }

    #[test]
    fn mismatched_update_is_dropped() {
        let mut car = AgentState::standard(Heading::West);
        assert!(!car.apply(StateUpdate::Dwell(1)));
        assert_eq!(car, AgentState::standard(Heading::West));
    }
}

#[cfg(test)]
mod store {
    use gs_core::{AgentId, Heading};
    use gs_grid::SearchStrategy;

    use crate::{AgentKind, AgentState, AgentStoreBuilder, INITIAL_HAPPINESS};

    fn mixed() -> (crate::AgentStore, crate::AgentRngs) {
        AgentStoreBuilder::new(7)
            .with(AgentState::standard(Heading::East))
            .with(AgentState::search(SearchStrategy::Bfs))
            .with(AgentState::Target)
            .with(AgentState::emergency(Heading::North))
            .build()
    }

    #[test]
    fn builder_assigns_ids_in_order() {
        let mut b = AgentStoreBuilder::new(0);
        assert_eq!(b.next_id(), AgentId(0));
        let a = b.push(AgentState::Target);
        let c = b.push(AgentState::Target);
        assert_eq!((a, c), (AgentId(0), AgentId(1)));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn arrays_have_count_elements() {
        let (store, rngs) = mixed();
        assert_eq!(store.count, 4);
        assert_eq!(rngs.len(), 4);
        for v in [store.happiness.len(), store.serviced.len(), store.steps_taken.len(), store.alive.len()] {
            assert_eq!(v, 4);
        }
    }

    #[test]
    fn vehicles_start_happy() {
        let (store, _) = mixed();
        assert_eq!(store.happiness[0], INITIAL_HAPPINESS);
        assert_eq!(store.happiness[1], 0.0);
        assert_eq!(store.mean_happiness(), Some(INITIAL_HAPPINESS));
    }

    #[test]
    fn display_value_per_kind() {
        let (mut store, _) = mixed();
        store.serviced[1] = 3;
        store.adjust_happiness(AgentId(0), -1.5);
        assert_eq!(store.display_value(AgentId(0)), 98.5);
        assert_eq!(store.display_value(AgentId(1)), 3.0);
        assert_eq!(store.display_value(AgentId(2)), 0.0);
    }

    #[test]
    fn retire_hides_from_live_ids() {
        let (mut store, _) = mixed();
        assert!(store.retire(AgentId(2)));
        assert!(!store.retire(AgentId(2)));
        assert!(!store.is_alive(AgentId(2)));
        assert_eq!(store.count_kind(AgentKind::Target), 0);
        assert_eq!(store.live_ids().count(), 3);
        assert!(!store.is_alive(AgentId(99)));
    }

    #[test]
    fn search_totals_sum_counters() {
        let (mut store, _) = mixed();
        store.serviced[1] = 2;
        store.steps_taken[1] = 9;
        assert_eq!(store.search_totals(), (2, 9));
    }

    #[test]
    fn rngs_are_seeded_per_agent() {
        let (_, mut a) = mixed();
        let (_, mut b) = mixed();
        let x: u64 = a.get_mut(AgentId(1)).random();
        let y: u64 = b.get_mut(AgentId(1)).random();
        let z: u64 = b.get_mut(AgentId(2)).random();
        assert_eq!(x, y);
        assert_ne!(y, z);
    }
}
