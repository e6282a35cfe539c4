//! Unit tests for gs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, SignalId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(AgentId(0) < AgentId(1));
        assert!(SignalId(9) > SignalId(3));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(SignalId::INVALID.0, u16::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod pos {
    use crate::{CoreError, Delta, Heading, Orientation, Pos};

    #[test]
    fn offset_is_raw_addition() {
        let p = Pos::new(9, 0).offset(Delta::new(2, -1));
        assert_eq!(p, Pos::new(11, -1));
    }

    #[test]
    fn heading_deltas_and_axes() {
        assert_eq!(Heading::East.delta(), Delta::new(1, 0));
        assert_eq!(Heading::North.delta(), Delta::new(0, 1));
        assert_eq!(Heading::West.orientation(), Orientation::Horizontal);
        assert_eq!(Heading::South.orientation(), Orientation::Vertical);
    }

    #[test]
    fn stride_and_chebyshev() {
        let d = Heading::West.delta().times(2);
        assert_eq!(d, Delta::new(-2, 0));
        assert_eq!(d.chebyshev(), 2);
        assert_eq!(Delta::new(1, -1).chebyshev(), 1);
    }

    #[test]
    fn parse_orientation() {
        assert_eq!("Horizontal".parse::<Orientation>(), Ok(Orientation::Horizontal));
        assert_eq!("v".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert_eq!(
            "diagonal".parse::<Orientation>(),
            Err(CoreError::UnknownOrientation("diagonal".into()))
        );
    }

    #[test]
    fn parse_heading_accepts_axis_aliases() {
        assert_eq!("horizontal".parse::<Heading>(), Ok(Heading::East));
        assert_eq!("vertical".parse::<Heading>(), Ok(Heading::North));
        assert!("up".parse::<Heading>().is_err());
    }

    #[test]
    fn cross_axis() {
        assert_eq!(Orientation::Horizontal.cross(), Orientation::Vertical);
        assert_eq!(Orientation::Vertical.cross(), Orientation::Horizontal);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5);
    }

    #[test]
    fn clock_advances_and_matches_intervals() {
        let mut clock = SimClock::new();
        assert!(clock.on_interval(3));
        clock.advance();
        assert_eq!(clock.current_tick, Tick(1));
        assert!(!clock.on_interval(3));
        clock.advance();
        clock.advance();
        assert!(clock.on_interval(3));
        assert!(!clock.on_interval(0));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "streams for adjacent agents should diverge");
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = AgentRng::new(0, AgentId(0));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        // Out-of-range probabilities are clamped, not rejected.
        assert!(rng.gen_bool(7.0));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = AgentRng::new(0, AgentId(3));
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[5]), Some(&5));
    }

    #[test]
    fn sim_rng_shuffle_is_reproducible() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        SimRng::new(9).shuffle(&mut a);
        SimRng::new(9).shuffle(&mut b);
        assert_eq!(a, b);
    }
}
