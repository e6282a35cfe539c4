//! Unit tests for gs-signal.

#[cfg(test)]
mod cycle {
    use gs_core::{Orientation, Pos};

    use crate::{Phase, SignalController, SignalError};

    #[test]
    fn zero_cycle_rejected() {
        assert_eq!(SignalController::new(0).unwrap_err(), SignalError::ZeroCycle);
    }

    #[test]
    fn horizontal_green_first_half() {
        let mut sc = SignalController::new(5).unwrap();
        for t in 0..30u64 {
            let expected = t % 10 < 5;
            assert_eq!(sc.is_green(Orientation::Horizontal), expected, "tick {t}");
            assert_eq!(sc.is_green(Orientation::Vertical), !expected, "tick {t}");
            sc.advance();
        }
        assert_eq!(sc.elapsed().0, 30);
    }

    #[test]
    fn phase_at_is_pure() {
        assert_eq!(SignalController::phase_at(3, 0, Orientation::Horizontal), Phase::Green);
        assert_eq!(SignalController::phase_at(3, 3, Orientation::Horizontal), Phase::Red);
        assert_eq!(SignalController::phase_at(3, 3, Orientation::Vertical), Phase::Green);
        assert_eq!(SignalController::phase_at(3, 6, Orientation::Horizontal), Phase::Green);
    }

    #[test]
    fn cycle_of_one_alternates_every_tick() {
        let mut sc = SignalController::new(1).unwrap();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(sc.phase(Orientation::Horizontal));
            sc.advance();
        }
        assert_eq!(seen, vec![Phase::Green, Phase::Red, Phase::Green, Phase::Red]);
    }

    #[test]
    fn ticks_until_switch_counts_down() {
        let mut sc = SignalController::new(4).unwrap();
        assert_eq!(sc.ticks_until_switch(), 4);
        sc.advance();
        assert_eq!(sc.ticks_until_switch(), 3);
        for _ in 0..3 {
            sc.advance();
        }
        assert_eq!(sc.ticks_until_switch(), 4);
    }

    #[test]
    fn same_orientation_never_disagrees() {
        let mut sc = SignalController::new(2).unwrap();
        sc.add(Pos::new(1, 1), Orientation::Horizontal, 0).unwrap();
        sc.add(Pos::new(7, 3), Orientation::Horizontal, 1).unwrap();
        for _ in 0..8 {
            let reds: Vec<bool> = sc
                .signals()
                .iter()
                .map(|s| sc.is_red_at(s.pos, s.orientation))
                .collect();
            assert_eq!(reds[0], reds[1]);
            sc.advance();
        }
    }
}

#[cfg(test)]
mod placement {
    use gs_core::{Orientation, Pos, SignalId};

    use crate::{SignalController, SignalError};

    #[test]
    fn add_assigns_sequential_ids() {
        let mut sc = SignalController::new(5).unwrap();
        let a = sc.add(Pos::new(2, 2), Orientation::Horizontal, 0).unwrap();
        let b = sc.add(Pos::new(2, 2), Orientation::Vertical, 0).unwrap();
        assert_eq!(a, SignalId(0));
        assert_eq!(b, SignalId(1));
        assert_eq!(sc.signals_at(Pos::new(2, 2)).count(), 2);
        assert_eq!(sc.len(), 2);
    }

    #[test]
    fn id_space_exhaustion_errors() {
        let mut sc = SignalController::new(5).unwrap();
        let limit = SignalId::INVALID.index();
        let side = 256;
        for i in 0..limit as i32 {
            sc.add(Pos::new(i % side, i / side), Orientation::Horizontal, 0).unwrap();
        }
        assert_eq!(sc.len(), limit);
        let last = sc.signal_at(Pos::new(254, 255), Orientation::Horizontal).map(|s| s.id);
        assert_eq!(last, Some(SignalId(u16::MAX - 1)));

        let err = sc.add(Pos::new(side - 1, side - 1), Orientation::Horizontal, 0).unwrap_err();
        assert_eq!(err, SignalError::TooMany(limit));
        assert_eq!(sc.len(), limit);
    }

    #[test]
    fn duplicate_orientation_on_cell_rejected() {
        let mut sc = SignalController::new(5).unwrap();
        sc.add(Pos::new(0, 0), Orientation::Vertical, 0).unwrap();
        let err = sc.add(Pos::new(0, 0), Orientation::Vertical, 1).unwrap_err();
        assert_eq!(
            err,
            SignalError::Duplicate { pos: Pos::new(0, 0), orientation: Orientation::Vertical }
        );
    }

    #[test]
    fn red_only_where_a_matching_signal_stands() {
        let mut sc = SignalController::new(5).unwrap();
        sc.add(Pos::new(4, 0), Orientation::Vertical, 0).unwrap();
        // Tick 0: vertical is red.
        assert!(sc.is_red_at(Pos::new(4, 0), Orientation::Vertical));
        assert!(!sc.is_red_at(Pos::new(4, 0), Orientation::Horizontal));
        assert!(!sc.is_red_at(Pos::new(5, 0), Orientation::Vertical));
        assert!(sc.signals_at(Pos::new(9, 9)).next().is_none());
    }
}
