//! `SignalController`: positions, orientations and the shared phase clock.

use std::collections::HashMap;

use gs_core::{Orientation, Pos, SignalId, Tick};

use crate::{SignalError, SignalResult};

// ── Phase ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    Green,
    Red,
}

impl Phase {
    #[inline]
    pub fn is_green(self) -> bool {
        self == Phase::Green
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Green => "green",
            Phase::Red   => "red",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Signal ────────────────────────────────────────────────────────────────────

/// One signal head.  It gates traffic travelling along `orientation` into
/// the cell at `pos`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signal {
    pub id:          SignalId,
    pub pos:         Pos,
    pub orientation: Orientation,
    /// Intersection group label; informational for snapshot consumers.
    pub group:       u16,
}

// ── SignalController ──────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SignalController {
    cycle_length: u32,
    elapsed:      u64,
    signals:      Vec<Signal>,
    by_cell:      HashMap<Pos, Vec<SignalId>>,
}

impl SignalController {
    /// An empty controller.  `cycle_length` must be positive.
    pub fn new(cycle_length: u32) -> SignalResult<Self> {
        if cycle_length == 0 {
            return Err(SignalError::ZeroCycle);
        }
        Ok(Self {
            cycle_length,
            elapsed: 0,
            signals: Vec::new(),
            by_cell: HashMap::new(),
        })
    }

    /// Register a signal.  At most one signal per `(pos, orientation)`,
    /// and fewer than [`SignalId::INVALID`] signals in total.
    pub fn add(&mut self, pos: Pos, orientation: Orientation, group: u16) -> SignalResult<SignalId> {
        if self.signal_at(pos, orientation).is_some() {
            return Err(SignalError::Duplicate { pos, orientation });
        }
        let id = match u16::try_from(self.signals.len()) {
            Ok(n) if n < SignalId::INVALID.0 => SignalId(n),
            _ => return Err(SignalError::TooMany(SignalId::INVALID.index())),
        };
        self.signals.push(Signal { id, pos, orientation, group });
        self.by_cell.entry(pos).or_default().push(id);
        Ok(id)
    }

    // ── Phase queries ─────────────────────────────────────────────────────

    /// Phase of `orientation` after `elapsed` ticks of a `cycle_length` cycle.
    #[inline]
    pub fn phase_at(cycle_length: u32, elapsed: u64, orientation: Orientation) -> Phase {
        let period = 2 * cycle_length as u64;
        let horizontal_green = elapsed % period < cycle_length as u64;
        let green = match orientation {
            Orientation::Horizontal => horizontal_green,
            Orientation::Vertical   => !horizontal_green,
        };
        if green { Phase::Green } else { Phase::Red }
    }

    /// Current phase for `orientation`.
    #[inline]
    pub fn phase(&self, orientation: Orientation) -> Phase {
        Self::phase_at(self.cycle_length, self.elapsed, orientation)
    }

    #[inline]
    pub fn is_green(&self, orientation: Orientation) -> bool {
        self.phase(orientation).is_green()
    }

    /// Ticks until `orientation` next changes phase (≥ 1).
    pub fn ticks_until_switch(&self) -> u64 {
        let len = self.cycle_length as u64;
        len - self.elapsed % len
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// All signals standing on `pos`.
    pub fn signals_at(&self, pos: Pos) -> impl Iterator<Item = &Signal> + '_ {
        self.by_cell
            .get(&pos)
            .into_iter()
            .flatten()
            .map(|id| &self.signals[id.index()])
    }

    /// The signal gating `orientation` at `pos`, if any.
    pub fn signal_at(&self, pos: Pos, orientation: Orientation) -> Option<&Signal> {
        self.signals_at(pos).find(|s| s.orientation == orientation)
    }

    /// `true` when a signal gating `orientation` stands on `pos` and shows red.
    #[inline]
    pub fn is_red_at(&self, pos: Pos, orientation: Orientation) -> bool {
        self.signal_at(pos, orientation).is_some() && !self.is_green(orientation)
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }

    /// Number of `advance` calls so far.
    pub fn elapsed(&self) -> Tick {
        Tick(self.elapsed)
    }

    /// Move to the next tick's phase.  Called once per tick, after commit.
    pub fn advance(&mut self) {
        self.elapsed += 1;
    }
}
