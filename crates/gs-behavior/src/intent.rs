//! What an agent asks for in one tick.

use gs_agent::StateUpdate;
use gs_core::Delta;

/// The movement an agent requests for the current tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Step by `Delta` (wrapped or clipped by the grid at commit).
    Move(Delta),
    /// Hold position on purpose (red signal, dwelling at a stop).
    Wait,
    /// Nothing to do this tick.
    Idle,
}

impl Intent {
    #[inline]
    pub fn is_move(self) -> bool {
        matches!(self, Intent::Move(_))
    }
}

/// A full decision: intent plus the deferred effects the commit phase applies.
///
/// `update` and `mood` are applied when the intent is `Wait`/`Idle` or when
/// the move commits.  A rejected move drops `update`, and the mover is
/// charged [`mood::REJECTED`](crate::mood::REJECTED) instead of `mood`.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub intent:    Intent,
    pub update:    Option<StateUpdate>,
    /// Happiness change for vehicles.  Ignored for other kinds.
    pub mood:      f32,
    /// `true` when the move runs a red signal.
    pub violation: bool,
}

impl Decision {
    pub fn idle() -> Self {
        Self { intent: Intent::Idle, update: None, mood: 0.0, violation: false }
    }

    pub fn wait(mood: f32) -> Self {
        Self { intent: Intent::Wait, update: None, mood, violation: false }
    }

    pub fn step(delta: Delta, mood: f32) -> Self {
        Self { intent: Intent::Move(delta), update: None, mood, violation: false }
    }

    pub fn with_update(mut self, update: StateUpdate) -> Self {
        self.update = Some(update);
        self
    }

    pub fn violating(mut self) -> Self {
        self.violation = true;
        self
    }
}

impl Default for Decision {
    fn default() -> Self {
        Self::idle()
    }
}
