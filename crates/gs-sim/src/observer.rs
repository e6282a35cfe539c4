//! Simulation observer trait for progress reporting and data collection.

use gs_core::Tick;

use crate::{TickMetrics, WorldSnapshot};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, metrics: &TickMetrics) {
///         if metrics.tick.0 % self.interval == 0 {
///             println!("{}: {} serviced", metrics.tick, metrics.serviced);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any decision is made.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the commit phase with this tick's metrics.
    fn on_tick_end(&mut self, _metrics: &TickMetrics) {}

    /// Called with the post-tick world when snapshots are enabled.
    fn on_snapshot(&mut self, _snapshot: &WorldSnapshot) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _metrics: &TickMetrics) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps every metrics record and snapshot it is shown.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub metrics:   Vec<TickMetrics>,
    pub snapshots: Vec<WorldSnapshot>,
    pub ended_at:  Option<Tick>,
}

impl SimObserver for RecordingObserver {
    fn on_tick_end(&mut self, metrics: &TickMetrics) {
        self.metrics.push(metrics.clone());
    }

    fn on_snapshot(&mut self, snapshot: &WorldSnapshot) {
        self.snapshots.push(snapshot.clone());
    }

    fn on_sim_end(&mut self, final_tick: Tick, _metrics: &TickMetrics) {
        self.ended_at = Some(final_tick);
    }
}
