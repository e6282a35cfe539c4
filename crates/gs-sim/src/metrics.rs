//! Per-tick scalar metrics.

use gs_core::Tick;
use serde::Serialize;

/// Aggregates published after every tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TickMetrics {
    pub tick:              Tick,
    /// Movers standing on the terminus cell after the commit phase.
    pub at_terminus:       u64,
    /// Cumulative moves that ended on the terminus cell.
    pub terminus_arrivals: u64,
    /// Cumulative collision events.
    pub collisions:        u64,
    /// Cumulative targets serviced.
    pub serviced:          u64,
    pub remaining_targets: u64,
    /// Total search steps over total services; 0 before the first service.
    pub avg_path_length:   f64,
    /// Mean happiness over live vehicles; 0 when there are none.
    pub mean_happiness:    f64,
    /// Moves refused at commit during this tick.
    pub rejected_moves:    u64,
}

impl TickMetrics {
    /// Series names, in the order [`named`](Self::named) yields them.
    pub const SERIES: [&'static str; 8] = [
        "at_terminus",
        "terminus_arrivals",
        "collisions",
        "serviced",
        "remaining_targets",
        "avg_path_length",
        "mean_happiness",
        "rejected_moves",
    ];

    /// `(name, value)` pairs for sinks that record named scalar series.
    pub fn named(&self) -> [(&'static str, f64); 8] {
        let values = [
            self.at_terminus as f64,
            self.terminus_arrivals as f64,
            self.collisions as f64,
            self.serviced as f64,
            self.remaining_targets as f64,
            self.avg_path_length,
            self.mean_happiness,
            self.rejected_moves as f64,
        ];
        std::array::from_fn(|i| (Self::SERIES[i], values[i]))
    }

    /// Look up one series by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.named().into_iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}
