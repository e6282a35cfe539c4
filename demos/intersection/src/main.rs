//! intersection: two signalled roads, a bus line, and a pair of cleaners.
//!
//! Usage: `intersection [scenario.toml] [print-interval]`
//!
//! With no arguments the bundled `scenario.toml` is used.  Set `RUST_LOG`
//! (e.g. `RUST_LOG=gs_sim=debug`) for per-tick logging.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gs_agent::AgentKind;
use gs_behavior::DefaultPolicy;
use gs_core::Tick;
use gs_sim::{ScenarioConfig, SimBuilder, SimObserver, TickMetrics, WorldSnapshot};

const DEFAULT_INTERVAL: u64 = 20;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints an ASCII frame every `interval` ticks and a one-line summary.
struct FramePrinter {
    width:    u32,
    height:   u32,
    interval: u64,
}

impl FramePrinter {
    fn glyph(kind: AgentKind) -> char {
        match kind {
            AgentKind::Standard   => 'C',
            AgentKind::Emergency  => 'E',
            AgentKind::Transit    => 'B',
            AgentKind::Aggressive => 'A',
            AgentKind::Search     => 'S',
            AgentKind::Target     => '*',
            AgentKind::Obstacle   => '#',
        }
    }

    fn render(&self, snapshot: &WorldSnapshot) -> String {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut cells = vec!['.'; w * h];
        for s in &snapshot.signals {
            cells[s.pos.y as usize * w + s.pos.x as usize] = if s.phase.is_green() { 'g' } else { 'r' };
        }
        // Movers drawn last so they cover targets and signals.
        let mut agents: Vec<_> = snapshot.agents.iter().collect();
        agents.sort_by_key(|a| a.kind.is_mover());
        for a in agents {
            cells[a.pos.y as usize * w + a.pos.x as usize] = Self::glyph(a.kind);
        }
        // North (+y) at the top.
        let mut out = String::with_capacity((w + 1) * h);
        for row in cells.chunks(w).rev() {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl SimObserver for FramePrinter {
    fn on_tick_end(&mut self, m: &TickMetrics) {
        if m.tick.0 % self.interval == 0 {
            println!(
                "{}  serviced={} remaining={} collisions={} arrivals={} mood={:.1}",
                m.tick, m.serviced, m.remaining_targets, m.collisions, m.terminus_arrivals, m.mean_happiness
            );
        }
    }

    fn on_snapshot(&mut self, snapshot: &WorldSnapshot) {
        if snapshot.tick.0 % self.interval == 0 {
            println!("{}", self.render(snapshot));
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, m: &TickMetrics) {
        println!("── finished at {final_tick} ──");
        for (name, value) in m.named() {
            println!("  {name:<18} {value:>10.2}");
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/scenario.toml")));
    let interval = match args.next() {
        Some(s) => s.parse::<u64>().context("print interval must be a whole number")?.max(1),
        None => DEFAULT_INTERVAL,
    };

    let config = ScenarioConfig::load(&path)
        .with_context(|| format!("loading scenario {}", path.display()))?;
    info!(path = %path.display(), steps = config.steps, seed = config.seed, "scenario loaded");

    let mut sim = SimBuilder::from_config(&config, DefaultPolicy)?.build()?;
    let mut printer = FramePrinter {
        width:  config.grid.width,
        height: config.grid.height,
        interval,
    };

    let started = Instant::now();
    let last = sim.run(&mut printer)?;
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        ticks = sim.clock.current_tick.0,
        serviced = last.serviced,
        "done"
    );
    Ok(())
}
