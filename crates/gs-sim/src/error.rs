use gs_agent::AgentError;
use gs_core::{CoreError, Pos};
use gs_grid::GridError;
use gs_signal::SignalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario configuration error: {0}")]
    Config(String),

    #[error("cannot place {kind} at {pos}: cell is already taken")]
    SpawnConflict { kind: &'static str, pos: Pos },

    #[error("not enough free cells for {wanted} {kind} agent(s): {free} available")]
    NotEnoughCells { kind: &'static str, wanted: usize, free: usize },

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SimResult<T> = Result<T, SimError>;
