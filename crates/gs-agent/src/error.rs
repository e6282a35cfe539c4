use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("unknown agent kind {0:?}")]
    UnknownKind(String),

    #[error("unknown obstacle kind {0:?}")]
    UnknownObstacle(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
