use thiserror::Error;

use gs_core::{Orientation, Pos};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("signal cycle length must be positive")]
    ZeroCycle,

    #[error("a {orientation} signal already stands at {pos}")]
    Duplicate { pos: Pos, orientation: Orientation },

    #[error("signal limit of {0} reached")]
    TooMany(usize),
}

pub type SignalResult<T> = Result<T, SignalError>;
