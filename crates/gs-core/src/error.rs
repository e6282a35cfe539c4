//! Shared error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers the few
//! failures that originate in this crate (parsing textual enum values).

use thiserror::Error;

/// The error type for `gs-core`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown orientation {0:?}: expected \"horizontal\" or \"vertical\"")]
    UnknownOrientation(String),

    #[error("unknown heading {0:?}: expected \"east\", \"west\", \"north\" or \"south\"")]
    UnknownHeading(String),
}

/// Shorthand result type for `gs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
