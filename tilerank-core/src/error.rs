//! Engine error types

use thiserror::Error;

use crate::board::Pos;

/// Errors raised by tile parsing and board mutation.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed tile definition string. Nothing is mutated.
    #[error("invalid tile definition: {reason}")]
    InvalidTileDefinition { reason: String },

    /// Placement at an occupied or detached position, or a terrain
    /// conflict with a neighbor. Pre-filtered callers (the search path)
    /// never see this.
    #[error("invalid placement at {pos:?}")]
    InvalidPlacement { pos: Pos },
}

/// Errors raised while loading a persisted board. Any failing line aborts
/// the load as a whole; no partial board is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("i/o error reading board file")]
    Io(#[from] std::io::Error),

    #[error("malformed board line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("board line {line} replays as an invalid placement")]
    Placement {
        line: usize,
        #[source]
        source: Error,
    },
}
