//! Error types for the core crate.

use thiserror::Error;

/// Errors returned by group chat operations.
#[derive(Debug, Error)]
pub enum ConfabCoreError {
    /// Participant key is not in the roster.
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),
    /// Memory store error.
    #[error("memory error: {0}")]
    Memory(String),
    /// Memory result missing the expected participant tag.
    #[error("malformed memory record: {0}")]
    MalformedRecord(String),
    /// Reply generation error.
    #[error("generation error: {0}")]
    Generation(String),
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
