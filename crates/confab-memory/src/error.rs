//! Error types for memory operations.

/// Errors returned by memory stores and helpers.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Regex compilation error.
    #[error("regex error: {0}")]
    Regex(String),
    /// Transport failure talking to a remote memory service.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Remote memory service answered with a non-success status.
    #[error("memory service returned {status}: {body}")]
    Api { status: u16, body: String },
    /// A record or response did not have the expected shape.
    #[error("malformed memory result: {0}")]
    Malformed(String),
}
