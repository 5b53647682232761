use thiserror::Error;

/// Result type local to shredcap-io.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed warehouse snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] shredcap_core::Error),

    #[error("warehouse request failed: {0}")]
    Request(String),
}
