use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid identifier '{id}': {reason}")]
    InvalidId { id: String, reason: &'static str },

    // Jobs exist but the sums cannot be divided into; upstream records are malformed.
    #[error(
        "degenerate aggregate over {jobs} job(s): total_bytes_processed={total_bytes}, slot_millis={slot_millis}"
    )]
    DegenerateAggregate {
        jobs: usize,
        total_bytes: u64,
        slot_millis: u64,
    },

    #[error("Delete-target manifest error: {0}")]
    Manifest(String),
}

