#![forbid(unsafe_code)]
//! shredcap-exec: assemble a consistent snapshot of jobs and tables.
//!
//! The only blocking work in a run is warehouse lookups. They run in a bounded
//! task group and every task is joined before the snapshot is handed to the
//! planner. The first failed lookup aborts the rest.

pub mod collect;
pub mod fetch;

pub use collect::{Fetcher, Snapshot};
pub use fetch::{fetch_all, FetchError};
