#![forbid(unsafe_code)]
//! shredcap: shredder capacity and cost estimation.
//!
//! Umbrella crate re-exporting the workspace members; the binary lives in
//! `shredcap-cli`.

pub use shredcap_core;
pub use shredcap_exec;
pub use shredcap_io;
pub use shredcap_planner;
