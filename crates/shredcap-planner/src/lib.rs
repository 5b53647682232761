#![forbid(unsafe_code)]
//! shredcap-planner: job records → throughput → capacity and cost projections.
//!
//! Design:
//! - `throughput` reduces completed jobs to bytes/second for the reserved pool.
//! - `mean` fills in tables without history using a volume-weighted mean.
//! - `cost` turns throughput into completion times, reserved units needed,
//!   and on-demand dollars per month.
//! - `targets` parses the YAML delete-target manifest.
//! - `report` assembles every projection and renders the stdout lines.
//!
//! Everything here is synchronous arithmetic; fetching lives in `shredcap-exec`.

pub mod cost;
pub mod format;
pub mod mean;
pub mod report;
pub mod targets;
pub mod throughput;

pub use cost::{
    partition_tables, total_bytes, units_needed, CapacityPlanner, CompletionEstimate, OnDemandCost,
    UnitsEstimate,
};
pub use mean::{weighted_mean, Sample};
pub use report::{CapacityReport, TableReport};
pub use targets::{parse_target_manifest, DeleteTargets, TargetManifest};
pub use throughput::{bytes_per_second, Efficiency, Throughput};
