#![forbid(unsafe_code)]
//! shredcap-core: shared types for estimating shredder capacity and cost.
//!
//! Everything here is a read-only snapshot value built once per run:
//! - identifiers (`TableRef`, `FullJobId`) with canonical parsing,
//! - records fetched from the warehouse (`JobRecord`, `TableMetadata`),
//! - run configuration (`CapacityConfig`) and `PricingConstants`.
//!
//! No I/O and no async here; collaborators live in `shredcap-io`.

pub mod config;
pub mod error;
pub mod id;
pub mod prelude;
pub mod types;

pub use config::{CapacityConfig, PricingConstants};
pub use error::{Error, Result};
pub use id::{FullJobId, TableRef};
pub use types::{JobError, JobRecord, JobState, PricingClass, TableMetadata};

/// Crate version, surfaced by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
