//! Convenient re-exports for downstream crates.

pub use crate::config::{CapacityConfig, PricingConstants};
pub use crate::error::{Error, Result};
pub use crate::id::{FullJobId, TableRef};
pub use crate::types::{JobError, JobRecord, JobState, PricingClass, TableMetadata};
