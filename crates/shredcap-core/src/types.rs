//! Records fetched from the warehouse. All of them are immutable snapshots.

use serde::{Deserialize, Serialize};

use crate::id::TableRef;

/// Lifecycle state of a warehouse job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobState {
    Pending,
    Running,
    Done,
    Error,
}

/// One entry of a job's error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobError {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

/// A completed (or in-flight) shredder job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub destination_table: TableRef,
    #[serde(default)]
    pub total_bytes_processed: u64,
    #[serde(default)]
    pub slot_millis: u64,
    pub state: JobState,
    #[serde(default)]
    pub errors: Vec<JobError>,
}

impl JobRecord {
    /// Only finished, error-free jobs feed throughput aggregation.
    pub fn is_successful(&self) -> bool {
        self.state == JobState::Done && self.errors.is_empty()
    }
}

/// Billing model a table is processed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingClass {
    /// Billed per byte scanned, no reserved units involved.
    OnDemand,
    /// Processed on the reserved-unit pool.
    FlatRate,
}

/// Size of a delete target as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub table: TableRef,
    pub num_bytes: u64,
}

impl TableMetadata {
    pub fn new(table: TableRef, num_bytes: u64) -> Self {
        Self { table, num_bytes }
    }

    pub fn table_id(&self) -> &str {
        self.table.table_id()
    }

    /// `main_table` is the short id of the one table billed on-demand.
    pub fn pricing_class(&self, main_table: &str) -> PricingClass {
        if self.table_id() == main_table {
            PricingClass::OnDemand
        } else {
            PricingClass::FlatRate
        }
    }
}
