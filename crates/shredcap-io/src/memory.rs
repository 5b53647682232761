//! In-memory warehouse backend.
//!
//! Populated up front, then shared read-only (typically behind an `Arc`) by the
//! fetch workers. Used by tests and by the snapshot loader.

use std::collections::HashMap;

use shredcap_core::prelude::{FullJobId, JobRecord, TableMetadata, TableRef};

use crate::error::{Error, Result};
use crate::warehouse::{JobStore, TableCatalog};

#[derive(Debug, Clone, Default)]
pub struct MemoryWarehouse {
    job_ids: HashMap<TableRef, Vec<String>>,
    jobs: HashMap<FullJobId, JobRecord>,
    tables: HashMap<TableRef, TableMetadata>,
}

impl MemoryWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job and log its id in `state_table`.
    pub fn insert_job(&mut self, state_table: &TableRef, id: FullJobId, job: JobRecord) {
        self.job_ids
            .entry(state_table.clone())
            .or_default()
            .push(id.to_string());
        self.jobs.insert(id, job);
    }

    /// Log a raw id without a backing job (e.g. ids that fail to resolve).
    pub fn log_job_id(&mut self, state_table: &TableRef, raw_id: impl Into<String>) {
        self.job_ids
            .entry(state_table.clone())
            .or_default()
            .push(raw_id.into());
    }

    pub fn insert_job_record(&mut self, id: FullJobId, job: JobRecord) {
        self.jobs.insert(id, job);
    }

    pub fn insert_table(&mut self, table: TableMetadata) {
        self.tables.insert(table.table.clone(), table);
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl JobStore for MemoryWarehouse {
    fn list_job_ids(&self, state_table: &TableRef) -> Result<Vec<String>> {
        self.job_ids
            .get(state_table)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                kind: "state table",
                id: state_table.to_string(),
            })
    }

    fn get_job(&self, id: &FullJobId) -> Result<JobRecord> {
        self.jobs.get(id).cloned().ok_or_else(|| Error::NotFound {
            kind: "job",
            id: id.to_string(),
        })
    }
}

impl TableCatalog for MemoryWarehouse {
    fn get_table(&self, table: &TableRef) -> Result<TableMetadata> {
        self.tables.get(table).cloned().ok_or_else(|| Error::NotFound {
            kind: "table",
            id: table.to_string(),
        })
    }
}
