//! Collaborator traits for the data warehouse.
//!
//! Implementations are shared by every fetch worker at once, so they must be
//! `Send + Sync` and each call must be an independent read-only request.

use shredcap_core::prelude::{FullJobId, JobRecord, TableMetadata, TableRef};

use crate::error::Result;

pub trait JobStore: Send + Sync {
    /// Raw job ids logged in `state_table`, in the store's order.
    fn list_job_ids(&self, state_table: &TableRef) -> Result<Vec<String>>;

    fn get_job(&self, id: &FullJobId) -> Result<JobRecord>;
}

pub trait TableCatalog: Send + Sync {
    fn get_table(&self, table: &TableRef) -> Result<TableMetadata>;
}

/// A backend serving both jobs and tables.
pub trait Warehouse: JobStore + TableCatalog {}

impl<T: JobStore + TableCatalog + ?Sized> Warehouse for T {}
