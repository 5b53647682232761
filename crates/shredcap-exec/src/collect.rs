//! Snapshot assembly: list job ids, resolve jobs, resolve delete targets.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use shredcap_core::prelude::{FullJobId, JobRecord, TableMetadata, TableRef};
use shredcap_io::{JobStore, TableCatalog, Warehouse};

use crate::fetch::{fetch_all, FetchError};

/// Everything the planner needs, fetched in full before any computation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Successful jobs only (DONE, no errors).
    pub jobs: Vec<JobRecord>,
    /// Delete targets, in manifest order.
    pub tables: Vec<TableMetadata>,
    /// Jobs resolved before filtering.
    pub fetched_jobs: usize,
}

pub struct Fetcher {
    warehouse: Arc<dyn Warehouse>,
    parallelism: usize,
}

impl Fetcher {
    pub fn new(warehouse: Arc<dyn Warehouse>, parallelism: usize) -> Self {
        Self {
            warehouse,
            parallelism: parallelism.max(1),
        }
    }

    pub async fn collect(
        &self,
        state_table: &TableRef,
        targets: &[TableRef],
    ) -> Result<Snapshot, FetchError> {
        let raw_ids = {
            let warehouse = Arc::clone(&self.warehouse);
            let state_table = state_table.clone();
            tokio::task::spawn_blocking(move || warehouse.list_job_ids(&state_table)).await??
        };
        let ids = raw_ids
            .iter()
            .map(|raw| FullJobId::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        info!(%state_table, jobs = ids.len(), parallelism = self.parallelism, "fetching jobs");

        let warehouse = Arc::clone(&self.warehouse);
        let jobs = fetch_all(ids, self.parallelism, move |id| warehouse.get_job(&id)).await?;
        let fetched_jobs = jobs.len();
        let jobs: Vec<JobRecord> = jobs.into_iter().filter(JobRecord::is_successful).collect();
        debug!(fetched_jobs, successful = jobs.len(), "filtered jobs");

        info!(tables = targets.len(), "fetching delete targets");
        let warehouse = Arc::clone(&self.warehouse);
        let tables = fetch_all(targets.to_vec(), self.parallelism, move |table| {
            warehouse.get_table(&table)
        })
        .await?;

        Ok(Snapshot {
            jobs,
            tables,
            fetched_jobs,
        })
    }

    /// Drive `collect` on a dedicated runtime sized to the worker count.
    pub fn collect_blocking(
        &self,
        state_table: &TableRef,
        targets: &[TableRef],
    ) -> Result<Snapshot, FetchError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .max_blocking_threads(self.parallelism)
            .enable_all()
            .build()
            .map_err(|e| FetchError::Runtime(e.to_string()))?;
        runtime.block_on(self.collect(state_table, targets))
    }
}
