//! JSON export of the warehouse.
//!
//! ```json
//! {
//!   "state_tables": { "relud-17123.test.shredder_state": ["shredder:US.job_1"] },
//!   "jobs": {
//!     "shredder:US.job_1": {
//!       "destination_table": "moz-fx-data-shared-prod.telemetry_derived.main_summary_v4",
//!       "total_bytes_processed": 1000000000,
//!       "slot_millis": 500000,
//!       "state": "DONE",
//!       "errors": []
//!     }
//!   },
//!   "tables": [
//!     { "table": "moz-fx-data-shared-prod.telemetry_derived.main_summary_v4", "num_bytes": 7200000000000 }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use shredcap_core::prelude::{FullJobId, JobRecord, TableMetadata, TableRef};

use crate::error::{Error, Result};
use crate::memory::MemoryWarehouse;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarehouseSnapshot {
    /// Raw job ids per state table. Ids are kept as strings so malformed
    /// entries surface when the run parses them.
    #[serde(default)]
    pub state_tables: BTreeMap<TableRef, Vec<String>>,
    #[serde(default)]
    pub jobs: BTreeMap<FullJobId, JobRecord>,
    #[serde(default)]
    pub tables: Vec<TableMetadata>,
}

impl WarehouseSnapshot {
    pub fn from_json(src: &str) -> Result<Self> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn into_warehouse(self) -> MemoryWarehouse {
        let mut wh = MemoryWarehouse::new();
        for (state_table, ids) in self.state_tables {
            for id in ids {
                wh.log_job_id(&state_table, id);
            }
        }
        for (id, job) in self.jobs {
            wh.insert_job_record(id, job);
        }
        for table in self.tables {
            wh.insert_table(table);
        }
        wh
    }
}

/// Read a snapshot file into a shareable in-memory warehouse.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<MemoryWarehouse> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(WarehouseSnapshot::from_json(&src)?.into_warehouse())
}
