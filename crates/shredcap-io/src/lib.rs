#![forbid(unsafe_code)]
//! shredcap-io: collaborators that supply job records and table metadata.
//!
//! - `warehouse`: the `JobStore` / `TableCatalog` traits.
//! - `memory`: read-only in-memory backend, shareable across workers.
//! - `snapshot`: loads a JSON export of the warehouse into a `MemoryWarehouse`.

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod warehouse;

pub use error::{Error, Result};
pub use memory::MemoryWarehouse;
pub use snapshot::{load_snapshot, WarehouseSnapshot};
pub use warehouse::{JobStore, TableCatalog, Warehouse};
