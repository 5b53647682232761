//! YAML manifest of delete targets.
//!
//! Example:
//! ```yaml
//! default_project: moz-fx-data-shared-prod
//! on_demand_table: main_v4
//! report_tables: [main_summary_v4]
//! targets:
//!   - telemetry_stable.main_v4
//!   - telemetry_derived.main_summary_v4
//!   - other-project.telemetry_derived.clients_daily_v6
//! ```

use serde::{Deserialize, Serialize};

use shredcap_core::prelude::*;

fn default_on_demand_table() -> String {
    "main_v4".to_string()
}

fn default_report_tables() -> Vec<String> {
    vec!["main_summary_v4".to_string()]
}

/// Manifest document as written on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetManifest {
    /// Project for targets written as `dataset.table`.
    #[serde(default)]
    pub default_project: Option<String>,

    /// Short id of the table billed on-demand.
    #[serde(default = "default_on_demand_table")]
    pub on_demand_table: String,

    /// Short ids that get a completion-time estimate.
    #[serde(default = "default_report_tables")]
    pub report_tables: Vec<String>,

    pub targets: Vec<String>,
}

/// Resolved manifest: every target is a canonical `TableRef`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTargets {
    pub on_demand_table: String,
    pub report_tables: Vec<String>,
    pub targets: Vec<TableRef>,
}

impl DeleteTargets {
    pub fn is_report_table(&self, table: &TableMetadata) -> bool {
        self.report_tables.iter().any(|t| t == table.table_id())
    }
}

impl TryFrom<TargetManifest> for DeleteTargets {
    type Error = Error;

    fn try_from(doc: TargetManifest) -> Result<Self> {
        if doc.targets.is_empty() {
            return Err(Error::Manifest("manifest lists no targets".into()));
        }
        let mut targets: Vec<TableRef> = Vec::with_capacity(doc.targets.len());
        for raw in &doc.targets {
            let table = TableRef::parse_with_default_project(raw, doc.default_project.as_deref())?;
            if !targets.contains(&table) {
                targets.push(table);
            }
        }
        Ok(Self {
            on_demand_table: doc.on_demand_table,
            report_tables: doc.report_tables,
            targets,
        })
    }
}

pub fn parse_target_manifest(yaml_src: &str) -> Result<DeleteTargets> {
    let doc: TargetManifest =
        serde_yaml::from_str(yaml_src).map_err(|e| Error::Manifest(e.to_string()))?;
    DeleteTargets::try_from(doc)
}
