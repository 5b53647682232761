//! Capacity and cost projections downstream of throughput.
//!
//! Three independent projections:
//! - time to finish one table at its own observed throughput,
//! - reserved units needed to finish every flat-rate table within the window,
//! - dollars per month for on-demand tables.

use serde::{Deserialize, Serialize};
use tracing::debug;

use shredcap_core::prelude::*;

use crate::mean::weighted_mean;
use crate::throughput::{bytes_per_second, Throughput};

/// Split tables into `(flat_rate, on_demand)`, preserving order.
pub fn partition_tables(
    tables: &[TableMetadata],
    main_table: &str,
) -> (Vec<TableMetadata>, Vec<TableMetadata>) {
    tables
        .iter()
        .cloned()
        .partition(|t| t.pricing_class(main_table) == PricingClass::FlatRate)
}

/// Reserved units needed so every table finishes within `seconds_per_run`.
///
/// Each entry is `(per-table bytes/second, table bytes)`. Tables without a
/// rate use the byte-weighted mean of the tables that have one. `None` when a
/// table has neither.
pub fn units_needed(
    speeds_and_bytes: &[(Option<f64>, u64)],
    seconds_per_run: f64,
    reserved_units: u32,
) -> Option<f64> {
    let mean = weighted_mean(speeds_and_bytes.iter().map(|&(v, b)| (v, b as f64)));
    let mut total = 0.0;
    for &(speed, num_bytes) in speeds_and_bytes {
        let speed = speed.or(mean)?;
        total += num_bytes as f64 / seconds_per_run / speed * f64::from(reserved_units);
    }
    Some(total)
}

/// Total table bytes, saturating at `u64::MAX`.
pub fn total_bytes(tables: &[TableMetadata]) -> u64 {
    tables
        .iter()
        .fold(0u64, |acc, t| acc.saturating_add(t.num_bytes))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionEstimate {
    pub seconds: f64,
    pub throughput: Throughput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitsEstimate {
    /// `None` when no flat-rate table has completed jobs.
    pub units_needed: Option<f64>,
    pub num_bytes: u64,
    pub tables: usize,
    /// Tables that borrowed the weighted mean instead of their own rate.
    pub fallback_tables: usize,
    pub mean_bytes_per_second: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OnDemandCost {
    pub dollars_per_month: f64,
    pub num_bytes: u64,
    pub tables: usize,
}

/// Projections for one run configuration.
#[derive(Debug, Clone, Copy)]
pub struct CapacityPlanner<'a> {
    config: &'a CapacityConfig,
    pricing: &'a PricingConstants,
}

impl<'a> CapacityPlanner<'a> {
    pub fn new(config: &'a CapacityConfig, pricing: &'a PricingConstants) -> Self {
        Self { config, pricing }
    }

    pub fn config(&self) -> &'a CapacityConfig {
        self.config
    }

    pub fn pricing(&self) -> &'a PricingConstants {
        self.pricing
    }

    pub fn throughput(
        &self,
        jobs: &[JobRecord],
        table: Option<&TableMetadata>,
    ) -> Result<Option<Throughput>> {
        bytes_per_second(jobs, table, self.config.reserved_units)
    }

    /// Time to process `table` at its own rate. Never falls back to another rate.
    pub fn completion_time(
        &self,
        jobs: &[JobRecord],
        table: &TableMetadata,
    ) -> Result<Option<CompletionEstimate>> {
        Ok(self.throughput(jobs, Some(table))?.map(|throughput| CompletionEstimate {
            seconds: table.num_bytes as f64 / throughput.bytes_per_second,
            throughput,
        }))
    }

    pub fn units_needed(
        &self,
        jobs: &[JobRecord],
        flat_rate_tables: &[TableMetadata],
    ) -> Result<UnitsEstimate> {
        let mut speeds_and_bytes = Vec::with_capacity(flat_rate_tables.len());
        for table in flat_rate_tables {
            let speed = self.throughput(jobs, Some(table))?.map(|t| t.bytes_per_second);
            speeds_and_bytes.push((speed, table.num_bytes));
        }

        let mean_bytes_per_second =
            weighted_mean(speeds_and_bytes.iter().map(|&(v, b)| (v, b as f64)));
        let fallback_tables = speeds_and_bytes.iter().filter(|(v, _)| v.is_none()).count();
        let units = units_needed(
            &speeds_and_bytes,
            self.config.seconds_per_run(),
            self.config.reserved_units,
        );
        debug!(
            tables = flat_rate_tables.len(),
            fallback_tables,
            mean_bytes_per_second = mean_bytes_per_second.unwrap_or(f64::NAN),
            "estimated flat-rate units"
        );

        Ok(UnitsEstimate {
            units_needed: units,
            num_bytes: total_bytes(flat_rate_tables),
            tables: flat_rate_tables.len(),
            fallback_tables,
            mean_bytes_per_second,
        })
    }

    /// On-demand billing is per byte, so throughput does not enter.
    pub fn on_demand_cost(&self, on_demand_tables: &[TableMetadata]) -> OnDemandCost {
        let num_bytes = total_bytes(on_demand_tables);
        OnDemandCost {
            dollars_per_month: num_bytes as f64 * self.config.runs_per_month()
                / self.pricing.on_demand_bytes_per_dollar,
            num_bytes,
            tables: on_demand_tables.len(),
        }
    }
}
