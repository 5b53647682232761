//! Full capacity report: every projection for one snapshot, plus rendering.

use serde::{Deserialize, Serialize};

use shredcap_core::prelude::*;

use crate::cost::{partition_tables, CapacityPlanner, CompletionEstimate, OnDemandCost, UnitsEstimate};
use crate::format;
use crate::targets::DeleteTargets;
use crate::throughput::{Efficiency, Throughput};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: TableRef,
    pub num_bytes: u64,
    /// `None` when no job for this table has completed.
    pub completion: Option<CompletionEstimate>,
    pub efficiency: Option<Efficiency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub reserved_units: u32,
    pub window_days: u32,
    pub on_demand_table: String,
    pub overall: Option<Throughput>,
    pub overall_efficiency: Option<Efficiency>,
    pub tables: Vec<TableReport>,
    pub flat_rate: UnitsEstimate,
    pub on_demand: OnDemandCost,
}

impl CapacityReport {
    /// `jobs` must already be restricted to successful jobs.
    pub fn build(
        planner: &CapacityPlanner<'_>,
        jobs: &[JobRecord],
        tables: &[TableMetadata],
        targets: &DeleteTargets,
    ) -> Result<Self> {
        let pricing = planner.pricing();
        let overall = planner.throughput(jobs, None)?;

        let mut reports = Vec::new();
        for table in tables.iter().filter(|t| targets.is_report_table(t)) {
            let completion = planner.completion_time(jobs, table)?;
            reports.push(TableReport {
                table: table.table.clone(),
                num_bytes: table.num_bytes,
                efficiency: completion.map(|c| c.throughput.efficiency(pricing)),
                completion,
            });
        }

        let (flat_rate_tables, on_demand_tables) = partition_tables(tables, &targets.on_demand_table);

        Ok(Self {
            reserved_units: planner.config().reserved_units,
            window_days: planner.config().window_days,
            on_demand_table: targets.on_demand_table.clone(),
            overall_efficiency: overall.map(|t| t.efficiency(pricing)),
            overall,
            tables: reports,
            flat_rate: planner.units_needed(jobs, &flat_rate_tables)?,
            on_demand: planner.on_demand_cost(&on_demand_tables),
        })
    }

    /// Report lines in print order. `verbose` adds throughput and efficiency lines.
    pub fn lines(&self, verbose: bool) -> Vec<String> {
        let mut out = Vec::new();
        let units = self.reserved_units;
        let days = self.window_days;

        if verbose {
            if let (Some(t), Some(e)) = (&self.overall, &self.overall_efficiency) {
                out.push(format!(
                    "shredder is processing {:.3} GiB/min using {units} slots",
                    t.gib_per_minute()
                ));
                out.push(format!(
                    "processing speed is {:.2}% {} than on-demand at 100% utilization",
                    e.percent(),
                    e.tense()
                ));
            }
        }

        for report in &self.tables {
            let table_id = report.table.table_id();
            match &report.completion {
                Some(c) => {
                    if verbose {
                        if let Some(e) = &report.efficiency {
                            out.push(format!(
                                "shredder is processing {table_id} at {:.3} GiB/min using {units} slots",
                                c.throughput.gib_per_minute()
                            ));
                            out.push(format!(
                                "processing speed for {table_id} is {:.2}% {} than on-demand at 100% utilization",
                                e.percent(),
                                e.tense()
                            ));
                        }
                    }
                    out.push(format!(
                        "{} to process {table_id} with {units} slots",
                        format::timedelta(c.seconds)
                    ));
                }
                None => out.push(format!(
                    "no jobs completed yet for {table_id}, skipping time estimate"
                )),
            }
        }

        let main = &self.on_demand_table;
        match self.flat_rate.units_needed {
            Some(slots) => out.push(format!(
                "{slots:.0} slots needed to process {:.3} PiB every {days} day(s) for everything except {main}",
                format::pib(self.flat_rate.num_bytes)
            )),
            None => out.push(format!(
                "no jobs completed yet for flat-rate tables, skipping slot estimate for {:.3} PiB",
                format::pib(self.flat_rate.num_bytes)
            )),
        }

        out.push(format!(
            "${}/mo to process {:.3} PiB every {days} day(s) on-demand for {main}",
            format::dollars(self.on_demand.dollars_per_month),
            format::pib(self.on_demand.num_bytes)
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::parse_target_manifest;

    fn job(table: &str, bytes: u64, millis: u64) -> JobRecord {
        JobRecord {
            destination_table: TableRef::parse(table).unwrap(),
            total_bytes_processed: bytes,
            slot_millis: millis,
            state: JobState::Done,
            errors: vec![],
        }
    }

    fn targets() -> DeleteTargets {
        parse_target_manifest(
            r#"
default_project: p
targets:
  - live.main_v4
  - derived.main_summary_v4
  - derived.clients_daily_v6
"#,
        )
        .unwrap()
    }

    fn tables() -> Vec<TableMetadata> {
        vec![
            TableMetadata::new(TableRef::parse("p.live.main_v4").unwrap(), 1u64 << 50),
            TableMetadata::new(TableRef::parse("p.derived.main_summary_v4").unwrap(), 2_000_000_000 * 3_600),
            TableMetadata::new(TableRef::parse("p.derived.clients_daily_v6").unwrap(), 1u64 << 40),
        ]
    }

    #[test]
    fn renders_every_projection() {
        let cfg = CapacityConfig::default();
        let pricing = PricingConstants::default();
        let planner = CapacityPlanner::new(&cfg, &pricing);
        let jobs = [job("p.derived.main_summary_v4", 1_000_000_000, 500_000)];

        let report = CapacityReport::build(&planner, &jobs, &tables(), &targets()).unwrap();
        assert_eq!(report.tables.len(), 1);
        assert_eq!(report.flat_rate.tables, 2);
        assert_eq!(report.flat_rate.fallback_tables, 1);
        assert_eq!(report.on_demand.tables, 1);

        let lines = report.lines(true);
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("shredder is processing "));
        assert!(lines[1].contains("than on-demand at 100% utilization"));
        assert!(lines[2].starts_with("shredder is processing main_summary_v4 at "));
        assert_eq!(lines[4], "1:00:00 to process main_summary_v4 with 1000 slots");
        assert!(lines[5].ends_with("every 28 day(s) for everything except main_v4"));
        assert!(lines[6].starts_with("$"));
        assert!(lines[6].ends_with("1.000 PiB every 28 day(s) on-demand for main_v4"));

        let quiet = report.lines(false);
        assert_eq!(quiet.len(), 3);
        assert_eq!(quiet[0], lines[4]);
    }

    #[test]
    fn skips_estimates_without_jobs() {
        let cfg = CapacityConfig::default();
        let pricing = PricingConstants::default();
        let planner = CapacityPlanner::new(&cfg, &pricing);

        let report = CapacityReport::build(&planner, &[], &tables(), &targets()).unwrap();
        assert!(report.overall.is_none());
        assert!(report.flat_rate.units_needed.is_none());

        let lines = report.lines(true);
        assert_eq!(
            lines[0],
            "no jobs completed yet for main_summary_v4, skipping time estimate"
        );
        assert!(lines[1].starts_with("no jobs completed yet for flat-rate tables"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn degenerate_jobs_fail_the_report() {
        let cfg = CapacityConfig::default();
        let pricing = PricingConstants::default();
        let planner = CapacityPlanner::new(&cfg, &pricing);
        let jobs = [job("p.derived.main_summary_v4", 0, 10)];
        assert!(CapacityReport::build(&planner, &jobs, &tables(), &targets()).is_err());
    }
}
