//! Run configuration and pricing constants.
//!
//! Both are built once at startup and passed by reference; nothing here is
//! mutated after validation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::id::TableRef;

pub const SECONDS_PER_DAY: u64 = 60 * 60 * 24;

const DAYS_PER_YEAR: f64 = 365.0;
const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    /// Reserved units ("slots") currently available to the shredder.
    pub reserved_units: u32,

    /// Deletion deadline: every table must be processed once per window.
    pub window_days: u32,

    /// Worker count for fetching jobs and tables.
    pub parallelism: usize,

    /// Table holding the job ids logged by the shredder.
    pub state_table: String,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            reserved_units: 1000,
            window_days: 28,
            parallelism: 20,
            state_table: "relud-17123.test.shredder_state".to_string(),
        }
    }
}

impl CapacityConfig {
    /// Build a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `SHREDCAP_SLOTS`: reserved units
    /// - `SHREDCAP_DAYS`: window in days
    /// - `SHREDCAP_PARALLELISM`: fetch workers
    /// - `SHREDCAP_STATE_TABLE`: job-id log table
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`CapacityConfig::from_env`] with an explicit variable lookup.
    /// Unparseable numbers keep their defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(v) = lookup("SHREDCAP_SLOTS").and_then(|s| s.parse::<u32>().ok()) {
            cfg.reserved_units = v;
        }

        if let Some(v) = lookup("SHREDCAP_DAYS").and_then(|s| s.parse::<u32>().ok()) {
            cfg.window_days = v;
        }

        if let Some(v) = lookup("SHREDCAP_PARALLELISM").and_then(|s| s.parse::<usize>().ok()) {
            cfg.parallelism = v;
        }

        if let Some(s) = lookup("SHREDCAP_STATE_TABLE") {
            cfg.state_table = s;
        }

        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if self.reserved_units == 0 {
            return Err(Error::Config("reserved units must be positive".into()));
        }
        if self.window_days == 0 {
            return Err(Error::Config("window days must be positive".into()));
        }
        if self.parallelism == 0 {
            return Err(Error::Config("parallelism must be positive".into()));
        }
        self.state_table_ref()?;
        Ok(())
    }

    pub fn state_table_ref(&self) -> Result<TableRef> {
        TableRef::parse(&self.state_table)
    }

    pub fn seconds_per_run(&self) -> f64 {
        (u64::from(self.window_days) * SECONDS_PER_DAY) as f64
    }

    pub fn runs_per_month(&self) -> f64 {
        DAYS_PER_YEAR / MONTHS_PER_YEAR / f64::from(self.window_days)
    }
}

/// Flat-rate versus on-demand pricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConstants {
    /// Monthly price of one reserved unit.
    pub flat_rate_dollars_per_month_per_unit: f64,

    /// Bytes scanned per dollar under on-demand billing.
    pub on_demand_bytes_per_dollar: f64,

    /// Unit-milliseconds one reserved unit provides per second.
    pub unit_millis_per_second_per_unit: f64,

    /// Billing month length used to spread the flat-rate price.
    pub seconds_per_month: f64,
}

impl Default for PricingConstants {
    fn default() -> Self {
        Self {
            // 500 slots for $8,500/mo
            flat_rate_dollars_per_month_per_unit: 8500.0 / 500.0,
            // $5/TiB
            on_demand_bytes_per_dollar: (1u64 << 40) as f64 / 5.0,
            unit_millis_per_second_per_unit: 1000.0,
            seconds_per_month: (SECONDS_PER_DAY * 7 * 52) as f64 / MONTHS_PER_YEAR,
        }
    }
}

impl PricingConstants {
    /// Break-even rate per unit: below it on-demand is cheaper at 100% utilization.
    pub fn min_flat_rate_bytes_per_second_per_unit(&self) -> f64 {
        self.on_demand_bytes_per_dollar * self.flat_rate_dollars_per_month_per_unit
            / self.seconds_per_month
    }

    /// Break-even expressed as unit-milliseconds spent per byte.
    pub fn min_flat_rate_unit_millis_per_byte(&self) -> f64 {
        self.unit_millis_per_second_per_unit / self.min_flat_rate_bytes_per_second_per_unit()
    }
}
