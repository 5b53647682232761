//! Job throughput aggregation.
//!
//! Bytes/second is extrapolated to the whole reserved pool from the ratio of
//! bytes processed to unit-time consumed, i.e. it assumes unit time scales
//! linearly with the number of units.

use serde::{Deserialize, Serialize};
use tracing::debug;

use shredcap_core::prelude::*;

/// Aggregate throughput of a job set on a fixed reserved pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Throughput {
    pub jobs: usize,
    pub total_bytes_processed: u64,
    pub slot_millis: u64,
    pub reserved_units: u32,
    pub slot_millis_per_byte: f64,
    pub bytes_per_second: f64,
}

impl Throughput {
    pub fn gib_per_minute(&self) -> f64 {
        self.bytes_per_second * 60.0 / (1u64 << 30) as f64
    }

    /// Cost relative to on-demand pricing at 100% utilization.
    pub fn efficiency(&self, pricing: &PricingConstants) -> Efficiency {
        Efficiency {
            ratio: self.slot_millis_per_byte / pricing.min_flat_rate_unit_millis_per_byte(),
        }
    }
}

/// `ratio <= 1` means flat-rate is cheaper than on-demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Efficiency {
    pub ratio: f64,
}

impl Efficiency {
    pub fn is_cheaper(&self) -> bool {
        self.ratio <= 1.0
    }

    /// Distance from break-even, in percent.
    pub fn percent(&self) -> f64 {
        (100.0 - self.ratio * 100.0).abs()
    }

    pub fn tense(&self) -> &'static str {
        if self.is_cheaper() {
            "cheaper"
        } else {
            "more expensive"
        }
    }
}

/// Throughput of `jobs`, optionally restricted to those writing `table`.
///
/// `Ok(None)` when no job qualifies. Zero total bytes (or zero unit time) over a
/// non-empty set is malformed input and returns `Error::DegenerateAggregate`.
pub fn bytes_per_second(
    jobs: &[JobRecord],
    table: Option<&TableMetadata>,
    reserved_units: u32,
) -> Result<Option<Throughput>> {
    let mut count = 0usize;
    let mut total_bytes = 0u64;
    let mut slot_millis = 0u64;
    for job in jobs {
        if let Some(t) = table {
            if job.destination_table != t.table {
                continue;
            }
        }
        count += 1;
        total_bytes = total_bytes.saturating_add(job.total_bytes_processed);
        slot_millis = slot_millis.saturating_add(job.slot_millis);
    }

    if count == 0 {
        return Ok(None);
    }
    if total_bytes == 0 || slot_millis == 0 {
        return Err(Error::DegenerateAggregate {
            jobs: count,
            total_bytes,
            slot_millis,
        });
    }

    let bytes = total_bytes as f64;
    let millis = slot_millis as f64;
    let throughput = Throughput {
        jobs: count,
        total_bytes_processed: total_bytes,
        slot_millis,
        reserved_units,
        slot_millis_per_byte: millis / bytes,
        bytes_per_second: bytes / (millis / 1000.0 / f64::from(reserved_units)),
    };
    let scope = table.map_or_else(|| "*".to_string(), |t| t.table.to_string());
    debug!(
        table = %scope,
        jobs = count,
        bytes_per_second = throughput.bytes_per_second,
        "aggregated throughput"
    );
    Ok(Some(throughput))
}
