//! Volume-weighted mean over optional samples.

use serde::{Deserialize, Serialize};

/// One throughput observation; `None` means the table had no completed jobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sample {
    Weighted(Option<f64>, f64),
    /// Implicit weight of 1.
    Unweighted(Option<f64>),
}

impl Sample {
    fn into_pair(self) -> (Option<f64>, f64) {
        match self {
            Sample::Weighted(value, weight) => (value, weight),
            Sample::Unweighted(value) => (value, 1.0),
        }
    }
}

impl From<(Option<f64>, f64)> for Sample {
    fn from((value, weight): (Option<f64>, f64)) -> Self {
        Sample::Weighted(value, weight)
    }
}

impl From<Option<f64>> for Sample {
    fn from(value: Option<f64>) -> Self {
        Sample::Unweighted(value)
    }
}

/// Absent samples contribute neither value nor weight. Returns `None` when the
/// present weights sum to zero.
pub fn weighted_mean<I, S>(samples: I) -> Option<f64>
where
    I: IntoIterator<Item = S>,
    S: Into<Sample>,
{
    let mut total_value = 0.0;
    let mut total_weight = 0.0;
    for sample in samples {
        let (value, weight) = sample.into().into_pair();
        if let Some(v) = value {
            total_value += v * weight;
            total_weight += weight;
        }
    }
    if total_weight != 0.0 {
        Some(total_value / total_weight)
    } else {
        None
    }
}
