//! Descriptive statistics over one variant's latency samples.

use serde::{Deserialize, Serialize};

/// Sample count below which P95 falls back to the maximum.
const P95_MIN_SAMPLES: usize = 20;

/// Descriptive statistics over a set of latency samples, in milliseconds.
///
/// Built only from successful calls; an empty sample set yields no summary
/// at all rather than a summary of zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median; the midpoint average for even counts.
    pub median: f64,
    /// Sample standard deviation (n - 1). `None` below two samples,
    /// where it is undefined.
    pub std_dev: Option<f64>,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// 95th percentile, nearest-rank. With fewer than 20 samples the tail
    /// is too thin to rank, so P95 is the maximum; otherwise it is the
    /// ascending-sorted value at index `floor(0.95 * n)`.
    pub p95: f64,
}

impl LatencySummary {
    /// Summarize a sample set; `None` when it is empty.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let n = sorted.len();

        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };
        let std_dev = (n >= 2).then(|| {
            let variance =
                sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        });
        let p95 = if n < P95_MIN_SAMPLES {
            sorted[n - 1]
        } else {
            sorted[(n as f64 * 0.95) as usize]
        };

        Some(Self {
            count: n,
            mean,
            median,
            std_dev,
            min: sorted[0],
            max: sorted[n - 1],
            p95,
        })
    }
}
