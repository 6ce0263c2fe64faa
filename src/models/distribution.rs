use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::{safe_f64, safe_u64};

/// One row of a precomputed percentile distribution snapshot: the number of
/// wallets whose lifetime USD volume falls inside `[min_total_usd, max_total_usd]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionBucket {
    pub wallet_count: u64,
    pub min_total_usd: f64,
    pub max_total_usd: f64,
    pub usd_percentile_rank: f64,
}

impl DistributionBucket {
    /// Build a bucket from a raw snapshot row. Missing or malformed fields
    /// coerce to zero; an absent or zero max falls back to the min.
    pub fn from_row(row: &Value) -> Self {
        let min_total_usd = safe_f64(row.get("min_total_usd"));
        let max_raw = safe_f64(row.get("max_total_usd"));
        let max_total_usd = if max_raw == 0.0 { min_total_usd } else { max_raw };

        Self {
            wallet_count: safe_u64(row.get("wallet_count")),
            min_total_usd,
            max_total_usd,
            usd_percentile_rank: safe_f64(row.get("usd_percentile_rank")),
        }
    }
}

/// A full percentile distribution for one cohort, ordered ascending by
/// `usd_percentile_rank`. Index 0 is the lowest-volume bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    buckets: Vec<DistributionBucket>,
}

impl Distribution {
    /// Sort buckets into ascending rank order. The sort is stable, so rows
    /// with equal (or unparseable) ranks keep their source order.
    pub fn from_buckets(mut buckets: Vec<DistributionBucket>) -> Self {
        buckets.sort_by(|a, b| {
            a.usd_percentile_rank
                .partial_cmp(&b.usd_percentile_rank)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { buckets }
    }

    pub fn buckets(&self) -> &[DistributionBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total wallet count represented by the snapshot, used as the cohort's
    /// estimated real-world size.
    pub fn total_wallets(&self) -> u64 {
        self.buckets.iter().map(|b| b.wallet_count).sum()
    }
}

/// The rank interval a USD volume occupies within a cohort-sized slice of a
/// distribution, expressed as percentages of the cohort size.
///
/// Percentiles are measured from the bottom of the distribution:
/// `start_percentile` 0 is the lowest-volume end. Use [`top_percentiles`]
/// for the "Top X%" display convention.
///
/// [`top_percentiles`]: PercentileBand::top_percentiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileBand {
    pub start_percentile: f64,
    pub end_percentile: f64,
    /// Wallets from this bucket counted toward the cohort.
    pub band_wallets: u64,
    /// The bucket's full wallet count, before cohort truncation.
    pub band_wallets_full: u64,
    pub wallets_before: u64,
    pub bucket_index: usize,
    pub bucket: DistributionBucket,
}

impl PercentileBand {
    /// The same interval expressed rank-from-the-top.
    pub fn top_percentiles(&self) -> (f64, f64) {
        (100.0 - self.end_percentile, 100.0 - self.start_percentile)
    }

    pub fn midpoint(&self) -> f64 {
        (self.start_percentile + self.end_percentile) / 2.0
    }
}
