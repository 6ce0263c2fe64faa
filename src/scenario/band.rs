use crate::models::{Distribution, PercentileBand};

/// Locate the percentile band a USD volume occupies within `distribution`,
/// assuming `cohort_size` wallets drawn from the low-volume end upward.
///
/// Buckets are walked in ascending volume order, each contributing
/// `min(wallet_count, remaining)` ranks. A value matches the first bucket
/// whose `[min_total_usd, max_total_usd]` range contains it (bounds
/// inclusive); a value below the minimum of the last reachable bucket is
/// assigned to that bucket's tail.
///
/// Returns `None` when the distribution is empty, the cohort size is zero,
/// or the value exceeds the maximum of the richest reachable bucket, i.e.
/// the cohort as sized cannot represent the wallet.
pub fn determine_percentile_band(
    total_usd: f64,
    distribution: &Distribution,
    cohort_size: u64,
) -> Option<PercentileBand> {
    if distribution.is_empty() || cohort_size == 0 {
        return None;
    }

    let mut remaining = cohort_size;
    let mut cumulative_before: u64 = 0;

    for (idx, bucket) in distribution.buckets().iter().enumerate() {
        if bucket.wallet_count == 0 {
            continue;
        }

        let take = bucket.wallet_count.min(remaining);
        if take == 0 {
            break;
        }

        let band_start_rank = cumulative_before;
        let band_end_rank = cumulative_before + take;

        let in_bucket = bucket.min_total_usd <= total_usd && total_usd <= bucket.max_total_usd;
        let is_last_bucket = remaining <= take;

        if in_bucket || (is_last_bucket && total_usd < bucket.min_total_usd) {
            let start_percentile = band_start_rank as f64 / cohort_size as f64 * 100.0;
            let end_percentile = (band_end_rank as f64 / cohort_size as f64 * 100.0).min(100.0);
            return Some(PercentileBand {
                start_percentile,
                end_percentile,
                band_wallets: take,
                band_wallets_full: bucket.wallet_count,
                wallets_before: band_start_rank,
                bucket_index: idx,
                bucket: bucket.clone(),
            });
        }

        cumulative_before = band_end_rank;
        remaining -= take;

        if remaining == 0 {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DistributionBucket;

    fn bucket(wallet_count: u64, min_usd: f64, max_usd: f64, rank: f64) -> DistributionBucket {
        DistributionBucket {
            wallet_count,
            min_total_usd: min_usd,
            max_total_usd: max_usd,
            usd_percentile_rank: rank,
        }
    }

    /// Four contiguous buckets covering [0, 100] USD, 1000 wallets total.
    fn contiguous_distribution() -> Distribution {
        Distribution::from_buckets(vec![
            bucket(400, 0.0, 25.0, 1.0),
            bucket(300, 25.0, 50.0, 2.0),
            bucket(200, 50.0, 75.0, 3.0),
            bucket(100, 75.0, 100.0, 4.0),
        ])
    }

    #[test]
    fn test_empty_distribution_returns_none() {
        assert!(determine_percentile_band(50.0, &Distribution::default(), 1000).is_none());
    }

    #[test]
    fn test_zero_cohort_returns_none() {
        assert!(determine_percentile_band(50.0, &contiguous_distribution(), 0).is_none());
    }

    #[test]
    fn test_single_bucket_spans_full_range() {
        let distribution = Distribution::from_buckets(vec![bucket(1000, 0.0, 100.0, 1.0)]);
        let band = determine_percentile_band(50.0, &distribution, 1000).unwrap();

        assert_eq!(band.start_percentile, 0.0);
        assert_eq!(band.end_percentile, 100.0);
        assert_eq!(band.bucket_index, 0);
        assert_eq!(band.band_wallets, 1000);
        assert_eq!(band.wallets_before, 0);
    }

    #[test]
    fn test_band_coverage_and_monotonicity() {
        let distribution = contiguous_distribution();
        let mut previous_start = -1.0;

        for total_usd in 0..=100 {
            let band = determine_percentile_band(total_usd as f64, &distribution, 1000)
                .unwrap_or_else(|| panic!("no band for {}", total_usd));

            assert!(band.start_percentile >= 0.0);
            assert!(band.end_percentile <= 100.0);
            assert!(band.start_percentile < band.end_percentile);
            assert!(band.start_percentile >= previous_start);
            previous_start = band.start_percentile;
        }
    }

    #[test]
    fn test_boundary_value_matches_lower_bucket_first() {
        // 25.0 is inside both bucket 0 and bucket 1; first match wins.
        let band = determine_percentile_band(25.0, &contiguous_distribution(), 1000).unwrap();

        assert_eq!(band.bucket_index, 0);
        assert_eq!(band.start_percentile, 0.0);
        assert_eq!(band.end_percentile, 40.0);
    }

    #[test]
    fn test_cohort_smaller_than_first_bucket() {
        // The whole cohort fits inside bucket 0, so it is also the last
        // reachable bucket and the band covers all of it.
        let band = determine_percentile_band(10.0, &contiguous_distribution(), 250).unwrap();

        assert_eq!(band.bucket_index, 0);
        assert_eq!(band.band_wallets, 250);
        assert_eq!(band.band_wallets_full, 400);
        assert_eq!(band.start_percentile, 0.0);
        assert_eq!(band.end_percentile, 100.0);
    }

    #[test]
    fn test_value_below_last_reachable_bucket_lands_in_tail() {
        // Buckets start at 10 USD; a 5 USD wallet is poorer than everyone
        // modeled and is assigned to the last bucket the cohort reaches.
        let distribution = Distribution::from_buckets(vec![
            bucket(500, 10.0, 20.0, 1.0),
            bucket(500, 20.0, 30.0, 2.0),
        ]);
        let band = determine_percentile_band(5.0, &distribution, 1000).unwrap();

        assert_eq!(band.bucket_index, 1);
        assert_eq!(band.start_percentile, 50.0);
        assert_eq!(band.end_percentile, 100.0);
    }

    #[test]
    fn test_value_above_every_bucket_returns_none() {
        assert!(determine_percentile_band(500.0, &contiguous_distribution(), 1000).is_none());
    }

    #[test]
    fn test_value_below_unreached_buckets_returns_none() {
        // With a cohort of 400 the walk never leaves bucket 0, so a value
        // only representable by later buckets has no band.
        let band = determine_percentile_band(60.0, &contiguous_distribution(), 400);
        assert!(band.is_none());
    }

    #[test]
    fn test_zero_count_buckets_are_skipped() {
        let distribution = Distribution::from_buckets(vec![
            bucket(0, 0.0, 10.0, 1.0),
            bucket(100, 10.0, 20.0, 2.0),
        ]);
        let band = determine_percentile_band(15.0, &distribution, 100).unwrap();

        assert_eq!(band.bucket_index, 1);
        assert_eq!(band.start_percentile, 0.0);
        assert_eq!(band.end_percentile, 100.0);
    }

    #[test]
    fn test_cohort_larger_than_population_clamps_to_listed_wallets() {
        // 1000 wallets listed but a cohort of 2000 assumed; the walk stops
        // after the listed wallets and percentiles stay below 100.
        let band = determine_percentile_band(90.0, &contiguous_distribution(), 2000).unwrap();

        assert_eq!(band.bucket_index, 3);
        assert_eq!(band.start_percentile, 45.0);
        assert_eq!(band.end_percentile, 50.0);
    }
}
