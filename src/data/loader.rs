use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::config::Settings;
use crate::models::{Distribution, DistributionBucket, DistributionCache, LoadedCohort, Result};

/// Loads percentile distribution snapshots from disk, keeping one parsed
/// copy per path for as long as the backing file is unchanged.
#[derive(Debug, Default)]
pub struct DistributionLoader {
    cache: DistributionCache,
}

/// Accept either a bare array of rows or a `result.rows` wrapper.
fn extract_rows(payload: &Value) -> &[Value] {
    match payload {
        Value::Array(rows) => rows,
        Value::Object(_) => payload
            .get("result")
            .and_then(|result| result.get("rows"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

impl DistributionLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot, reusing the cached parse while the file's
    /// modification time is unchanged. A missing file yields an empty
    /// distribution rather than an error.
    pub fn load(&self, path: &Path) -> Result<Arc<Distribution>> {
        let mtime = fs::metadata(path).and_then(|meta| meta.modified()).ok();
        if let Some(cached) = self.cache.get(path, mtime) {
            return Ok(cached);
        }

        let distribution = Arc::new(self.read_from_disk(path, mtime.is_some())?);
        self.cache
            .insert(path.to_path_buf(), mtime, Arc::clone(&distribution));
        Ok(distribution)
    }

    fn read_from_disk(&self, path: &Path, exists: bool) -> Result<Distribution> {
        if !exists {
            warn!("Distribution file {} not found, treating as empty", path.display());
            return Ok(Distribution::default());
        }

        let raw = fs::read_to_string(path)?;
        let payload: Value = serde_json::from_str(&raw)?;
        let rows = extract_rows(&payload);
        let buckets: Vec<DistributionBucket> =
            rows.iter().map(DistributionBucket::from_row).collect();

        info!("Loaded {} distribution rows from {}", buckets.len(), path.display());
        Ok(Distribution::from_buckets(buckets))
    }

    /// Load every configured cohort in declaration order.
    pub fn load_cohorts(&self, settings: &Settings) -> Result<Vec<LoadedCohort>> {
        let mut cohorts = Vec::with_capacity(settings.cohorts.len());
        for config in &settings.cohorts {
            let distribution = self.load(&config.path)?;
            let estimate = distribution.total_wallets();
            info!(
                "Cohort {}: {} buckets, est. {} wallets",
                config.name,
                distribution.len(),
                estimate
            );
            cohorts.push(LoadedCohort {
                name: config.name.clone(),
                distribution,
                estimate,
                config: config.clone(),
            });
        }
        Ok(cohorts)
    }
}
