use serde::{Deserialize, Serialize};

use crate::models::ScenarioSignature;
use crate::scenario::snap_value_to_options;

/// Adjustable scenario state owned by the host application and passed into
/// each projection run. Serializable so the host can persist it between
/// interactions wherever it likes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub tier_pct: f64,
    pub cohort_size: u64,
    pub og_pool_pct: f64,
    pub fdv_billion: f64,
    pub has_revealed_once: bool,
    pub last_reveal_signature: Option<ScenarioSignature>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            tier_pct: 10.0,
            cohort_size: 100_000,
            og_pool_pct: 15.0,
            fdv_billion: 4.0,
            has_revealed_once: false,
            last_reveal_signature: None,
        }
    }
}

impl SessionContext {
    /// Clamp the stored cohort size and tier onto the discrete option sets,
    /// so a value persisted against an older option set still lands on a
    /// valid slider position.
    pub fn snap_to_options(&mut self, cohort_options: &[u64], percentile_options: &[f64]) {
        if !cohort_options.is_empty() && !cohort_options.contains(&self.cohort_size) {
            let as_floats: Vec<f64> = cohort_options.iter().map(|&v| v as f64).collect();
            self.cohort_size = snap_value_to_options(self.cohort_size as f64, &as_floats) as u64;
        }
        if !percentile_options.is_empty() && !percentile_options.contains(&self.tier_pct) {
            self.tier_pct = snap_value_to_options(self.tier_pct, percentile_options);
        }
    }

    /// Whether the given inputs differ from the ones last revealed.
    pub fn is_stale(&self, signature: &ScenarioSignature) -> bool {
        self.last_reveal_signature.as_ref() != Some(signature)
    }

    pub fn mark_revealed(&mut self, signature: ScenarioSignature) {
        self.has_revealed_once = true;
        self.last_reveal_signature = Some(signature);
    }
}
