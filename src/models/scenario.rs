use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::cohort::{CohortBand, CurvePoint, ScenarioCard};

/// Economic assumptions for a single projection run. All percentages are on
/// a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub total_supply: u64,
    pub og_pool_pct: f64,
    pub fdv_billion: f64,
    pub cohort_size: u64,
    pub tier_pct: f64,
    pub share_pct: f64,
}

impl ScenarioParams {
    pub fn with_share(&self, share_pct: f64) -> Self {
        Self {
            share_pct,
            ..self.clone()
        }
    }

    pub fn with_fdv(&self, fdv_billion: f64) -> Self {
        Self {
            fdv_billion,
            ..self.clone()
        }
    }
}

/// Projected values for a single tier share / FDV combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub share_pct: f64,
    pub fdv_billion: f64,
    pub tokens_per_wallet: f64,
    pub usd_value: f64,
}

/// One row of the share-comparison table, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareTableRow {
    pub share_pct: f64,
    pub tokens_per_wallet: f64,
    pub usd_value: f64,
}

/// One cell of the share x FDV sensitivity grid, unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub share_pct: f64,
    pub fdv_billion: f64,
    pub tokens_per_wallet: f64,
    pub usd_value: f64,
}

/// One step of the payout walk-through shown during the reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealStep {
    pub title: String,
    pub detail: String,
}

/// Derived figures for the featured scenario, plus the comparison tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    pub token_price: f64,
    pub wallets_in_tier: u64,
    pub og_pool_tokens: f64,
    pub featured_share: f64,
    pub tier_pct: f64,
    pub share_table: Vec<ShareTableRow>,
    pub heatmap: Vec<HeatmapRow>,
    pub steps: Vec<RevealStep>,
}

/// The full input tuple of a projection run. Two runs with equal signatures
/// produce identical output, so a stored signature detects stale reveals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSignature {
    pub og_pool_pct: f64,
    pub fdv_billion: f64,
    pub cohort_size: u64,
    pub tier_pct: f64,
    pub share_options: Vec<f64>,
    pub fdv_sensitivity: Vec<f64>,
}

/// Everything a rendering host needs for the scenario section: per-cohort
/// cards and bands, chart curve rows, the headline result, and the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioContext {
    pub cards: Vec<ScenarioCard>,
    pub bands: HashMap<String, CohortBand>,
    pub curve_rows: Vec<CurvePoint>,
    pub snapshot: ScenarioSnapshot,
    pub primary_result: ScenarioResult,
    pub primary_label: String,
    pub primary_cohort_wallets: u64,
    pub signature: ScenarioSignature,
    pub featured_share: f64,
    pub token_price: f64,
    pub total_usd_snapshot: f64,
}
