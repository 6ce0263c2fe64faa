use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::CohortSettings;
use crate::models::Distribution;

/// A cohort's distribution snapshot together with its configuration and the
/// wallet-count estimate derived from the snapshot.
#[derive(Debug, Clone)]
pub struct LoadedCohort {
    pub name: String,
    pub distribution: Arc<Distribution>,
    pub estimate: u64,
    pub config: CohortSettings,
}

/// Per-cohort display payload for the comparison cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCard {
    pub title: String,
    pub subtitle: String,
    pub payout_text: String,
    pub tokens_text: String,
    pub wallets_text: String,
    pub band_text: Option<String>,
    pub is_primary: bool,
    pub cohort_size: u64,
    pub usd_value: f64,
    pub tokens_value: f64,
    pub full_label: String,
    pub curve_points: Vec<CurvePoint>,
    pub highlight_mid: Option<f64>,
    pub highlight_usd: Option<f64>,
}

/// Where a wallet sits within one cohort, if a wallet report was available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortBand {
    pub label: String,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub mid: Option<f64>,
    pub cohort_size: u64,
}

/// One point of a cohort's percentile/USD payout curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub scenario: String,
    pub percentile: f64,
    pub usd: f64,
    pub min_usd: f64,
    pub max_usd: f64,
}
