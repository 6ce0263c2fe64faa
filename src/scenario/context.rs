use std::collections::HashMap;

use tracing::debug;

use crate::models::{
    CohortBand, CurvePoint, LoadedCohort, ProjectorError, Result, RevealStep, ScenarioCard,
    ScenarioContext, ScenarioParams, ScenarioSignature, ScenarioSnapshot, WalletReport,
};
use crate::scenario::band::determine_percentile_band;
use crate::scenario::calculator::{
    build_heatmap_data, build_share_table, compute_scenario, token_price, wallets_in_tier,
};
use crate::scenario::sliders::format_percentile_option;
use crate::utils::{format_price, format_whole, group_thousands};

/// Inputs for one multi-cohort projection pass.
pub struct ScenarioContextRequest<'a> {
    pub cohorts: &'a [LoadedCohort],
    /// Must name one of `cohorts`; drives the headline figures.
    pub primary_name: &'a str,
    pub cohort_size: u64,
    pub tier_pct: f64,
    pub og_pool_pct: f64,
    pub fdv_billion: f64,
    /// The first entry powers the featured scenario. An empty list falls
    /// back to 20/30/40.
    pub share_options: Vec<f64>,
    pub fdv_sensitivity: Vec<f64>,
    pub wallet_report: Option<&'a WalletReport>,
    pub total_supply: u64,
    pub token_symbol: &'a str,
}

/// Ensure the selected FDV appears among the sensitivity points, sorted and
/// deduplicated.
pub fn normalize_fdv_sensitivity(selected: f64, mut points: Vec<f64>) -> Vec<f64> {
    if !points.iter().any(|&p| p == selected) {
        points.push(selected);
    }
    points.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    points.dedup();
    points
}

/// Evaluate every cohort under one shared set of assumptions, scaling the
/// cohort-size slider by each cohort's estimated population relative to the
/// primary's, and assemble everything a rendering host needs.
pub fn build_scenario_context(request: ScenarioContextRequest<'_>) -> Result<ScenarioContext> {
    let ScenarioContextRequest {
        cohorts,
        primary_name,
        cohort_size,
        tier_pct,
        og_pool_pct,
        fdv_billion,
        mut share_options,
        fdv_sensitivity,
        wallet_report,
        total_supply,
        token_symbol,
    } = request;

    let primary = cohorts
        .iter()
        .find(|cohort| cohort.name == primary_name)
        .ok_or_else(|| ProjectorError::CohortNotFound(primary_name.to_string()))?;

    let total_usd_snapshot = match wallet_report {
        Some(report) if !primary.distribution.is_empty() => report.total_usd(),
        _ => 0.0,
    };

    if share_options.is_empty() {
        share_options = vec![20.0, 30.0, 40.0];
    }
    let featured_share = share_options[0];

    let price = token_price(fdv_billion, total_supply)?;

    let base_estimate = if primary.estimate > 0 {
        primary.estimate
    } else if cohort_size > 0 {
        cohort_size
    } else {
        1
    };

    let mut cards = Vec::with_capacity(cohorts.len());
    let mut bands = HashMap::with_capacity(cohorts.len());
    let mut curve_rows = Vec::new();
    let mut primary_result = None;
    let mut primary_label = if primary.config.title.is_empty() {
        primary.name.clone()
    } else {
        primary.config.title.clone()
    };
    let mut primary_cohort_wallets = cohort_size;

    for cohort in cohorts {
        let estimate = if cohort.estimate > 0 {
            cohort.estimate
        } else {
            base_estimate
        };
        let factor = estimate as f64 / base_estimate as f64;
        let scenario_cohort_size = ((cohort_size as f64 * factor).round_ties_even() as u64).max(1);

        let scenario_result = compute_scenario(&ScenarioParams {
            total_supply,
            og_pool_pct,
            fdv_billion,
            cohort_size: scenario_cohort_size,
            tier_pct,
            share_pct: featured_share,
        })?;

        let mut band_text = None;
        let mut band_mid = None;
        let mut start_pct = None;
        let mut end_pct = None;
        if wallet_report.is_some() && !cohort.distribution.is_empty() {
            if let Some(band) =
                determine_percentile_band(total_usd_snapshot, &cohort.distribution, scenario_cohort_size)
            {
                band_text = Some(format!(
                    "Wallet percentile: {:.1}% – {:.1}%",
                    band.start_percentile, band.end_percentile
                ));
                band_mid = Some(band.midpoint());
                start_pct = Some(band.start_percentile);
                end_pct = Some(band.end_percentile);
            } else {
                debug!(
                    "No percentile band for {} in cohort {} at size {}",
                    total_usd_snapshot, cohort.name, scenario_cohort_size
                );
            }
        }

        let title = if cohort.config.title.is_empty() {
            cohort.name.clone()
        } else {
            cohort.config.title.clone()
        };

        let subtitle_bits: Vec<&str> = [
            cohort.config.timeline_label.as_str(),
            cohort.config.tagline.as_str(),
        ]
        .into_iter()
        .filter(|bit| !bit.is_empty())
        .collect();
        let subtitle = if subtitle_bits.is_empty() {
            cohort.name.clone()
        } else {
            subtitle_bits.join(" · ")
        };

        let mut wallets_text = format!("Wallets modelled: {}", group_thousands(scenario_cohort_size));
        if cohort.estimate > 0 {
            wallets_text.push_str(&format!(" (est. {})", group_thousands(cohort.estimate)));
        }

        let full_label = if cohort.config.timeline_label.is_empty() {
            title.clone()
        } else {
            format!("{} · {}", title, cohort.config.timeline_label)
        };

        bands.insert(
            cohort.name.clone(),
            CohortBand {
                label: full_label.clone(),
                start: start_pct,
                end: end_pct,
                mid: band_mid,
                cohort_size: scenario_cohort_size,
            },
        );

        let mut card_curve_points = Vec::new();
        for row in cohort.distribution.buckets() {
            let usd = row.min_total_usd.max(row.max_total_usd);
            if usd <= 0.0 || row.usd_percentile_rank <= 0.0 {
                continue;
            }
            let point = CurvePoint {
                scenario: full_label.clone(),
                percentile: row.usd_percentile_rank,
                usd,
                min_usd: row.min_total_usd,
                max_usd: row.max_total_usd,
            };
            card_curve_points.push(point.clone());
            curve_rows.push(point);
        }

        let is_primary = cohort.name == primary_name;
        cards.push(ScenarioCard {
            title,
            subtitle,
            payout_text: format!("≈ ${}", format_whole(scenario_result.usd_value)),
            tokens_text: format!(
                "{} {} per wallet · {:.0}% share",
                format_whole(scenario_result.tokens_per_wallet),
                token_symbol,
                featured_share
            ),
            wallets_text,
            band_text,
            is_primary,
            cohort_size: scenario_cohort_size,
            usd_value: scenario_result.usd_value,
            tokens_value: scenario_result.tokens_per_wallet,
            full_label: full_label.clone(),
            curve_points: card_curve_points,
            highlight_mid: band_mid,
            highlight_usd: (total_usd_snapshot > 0.0).then_some(total_usd_snapshot),
        });

        if is_primary {
            primary_result = Some(scenario_result);
            primary_cohort_wallets = scenario_cohort_size;
            primary_label = full_label;
        }
    }

    let primary_result = match primary_result {
        Some(result) => result,
        None => compute_scenario(&ScenarioParams {
            total_supply,
            og_pool_pct,
            fdv_billion,
            cohort_size,
            tier_pct,
            share_pct: featured_share,
        })?,
    };

    let primary_wallets_in_tier = wallets_in_tier(primary_cohort_wallets, tier_pct);
    let og_pool_tokens = total_supply as f64 * (og_pool_pct / 100.0);

    let steps = vec![
        RevealStep {
            title: "Token price".to_string(),
            detail: format!(
                "FDV ${}B / {} {} = ${} per token",
                format_whole(fdv_billion),
                group_thousands(total_supply),
                token_symbol,
                format_price(price)
            ),
        },
        RevealStep {
            title: "OG pool allocation".to_string(),
            detail: format!(
                "{}% of supply reserved for OGs → {} {} available to distribute",
                og_pool_pct,
                format_whole(og_pool_tokens),
                token_symbol
            ),
        },
        RevealStep {
            title: "Tier sizing".to_string(),
            detail: format!(
                "{} equates to roughly {} wallets competing",
                format_percentile_option(tier_pct),
                group_thousands(primary_wallets_in_tier)
            ),
        },
        RevealStep {
            title: "Tier share assumption".to_string(),
            detail: format!(
                "Using a {}% slice of the OG pool for your tier gives {} {} each",
                featured_share,
                format_whole(primary_result.tokens_per_wallet),
                token_symbol
            ),
        },
        RevealStep {
            title: "Estimated payout".to_string(),
            detail: format!(
                "At ${}/{} that works out to ≈ ${}",
                format_price(price),
                token_symbol,
                format_whole(primary_result.usd_value)
            ),
        },
    ];

    let base_params = ScenarioParams {
        total_supply,
        og_pool_pct,
        fdv_billion,
        cohort_size,
        tier_pct,
        share_pct: featured_share,
    };
    let share_table = build_share_table(&share_options, &base_params)?;
    let heatmap = build_heatmap_data(&share_options, &fdv_sensitivity, &base_params)?;

    let snapshot = ScenarioSnapshot {
        token_price: price,
        wallets_in_tier: primary_wallets_in_tier,
        og_pool_tokens,
        featured_share,
        tier_pct,
        share_table,
        heatmap,
        steps,
    };

    let signature = ScenarioSignature {
        og_pool_pct,
        fdv_billion,
        cohort_size,
        tier_pct,
        share_options,
        fdv_sensitivity,
    };

    Ok(ScenarioContext {
        cards,
        bands,
        curve_rows,
        snapshot,
        primary_result,
        primary_label,
        primary_cohort_wallets,
        signature,
        featured_share,
        token_price: price,
        total_usd_snapshot,
    })
}
