use crate::models::{HeatmapRow, ProjectorError, Result, ScenarioParams, ScenarioResult, ShareTableRow};

/// Token price implied by a fully diluted valuation in billions of dollars.
pub fn token_price(fdv_billion: f64, total_supply: u64) -> Result<f64> {
    if total_supply == 0 {
        return Err(ProjectorError::InvalidSupply(total_supply));
    }
    Ok(fdv_billion * 1_000_000_000.0 / total_supply as f64)
}

/// Project tokens-per-wallet and USD payout for one parameter combination.
pub fn compute_scenario(params: &ScenarioParams) -> Result<ScenarioResult> {
    let price = token_price(params.fdv_billion, params.total_supply)?;

    let og_pool_tokens = params.total_supply as f64 * (params.og_pool_pct / 100.0);
    // Fractional on purpose: the tier size is only ever used as a divisor,
    // and the max(1) guard keeps a degenerate tier from dividing by zero.
    let wallets_in_tier = (params.cohort_size as f64 * (params.tier_pct / 100.0)).max(1.0);
    let tokens_per_wallet = og_pool_tokens * (params.share_pct / 100.0) / wallets_in_tier;
    let usd_value = tokens_per_wallet * price;

    Ok(ScenarioResult {
        share_pct: params.share_pct,
        fdv_billion: params.fdv_billion,
        tokens_per_wallet,
        usd_value,
    })
}

/// Whole-wallet tier head count for display, at least one.
pub fn wallets_in_tier(cohort_size: u64, tier_pct: f64) -> u64 {
    let rounded = (cohort_size as f64 * (tier_pct / 100.0)).round_ties_even();
    rounded.max(1.0) as u64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// One row per share percentage, values rounded to two decimals for display.
/// Duplicate inputs produce duplicate rows.
pub fn build_share_table(share_pcts: &[f64], params: &ScenarioParams) -> Result<Vec<ShareTableRow>> {
    let mut rows = Vec::with_capacity(share_pcts.len());
    for &share in share_pcts {
        let result = compute_scenario(&params.with_share(share))?;
        rows.push(ShareTableRow {
            share_pct: result.share_pct,
            tokens_per_wallet: round2(result.tokens_per_wallet),
            usd_value: round2(result.usd_value),
        });
    }
    Ok(rows)
}

/// Full share x FDV cross product, share-major then FDV-minor, unrounded
/// since the grid is consumed numerically.
pub fn build_heatmap_data(
    share_options: &[f64],
    fdv_options: &[f64],
    params: &ScenarioParams,
) -> Result<Vec<HeatmapRow>> {
    let mut rows = Vec::with_capacity(share_options.len() * fdv_options.len());
    for &share in share_options {
        for &fdv in fdv_options {
            let result = compute_scenario(&params.with_share(share).with_fdv(fdv))?;
            rows.push(HeatmapRow {
                share_pct: result.share_pct,
                fdv_billion: result.fdv_billion,
                tokens_per_wallet: result.tokens_per_wallet,
                usd_value: result.usd_value,
            });
        }
    }
    Ok(rows)
}
