use std::io::Write;
use std::sync::Arc;

use serde_json::json;
use tempfile::NamedTempFile;

use airdrop_projector::{
    config::Settings,
    data::DistributionLoader,
    models::{ScenarioParams, SessionContext, WalletReport},
    scenario::{
        build_scenario_context, build_slider_defaults, compute_scenario,
        generate_percentile_options, ScenarioContextRequest,
    },
};

fn write_snapshot(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Two cohorts: the primary covers [0, 100] USD with 100k wallets, the
/// second has double the population. The second file uses the wrapped
/// `result.rows` payload shape.
fn two_cohort_settings() -> (Settings, NamedTempFile, NamedTempFile) {
    let primary = write_snapshot(
        r#"[
            {"wallet_count": 60000, "min_total_usd": 0, "max_total_usd": 25, "usd_percentile_rank": 1},
            {"wallet_count": 25000, "min_total_usd": 25, "max_total_usd": 50, "usd_percentile_rank": 2},
            {"wallet_count": 10000, "min_total_usd": 50, "max_total_usd": 75, "usd_percentile_rank": 3},
            {"wallet_count": 5000, "min_total_usd": 75, "max_total_usd": 100, "usd_percentile_rank": 4}
        ]"#,
    );
    let secondary = write_snapshot(
        r#"{"result": {"rows": [
            {"wallet_count": 150000, "min_total_usd": 0, "max_total_usd": 50, "usd_percentile_rank": 1},
            {"wallet_count": 50000, "min_total_usd": 50, "max_total_usd": 100, "usd_percentile_rank": 2}
        ]}}"#,
    );

    let mut settings = Settings::default();
    settings.cohorts.truncate(2);
    settings.cohorts[0].path = primary.path().to_path_buf();
    settings.cohorts[1].path = secondary.path().to_path_buf();

    (settings, primary, secondary)
}

#[test]
fn test_full_projection_pipeline() {
    let (settings, _primary, _secondary) = two_cohort_settings();

    let loader = DistributionLoader::new();
    let cohorts = loader.load_cohorts(&settings).unwrap();
    assert_eq!(cohorts.len(), 2);
    assert_eq!(cohorts[0].estimate, 100_000);
    assert_eq!(cohorts[1].estimate, 200_000);

    let report = WalletReport::from_rows(vec![json!({
        "section": "summary",
        "total_usd": 60.0,
    })]);

    let context = build_scenario_context(ScenarioContextRequest {
        cohorts: &cohorts,
        primary_name: &cohorts[0].name,
        cohort_size: 100_000,
        tier_pct: 10.0,
        og_pool_pct: 15.0,
        fdv_billion: 4.0,
        share_options: vec![20.0, 30.0, 40.0],
        fdv_sensitivity: vec![3.0, 4.0, 5.0],
        wallet_report: Some(&report),
        total_supply: settings.token.total_supply,
        token_symbol: &settings.token.symbol,
    })
    .unwrap();

    // Headline figures for the primary cohort
    assert_eq!(context.token_price, 4.0);
    assert_eq!(context.primary_result.tokens_per_wallet, 3000.0);
    assert_eq!(context.primary_result.usd_value, 12_000.0);
    assert_eq!(context.primary_cohort_wallets, 100_000);
    assert_eq!(context.snapshot.wallets_in_tier, 10_000);
    assert_eq!(context.snapshot.og_pool_tokens, 150_000_000.0);

    // The second cohort models twice the wallets, so half the payout
    let secondary_card = context.cards.iter().find(|card| !card.is_primary).unwrap();
    assert_eq!(secondary_card.cohort_size, 200_000);
    assert_eq!(secondary_card.usd_value, 6000.0);

    // A $60 wallet sits in the primary's third bucket: ranks 85k..95k
    let primary_band = &context.bands[&cohorts[0].name];
    assert_eq!(primary_band.start, Some(85.0));
    assert_eq!(primary_band.end, Some(95.0));

    // And in the secondary's second bucket: ranks 150k..200k of 200k
    let secondary_band = &context.bands[&cohorts[1].name];
    assert_eq!(secondary_band.start, Some(75.0));
    assert_eq!(secondary_band.end, Some(100.0));

    // Curve rows cover every usable bucket of both cohorts
    assert_eq!(context.curve_rows.len(), 6);

    // Tables follow the requested orderings
    assert_eq!(context.snapshot.share_table.len(), 3);
    assert_eq!(context.snapshot.share_table[0].share_pct, 20.0);
    assert_eq!(context.snapshot.heatmap.len(), 9);
    assert_eq!(context.snapshot.heatmap[0].fdv_billion, 3.0);
}

#[test]
fn test_session_snapping_and_reveal_flow() {
    let (settings, _primary, _secondary) = two_cohort_settings();

    let loader = DistributionLoader::new();
    let cohorts = loader.load_cohorts(&settings).unwrap();

    let (slider_options, slider_mid) =
        build_slider_defaults(&settings.sliders, cohorts[0].estimate);
    assert_eq!(slider_mid, 100_000);

    let mut session = SessionContext {
        cohort_size: 101_234,
        tier_pct: 11.0,
        ..SessionContext::default()
    };
    session.snap_to_options(&slider_options, &generate_percentile_options());
    assert!(slider_options.contains(&session.cohort_size));
    assert_eq!(session.tier_pct, 10.0);

    let context = build_scenario_context(ScenarioContextRequest {
        cohorts: &cohorts,
        primary_name: &cohorts[0].name,
        cohort_size: session.cohort_size,
        tier_pct: session.tier_pct,
        og_pool_pct: session.og_pool_pct,
        fdv_billion: session.fdv_billion,
        share_options: vec![25.0],
        fdv_sensitivity: vec![4.0],
        wallet_report: None,
        total_supply: settings.token.total_supply,
        token_symbol: &settings.token.symbol,
    })
    .unwrap();

    assert!(session.is_stale(&context.signature));
    session.mark_revealed(context.signature.clone());
    assert!(!session.is_stale(&context.signature));

    // Same inputs, same signature: nothing to re-reveal
    let again = build_scenario_context(ScenarioContextRequest {
        cohorts: &cohorts,
        primary_name: &cohorts[0].name,
        cohort_size: session.cohort_size,
        tier_pct: session.tier_pct,
        og_pool_pct: session.og_pool_pct,
        fdv_billion: session.fdv_billion,
        share_options: vec![25.0],
        fdv_sensitivity: vec![4.0],
        wallet_report: None,
        total_supply: settings.token.total_supply,
        token_symbol: &settings.token.symbol,
    })
    .unwrap();
    assert!(!session.is_stale(&again.signature));
}

#[test]
fn test_loader_reuses_parse_until_file_changes() {
    let (settings, mut primary, _secondary) = two_cohort_settings();

    let loader = DistributionLoader::new();
    let first = loader.load(&settings.cohorts[0].path).unwrap();
    let second = loader.load(&settings.cohorts[0].path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // Appending whitespace keeps the JSON valid and bumps the mtime
    std::thread::sleep(std::time::Duration::from_millis(20));
    primary
        .write_all(b" ")
        .and_then(|_| primary.flush())
        .unwrap();

    let third = loader.load(&settings.cohorts[0].path).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(first.len(), third.len());
}

#[test]
fn test_reference_scenario_matches_hand_arithmetic() {
    let result = compute_scenario(&ScenarioParams {
        total_supply: 1_000_000_000,
        og_pool_pct: 15.0,
        fdv_billion: 4.0,
        cohort_size: 100_000,
        tier_pct: 10.0,
        share_pct: 20.0,
    })
    .unwrap();

    assert_eq!(result.tokens_per_wallet, 3000.0);
    assert_eq!(result.usd_value, 12_000.0);
}
