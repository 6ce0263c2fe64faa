pub mod band;
pub mod calculator;
pub mod context;
pub mod sliders;

pub use band::determine_percentile_band;
pub use calculator::{
    build_heatmap_data, build_share_table, compute_scenario, token_price, wallets_in_tier,
};
pub use context::{build_scenario_context, normalize_fdv_sensitivity, ScenarioContextRequest};
pub use sliders::{
    build_slider_defaults, format_percentile_option, generate_cohort_slider_options,
    generate_percentile_options, round_to_step, round_up_to_step, snap_value_to_options,
};
