pub mod config;
pub mod data;
pub mod models;
pub mod scenario;
pub mod utils;

pub use config::Settings;
pub use models::{
    Distribution, DistributionBucket, PercentileBand, ProjectorError, Result, ScenarioContext,
    ScenarioParams, ScenarioResult, SessionContext, WalletReport,
};
pub use scenario::{build_scenario_context, compute_scenario, determine_percentile_band};
