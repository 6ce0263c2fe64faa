use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub token: TokenSettings,
    pub defaults: ScenarioDefaults,
    pub sliders: SliderSettings,
    pub wallet_api: WalletApiSettings,
    pub cohorts: Vec<CohortSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSettings {
    pub symbol: String,
    pub total_supply: u64,
}

/// Starting values for the adjustable scenario inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefaults {
    pub og_pool_pct: f64,
    pub fdv_billion: f64,
    pub cohort_size: u64,
    pub tier_pct: f64,
    pub share_options: Vec<f64>,
    pub fdv_sensitivity: Vec<f64>,
}

/// Bounds and spacing for the cohort-size option generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderSettings {
    pub cohort_min: u64,
    pub cohort_mid: u64,
    pub cohort_max: u64,
    pub below_steps: usize,
    pub above_steps: usize,
    pub round_step: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletApiSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub query_id: u64,
    pub poll_attempts: u32,
    pub poll_interval_seconds: u64,
    pub timeout_seconds: u64,
}

/// One cohort definition: where its distribution snapshot lives plus the
/// labels used on cards and charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortSettings {
    pub name: String,
    pub slug: String,
    pub path: PathBuf,
    pub description: String,
    pub timeline_label: String,
    pub title: String,
    pub tagline: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Airdrop Projector".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            token: TokenSettings {
                symbol: "SEA".to_string(),
                total_supply: 1_000_000_000,
            },
            defaults: ScenarioDefaults {
                og_pool_pct: 15.0,
                fdv_billion: 4.0,
                cohort_size: 100_000,
                tier_pct: 10.0,
                share_options: vec![20.0, 30.0, 40.0],
                fdv_sensitivity: vec![3.0, 4.0, 5.0],
            },
            sliders: SliderSettings {
                cohort_min: 50_000,
                cohort_mid: 100_000,
                cohort_max: 500_000,
                below_steps: 31,
                above_steps: 30,
                round_step: 5_000,
            },
            wallet_api: WalletApiSettings {
                base_url: "https://api.dune.com/api/v1".to_string(),
                api_key: None,
                query_id: 5_850_749,
                poll_attempts: 15,
                poll_interval_seconds: 1,
                timeout_seconds: 30,
            },
            cohorts: vec![
                CohortSettings {
                    name: "Super OG (≤2021)".to_string(),
                    slug: "super_og".to_string(),
                    path: PathBuf::from("data/og_percentile_distribution_pre2022.json"),
                    description: "First trade on or before 31 Dec 2021".to_string(),
                    timeline_label: "≤2021".to_string(),
                    title: "Super OG".to_string(),
                    tagline: "Pre-2022 traders".to_string(),
                },
                CohortSettings {
                    name: "Uncle (≤2022)".to_string(),
                    slug: "unc".to_string(),
                    path: PathBuf::from("data/og_percentile_distribution_pre2023.json"),
                    description: "First trade on or before 31 Dec 2022".to_string(),
                    timeline_label: "≤2022".to_string(),
                    title: "Uncle".to_string(),
                    tagline: "First active in 2022".to_string(),
                },
                CohortSettings {
                    name: "Cousin (≤2023)".to_string(),
                    slug: "cuz".to_string(),
                    path: PathBuf::from("data/og_percentile_distribution_pre2024.json"),
                    description: "First trade on or before 31 Dec 2023".to_string(),
                    timeline_label: "≤2023".to_string(),
                    title: "Cousin".to_string(),
                    tagline: "Joined by 2023".to_string(),
                },
            ],
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("AIRDROP_PROJECTOR"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    /// Look a cohort up by display name or slug.
    pub fn find_cohort(&self, key: &str) -> Option<&CohortSettings> {
        self.cohorts
            .iter()
            .find(|cohort| cohort.name == key || cohort.slug == key)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.token.total_supply == 0 {
            return Err("Token total supply must be positive".to_string());
        }

        if self.cohorts.is_empty() {
            return Err("At least one cohort must be configured".to_string());
        }

        if !(0.0..=100.0).contains(&self.defaults.og_pool_pct) {
            return Err(format!(
                "OG pool percentage must be between 0 and 100, got {}",
                self.defaults.og_pool_pct
            ));
        }

        if self.defaults.tier_pct <= 0.0 || self.defaults.tier_pct > 100.0 {
            return Err(format!(
                "Tier percentile must be in (0, 100], got {}",
                self.defaults.tier_pct
            ));
        }

        if self.sliders.cohort_min == 0 || self.sliders.cohort_min > self.sliders.cohort_max {
            return Err("Cohort slider bounds must satisfy 0 < min <= max".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.token.total_supply, 1_000_000_000);
        assert_eq!(settings.cohorts.len(), 3);
    }

    #[test]
    fn test_find_cohort_by_name_or_slug() {
        let settings = Settings::default();

        assert!(settings.find_cohort("super_og").is_some());
        assert!(settings.find_cohort("Uncle (≤2022)").is_some());
        assert!(settings.find_cohort("nope").is_none());
    }

    #[test]
    fn test_zero_supply_rejected() {
        let mut settings = Settings::default();
        settings.token.total_supply = 0;

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_no_cohorts_rejected() {
        let mut settings = Settings::default();
        settings.cohorts.clear();

        assert!(settings.validate().is_err());
    }
}
