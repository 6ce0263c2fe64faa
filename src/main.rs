use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use airdrop_projector::{
    config::Settings,
    data::{DistributionLoader, DuneClient, WalletReportClient},
    models::{SessionContext, WalletReport},
    scenario::{
        build_scenario_context, build_slider_defaults, determine_percentile_band,
        format_percentile_option, generate_percentile_options, normalize_fdv_sensitivity,
        ScenarioContextRequest,
    },
    utils::{format_price, format_whole, group_thousands},
};

#[derive(Parser)]
#[clap(name = "airdrop-projector")]
#[clap(about = "Project hypothetical airdrop payouts from wallet-activity percentiles", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full multi-cohort projection
    Estimate {
        /// Primary cohort (name or slug); defaults to the first configured cohort
        #[clap(long)]
        cohort: Option<String>,

        /// OG/community allocation percentage
        #[clap(long)]
        og_pool_pct: Option<f64>,

        /// Launch fully diluted valuation in billions
        #[clap(long)]
        fdv_billion: Option<f64>,

        /// Assumed OG cohort size in wallets
        #[clap(long)]
        cohort_size: Option<u64>,

        /// Percentile tier you believe you sit in
        #[clap(long)]
        tier_pct: Option<f64>,

        /// Tier share percentages to compare; the first powers the featured scenario
        #[clap(long = "share")]
        share_options: Vec<f64>,

        /// Extra FDV points for the sensitivity grid
        #[clap(long = "fdv-point")]
        fdv_sensitivity: Vec<f64>,

        /// Wallet address to place within the cohort distributions
        #[clap(long)]
        wallet: Option<String>,
    },

    /// Locate a USD volume within one cohort's distribution
    Band {
        /// Cohort name or slug; defaults to the first configured cohort
        #[clap(long)]
        cohort: Option<String>,

        /// Lifetime USD volume to place
        #[clap(long)]
        total_usd: f64,

        /// Assumed cohort size in wallets
        #[clap(long)]
        cohort_size: Option<u64>,
    },

    /// List configured cohorts and their estimated sizes
    Cohorts,

    /// Print the generated slider option sets
    Options,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let settings = Settings::new().unwrap_or_else(|_| {
        info!("Using default settings");
        Settings::default()
    });

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    match cli.command {
        Commands::Estimate {
            cohort,
            og_pool_pct,
            fdv_billion,
            cohort_size,
            tier_pct,
            share_options,
            fdv_sensitivity,
            wallet,
        } => {
            let loader = DistributionLoader::new();
            let cohorts = loader.load_cohorts(&settings)?;

            let primary_name = resolve_cohort_name(&settings, cohort.as_deref())?;
            let primary_estimate = cohorts
                .iter()
                .find(|c| c.name == primary_name)
                .map(|c| c.estimate)
                .unwrap_or(0);

            let (slider_options, slider_mid) =
                build_slider_defaults(&settings.sliders, primary_estimate);

            let defaults = &settings.defaults;
            let mut session = SessionContext {
                og_pool_pct: og_pool_pct.unwrap_or(defaults.og_pool_pct),
                fdv_billion: fdv_billion.unwrap_or(defaults.fdv_billion),
                cohort_size: cohort_size.unwrap_or(slider_mid),
                tier_pct: tier_pct.unwrap_or(defaults.tier_pct),
                ..SessionContext::default()
            };
            session.snap_to_options(&slider_options, &generate_percentile_options());

            let wallet_report: Option<WalletReport> = match wallet {
                Some(address) => {
                    let client = DuneClient::new(settings.wallet_api.clone())?;
                    match client.fetch_report(&address).await {
                        Ok(report) => Some(report),
                        Err(e) => {
                            warn!("Failed to fetch wallet report for {}: {}", address, e);
                            None
                        }
                    }
                }
                None => None,
            };

            let share_options = if share_options.is_empty() {
                defaults.share_options.clone()
            } else {
                share_options
            };
            let fdv_sensitivity = normalize_fdv_sensitivity(
                session.fdv_billion,
                if fdv_sensitivity.is_empty() {
                    defaults.fdv_sensitivity.clone()
                } else {
                    fdv_sensitivity
                },
            );

            let context = build_scenario_context(ScenarioContextRequest {
                cohorts: &cohorts,
                primary_name: &primary_name,
                cohort_size: session.cohort_size,
                tier_pct: session.tier_pct,
                og_pool_pct: session.og_pool_pct,
                fdv_billion: session.fdv_billion,
                share_options,
                fdv_sensitivity,
                wallet_report: wallet_report.as_ref(),
                total_supply: settings.token.total_supply,
                token_symbol: &settings.token.symbol,
            })?;
            session.mark_revealed(context.signature.clone());

            println!("\n=== Airdrop Projection: {} ===", context.primary_label);
            println!(
                "Estimated payout: ≈ ${} ({} {} at ${} per token)",
                format_whole(context.primary_result.usd_value),
                format_whole(context.primary_result.tokens_per_wallet),
                settings.token.symbol,
                format_price(context.token_price)
            );
            println!(
                "Wallets modelled: {} · {} in tier",
                group_thousands(context.primary_cohort_wallets),
                group_thousands(context.snapshot.wallets_in_tier)
            );

            println!("\nHow it adds up:");
            for step in &context.snapshot.steps {
                println!("  {}: {}", step.title, step.detail);
            }

            println!("\nTier share comparison:");
            for row in &context.snapshot.share_table {
                println!(
                    "  {:>5}% share → {} {} ≈ ${}",
                    row.share_pct,
                    format_whole(row.tokens_per_wallet),
                    settings.token.symbol,
                    format_whole(row.usd_value)
                );
            }

            println!("\nCohort comparison:");
            for card in &context.cards {
                let marker = if card.is_primary { "*" } else { " " };
                println!("  {}{}: {}", marker, card.full_label, card.payout_text);
                println!("     {}", card.tokens_text);
                println!("     {}", card.wallets_text);
                if let Some(band_text) = &card.band_text {
                    println!("     {}", band_text);
                }
            }

            if wallet_report.is_some() && context.bands.values().all(|band| band.start.is_none()) {
                println!("\nNo percentile band matched; try a larger cohort size.");
            }
        }

        Commands::Band {
            cohort,
            total_usd,
            cohort_size,
        } => {
            let name = resolve_cohort_name(&settings, cohort.as_deref())?;
            let config = settings
                .find_cohort(&name)
                .ok_or_else(|| anyhow::anyhow!("Unknown cohort: {}", name))?;

            let loader = DistributionLoader::new();
            let distribution = loader.load(&config.path)?;
            let cohort_size = cohort_size.unwrap_or(settings.defaults.cohort_size);

            match determine_percentile_band(total_usd, &distribution, cohort_size) {
                Some(band) => {
                    let (top_start, top_end) = band.top_percentiles();
                    println!("\n=== Percentile Band: {} ===", config.name);
                    println!(
                        "Volume ${} places the wallet at {:.1}% – {:.1}% from the bottom",
                        format_whole(total_usd),
                        band.start_percentile,
                        band.end_percentile
                    );
                    println!("Equivalent: Top {:.1}% – {:.1}%", top_start, top_end);
                    println!(
                        "Bucket {} holds {} wallets ({} counted, {} ranked before)",
                        band.bucket_index,
                        group_thousands(band.band_wallets_full),
                        group_thousands(band.band_wallets),
                        group_thousands(band.wallets_before)
                    );
                }
                None => {
                    println!(
                        "\nNo band found for ${} in {} at cohort size {}.",
                        format_whole(total_usd),
                        config.name,
                        group_thousands(cohort_size)
                    );
                    println!("The wallet falls outside the modeled population; try a larger cohort size.");
                }
            }
        }

        Commands::Cohorts => {
            let loader = DistributionLoader::new();
            let cohorts = loader.load_cohorts(&settings)?;

            println!("\n=== Configured Cohorts ===");
            for cohort in &cohorts {
                println!("{} [{}]", cohort.name, cohort.config.slug);
                println!("  {}", cohort.config.description);
                println!(
                    "  {} buckets, est. {} wallets ({})",
                    cohort.distribution.len(),
                    group_thousands(cohort.estimate),
                    cohort.config.path.display()
                );
            }
        }

        Commands::Options => {
            let loader = DistributionLoader::new();
            let cohorts = loader.load_cohorts(&settings)?;
            let estimate = cohorts.first().map(|c| c.estimate).unwrap_or(0);

            let (cohort_options, mid) = build_slider_defaults(&settings.sliders, estimate);
            println!("\n=== Cohort Size Options ===");
            println!(
                "{} values from {} to {}, anchored at {}",
                cohort_options.len(),
                group_thousands(*cohort_options.first().unwrap_or(&0)),
                group_thousands(*cohort_options.last().unwrap_or(&0)),
                group_thousands(mid)
            );

            println!("\n=== Percentile Tiers ===");
            let tiers: Vec<String> = generate_percentile_options()
                .into_iter()
                .map(format_percentile_option)
                .collect();
            println!("{}", tiers.join(", "));
        }
    }

    Ok(())
}

fn resolve_cohort_name(settings: &Settings, key: Option<&str>) -> anyhow::Result<String> {
    match key {
        Some(key) => settings
            .find_cohort(key)
            .map(|cohort| cohort.name.clone())
            .ok_or_else(|| anyhow::anyhow!("Unknown cohort: {}", key)),
        None => settings
            .cohorts
            .first()
            .map(|cohort| cohort.name.clone())
            .ok_or_else(|| anyhow::anyhow!("No cohorts configured")),
    }
}
