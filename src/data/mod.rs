pub mod loader;
pub mod resilience;
pub mod wallet;

pub use loader::DistributionLoader;
pub use resilience::{retry_with_backoff, RetryConfig};
pub use wallet::{DuneClient, WalletReportClient};
