use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Retry configuration for wallet-report API calls.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

fn delay_for_attempt(config: &RetryConfig, attempt: u32) -> Duration {
    let delay_ms =
        config.base_delay.as_millis() as f64 * config.backoff_multiplier.powi((attempt - 1) as i32);
    Duration::from_millis(delay_ms as u64).min(config.max_delay)
}

/// Retry an operation with exponential backoff.
pub async fn retry_with_backoff<F, T, Fut, E>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    let mut last_error = None;

    for attempt in 1..=config.max_attempts {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    info!("Operation {} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                warn!("Operation {} failed on attempt {}: {}", operation_name, attempt, e);
                last_error = Some(e);

                if attempt < config.max_attempts {
                    sleep(delay_for_attempt(config, attempt)).await;
                }
            }
        }
    }

    error!(
        "Operation {} failed after {} attempts",
        operation_name, config.max_attempts
    );
    Err(last_error.unwrap())
}
