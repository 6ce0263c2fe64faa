use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::WalletApiSettings;
use crate::data::resilience::{retry_with_backoff, RetryConfig};
use crate::models::{ProjectorError, Result, WalletReport};

/// Source of per-wallet trade-history reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletReportClient: Send + Sync {
    async fn fetch_report(&self, address: &str) -> Result<WalletReport>;
}

/// Wallet-report client backed by a saved Dune Analytics query: start an
/// execution for the address, poll for results, then partition the rows.
pub struct DuneClient {
    http: Client,
    config: WalletApiSettings,
    retry: RetryConfig,
}

impl DuneClient {
    pub fn new(config: WalletApiSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            config,
            retry: RetryConfig::default(),
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProjectorError::ConfigError("wallet API key not configured".to_string()))
    }

    async fn start_execution(&self, address: &str) -> Result<String> {
        let key = self.api_key()?;
        let url = format!(
            "{}/query/{}/execute",
            self.config.base_url, self.config.query_id
        );
        let body = json!({ "query_parameters": { "wallet": address } });

        let response = retry_with_backoff(&self.retry, "wallet report execute", || {
            let request = self
                .http
                .post(&url)
                .header("X-Dune-API-Key", key)
                .json(&body);
            async move {
                request
                    .send()
                    .await?
                    .error_for_status()
                    .map_err(ProjectorError::from)
            }
        })
        .await?;

        let payload: Value = response.json().await?;
        payload
            .get("execution_id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ProjectorError::WalletApi {
                message: "execution did not start".to_string(),
            })
    }

    async fn poll_results(&self, execution_id: &str) -> Result<Vec<Value>> {
        let key = self.api_key()?;
        let url = format!("{}/execution/{}/results", self.config.base_url, execution_id);

        for attempt in 1..=self.config.poll_attempts {
            let response = self
                .http
                .get(&url)
                .header("X-Dune-API-Key", key)
                .send()
                .await?
                .error_for_status()?;
            let payload: Value = response.json().await?;

            match payload.get("state").and_then(Value::as_str) {
                Some("QUERY_STATE_COMPLETED") => {
                    let rows = payload
                        .get("result")
                        .and_then(|result| result.get("rows"))
                        .and_then(Value::as_array)
                        .cloned()
                        .unwrap_or_default();
                    info!("Wallet report ready after {} poll(s)", attempt);
                    return Ok(rows);
                }
                Some("QUERY_STATE_FAILED") | Some("QUERY_STATE_CANCELLED") => {
                    let message = payload
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("execution failed")
                        .to_string();
                    return Err(ProjectorError::WalletApi { message });
                }
                _ => sleep(Duration::from_secs(self.config.poll_interval_seconds)).await,
            }
        }

        Err(ProjectorError::WalletApi {
            message: "timed out waiting for wallet report".to_string(),
        })
    }
}

#[async_trait]
impl WalletReportClient for DuneClient {
    async fn fetch_report(&self, address: &str) -> Result<WalletReport> {
        info!("Fetching wallet report for {}", address);

        let execution_id = self.start_execution(address).await?;
        let rows = self.poll_results(&execution_id).await?;
        if rows.is_empty() {
            warn!("Wallet report for {} returned no rows", address);
        }

        Ok(WalletReport::from_rows(rows))
    }
}
