/// Helius webhook-configuration client
///
/// The only call this service needs is the webhook edit: a replace-all PUT
/// of the watched-address set. The response body is not interpreted beyond
/// success or failure.
use std::time::Duration;

use reqwest::Client;
use serde_json::json;

use crate::config::with_config;
use crate::logger::{self, LogTag};

const HELIUS_BASE_URL: &str = "https://api.helius.xyz";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HeliusClient {
    client: Client,
    api_key: String,
    webhook_id: String,
    webhook_url: String,
}

impl HeliusClient {
    pub fn new(api_key: &str, webhook_id: &str, webhook_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            webhook_id: webhook_id.to_string(),
            webhook_url: webhook_url.to_string(),
        }
    }

    /// Build a client from the global config
    ///
    /// Returns `None` when credentials are missing so callers can skip the
    /// sync instead of sending doomed requests.
    pub fn from_config() -> Option<Self> {
        let helius = with_config(|c| c.helius.clone());
        if helius.api_key.is_empty() || helius.webhook_id.is_empty() {
            return None;
        }
        Some(Self::new(
            &helius.api_key,
            &helius.webhook_id,
            &helius.webhook_url,
        ))
    }

    /// Replace the webhook's watched-address set wholesale
    ///
    /// No delta updates: the full current set is pushed every time, so a
    /// missed push is healed by the next successful one.
    pub async fn replace_webhook_addresses(&self, addresses: &[String]) -> Result<(), String> {
        let url = format!(
            "{}/v0/webhooks/{}?api-key={}",
            HELIUS_BASE_URL, self.webhook_id, self.api_key
        );

        let body = json!({
            "webhookURL": self.webhook_url,
            "transactionTypes": ["SWAP"],
            "accountAddresses": addresses,
            "webhookType": "enhanced",
        });

        let response = self
            .client
            .put(&url)
            .timeout(DEFAULT_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Webhook edit request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("Webhook edit rejected ({}): {}", status, error_text));
        }

        logger::debug(
            LogTag::Allowlist,
            &format!("Webhook now watching {} addresses", addresses.len()),
        );

        Ok(())
    }
}
