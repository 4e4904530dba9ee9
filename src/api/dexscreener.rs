/// DexScreener market data client
///
/// Fetches price / market cap / 24h volume for a single mint. Notification
/// enrichment only: every failure here degrades to a plain notification,
/// never to a dropped one.
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::logger::{self, LogTag};

const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Market snapshot for one token
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    pub price_usd: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_h24: Option<f64>,
}

pub struct DexScreenerClient {
    client: Client,
    timeout: Duration,
}

impl DexScreenerClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Fetch market data for one mint
    ///
    /// Returns `Ok(None)` when DexScreener has no pair for the mint.
    pub async fn fetch_market_data(&self, mint: &str) -> Result<Option<MarketData>, String> {
        let url = format!("{}/latest/dex/tokens/{}", DEXSCREENER_BASE_URL, mint);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("DexScreener API error {}: {}", status, error_text));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        let Some(pair) = json["pairs"].as_array().and_then(|pairs| pairs.first()) else {
            logger::debug(LogTag::Market, &format!("No pairs listed for {}", mint));
            return Ok(None);
        };

        Ok(Some(MarketData {
            price_usd: pair["priceUsd"].as_str().and_then(|p| p.parse().ok()),
            market_cap: pair["marketCap"].as_f64().or_else(|| pair["fdv"].as_f64()),
            volume_h24: pair["volume"]["h24"].as_f64(),
        }))
    }
}

impl Default for DexScreenerClient {
    fn default() -> Self {
        Self::new()
    }
}
