//! HTTP client for the CoinGecko coin-chart endpoint.

use std::time::Duration;

use chrono::DateTime;

use crate::types::{MarketChart, PricePoint};
use crate::Error;

/// Request timeout for market-data calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default lookback window, interpreted by the provider as days of history.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// HTTP client for the market-data provider. No credentials are required.
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a new client pointing at the production CoinGecko API.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url("https://api.coingecko.com")
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::FetchFailed
            })?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Fetches `days` days of USD price history for `token_id`, in the
    /// chronological order the provider returns.
    ///
    /// One outbound request per call; no retries, no caching. Every failure
    /// mode collapses to [`Error::FetchFailed`] with the cause logged.
    pub async fn fetch_historical_prices(
        &self,
        token_id: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, Error> {
        let url = format!(
            "{}/api/v3/coins/{}/market_chart",
            self.base_url, token_id
        );
        let days_str = days.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("vs_currency", "usd"), ("days", days_str.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Market-data request for {} failed: {}", token_id, e);
                Error::FetchFailed
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read market-data response body: {}", e);
            Error::FetchFailed
        })?;

        if !status.is_success() {
            tracing::error!(
                "Market-data request for {} returned {}: {}",
                token_id,
                status,
                truncate_body(&body)
            );
            return Err(Error::FetchFailed);
        }

        let chart = serde_json::from_str::<MarketChart>(&body).map_err(|e| {
            tracing::error!(
                "Failed to parse market chart: {} | body: {}",
                e,
                truncate_body(&body)
            );
            Error::FetchFailed
        })?;

        chart
            .prices
            .into_iter()
            .map(|(epoch_ms, price)| {
                let timestamp =
                    DateTime::from_timestamp_millis(epoch_ms as i64).ok_or_else(|| {
                        tracing::error!("Timestamp out of range for {}: {}", token_id, epoch_ms);
                        Error::FetchFailed
                    })?;
                Ok(PricePoint { timestamp, price })
            })
            .collect()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 500;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
