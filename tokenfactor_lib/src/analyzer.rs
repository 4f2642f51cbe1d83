//! Top-level analysis pipeline: fetch, compute, score.

use serde::Serialize;
use tokenfactor_api::{Client, DEFAULT_LOOKBACK_DAYS};

use crate::completion::CompletionClient;
use crate::error::AnalysisError;
use crate::stats::{calculate_moving_average, calculate_price_change_percentage};

/// Descriptive statistics plus the model-produced price factor for one token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub moving_average_7_day: f64,
    pub moving_average_30_day: f64,
    pub price_change_percentage: f64,
    pub price_factor: f64,
}

impl AnalysisResult {
    /// The fixed result returned when any pipeline stage fails.
    ///
    /// `default_change` is a literal zero, so the 1.5 arm never runs and the
    /// fallback factor is always 0.5. This matches the recorded behavior of
    /// the system; changing the branch changes observable results for failed
    /// analyses and needs product sign-off first.
    fn degraded() -> Self {
        let default_change = 0.0;
        let price_factor = if default_change > 0.0 { 1.5 } else { 0.5 };
        Self {
            moving_average_7_day: 0.0,
            moving_average_30_day: 0.0,
            price_change_percentage: default_change,
            price_factor,
        }
    }
}

/// Composes the three pipeline stages over injected clients, so tests can
/// point both at mock servers. Holds no state across calls; concurrent
/// analyses for different tokens need no coordination.
pub struct PriceAnalyzer {
    market: Client,
    completion: CompletionClient,
}

impl PriceAnalyzer {
    pub fn new(market: Client, completion: CompletionClient) -> Self {
        Self { market, completion }
    }

    /// Runs fetch -> statistics -> scoring for `token_id`, strictly in order.
    ///
    /// Never returns an error: any stage failure is logged with its kind and
    /// collapsed into the fixed degraded result. No partial results survive;
    /// a percentage-change failure discards already-computed moving averages.
    pub async fn analyze_token_price(&self, token_id: &str) -> AnalysisResult {
        match self.run_pipeline(token_id).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    "Analysis for {} fell back to the default result: {}",
                    token_id,
                    e
                );
                AnalysisResult::degraded()
            }
        }
    }

    async fn run_pipeline(&self, token_id: &str) -> Result<AnalysisResult, AnalysisError> {
        let prices = self
            .market
            .fetch_historical_prices(token_id, DEFAULT_LOOKBACK_DAYS)
            .await?;
        let moving_average_7_day = calculate_moving_average(&prices, 7)?;
        let moving_average_30_day = calculate_moving_average(&prices, 30)?;
        let price_change_percentage = calculate_price_change_percentage(&prices)?;
        let price_factor = self
            .completion
            .score_price_factor(
                token_id,
                moving_average_7_day,
                moving_average_30_day,
                price_change_percentage,
            )
            .await?;
        Ok(AnalysisResult {
            moving_average_7_day,
            moving_average_30_day,
            price_change_percentage,
            price_factor,
        })
    }
}
