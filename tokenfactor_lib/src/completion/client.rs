//! HTTP client for the chat-completion endpoint that scores price momentum.

use std::time::Duration;

use super::error::CompletionError;
use super::types::{ChatMessage, ChatRequest, ChatResponse, FactorReply, ResponseFormat};

/// Request timeout for completion calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Model used for scoring.
const COMPLETION_MODEL: &str = "gpt-4o-mini";

/// Scoring rubric sent as the system message. The model maps the day-over-day
/// price change onto a continuous score in [0, 2] with 1.0 as the neutral
/// point, and replies with only a `priceFactor` JSON object.
const SCORING_RUBRIC: &str = "You are a cryptocurrency price analyst. Given recent price \
statistics for a token, respond with a single price factor between 0 and 2 that summarizes \
its recent momentum. Use 1.0 for no change. Map the day-over-day price change percentage \
onto the scale continuously: compress toward 0 for large drops and toward 2 for large gains, \
keeping small changes near 1.0. Respond only with a JSON object of the form \
{\"priceFactor\": <number>} and nothing else.";

/// Chat-completion client for the scoring provider.
pub struct CompletionClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl CompletionClient {
    /// Creates a new client pointing at the production completion API.
    pub fn new(api_key: String) -> Result<Self, CompletionError> {
        Self::with_base_url("https://api.openai.com", api_key)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: String) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.to_string(),
        })
    }

    /// Submits the computed statistics for `token_id` and returns the
    /// model's price factor.
    ///
    /// Returns `Err(CompletionError::EmptyCompletion)` when the provider
    /// answers with no choices or null content, and
    /// `Err(CompletionError::ParseFailed)` when the content is not the
    /// requested `priceFactor` object.
    pub async fn score_price_factor(
        &self,
        token_id: &str,
        moving_average_7_day: f64,
        moving_average_30_day: f64,
        price_change_percentage: f64,
    ) -> Result<f64, CompletionError> {
        let request = ChatRequest {
            model: COMPLETION_MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SCORING_RUBRIC.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format_stats_prompt(
                        token_id,
                        moving_average_7_day,
                        moving_average_30_day,
                        price_change_percentage,
                    ),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CompletionError::InvalidApiKey);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(CompletionError::HttpStatus {
                status: status.as_u16(),
                body: if body.len() > 500 {
                    body[..500].to_string()
                } else {
                    body
                },
            });
        }

        let reply: ChatResponse = response.json().await.map_err(|e| {
            CompletionError::ParseFailed(format!("failed to deserialize response: {}", e))
        })?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(CompletionError::EmptyCompletion)?;

        let factor: FactorReply = serde_json::from_str(&content).map_err(|e| {
            CompletionError::ParseFailed(format!(
                "reply was not a priceFactor object: {} | content: {}",
                e, content
            ))
        })?;

        Ok(factor.price_factor)
    }
}

/// Formats the user message embedding the statistics: prices at 4 decimal
/// places, the percentage at 2.
fn format_stats_prompt(
    token_id: &str,
    moving_average_7_day: f64,
    moving_average_30_day: f64,
    price_change_percentage: f64,
) -> String {
    format!(
        "Analyze the recent price statistics for {}:\n\
         7-day moving average: ${:.4}\n\
         30-day moving average: ${:.4}\n\
         Day-over-day price change: {:.2}%",
        token_id, moving_average_7_day, moving_average_30_day, price_change_percentage
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_reply(content: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": content
                }
            }]
        })
    }

    #[tokio::test]
    async fn success_returns_price_factor() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "response_format": { "type": "json_object" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_reply(
                serde_json::Value::String("{\"priceFactor\": 1.25}".to_string()),
            )))
            .mount(&server)
            .await;

        let client =
            CompletionClient::with_base_url(&server.uri(), "test-key".to_string()).unwrap();
        let factor = client
            .score_price_factor("bitcoin", 67000.1234, 65000.5678, 2.5)
            .await
            .unwrap();

        assert_eq!(factor, 1.25);
    }

    #[tokio::test]
    async fn null_content_is_empty_completion() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_reply(serde_json::Value::Null)),
            )
            .mount(&server)
            .await;

        let client =
            CompletionClient::with_base_url(&server.uri(), "test-key".to_string()).unwrap();
        let result = client.score_price_factor("bitcoin", 1.0, 1.0, 0.0).await;

        assert!(matches!(
            result.unwrap_err(),
            CompletionError::EmptyCompletion
        ));
    }

    #[tokio::test]
    async fn no_choices_is_empty_completion() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let client =
            CompletionClient::with_base_url(&server.uri(), "test-key".to_string()).unwrap();
        let result = client.score_price_factor("bitcoin", 1.0, 1.0, 0.0).await;

        assert!(matches!(
            result.unwrap_err(),
            CompletionError::EmptyCompletion
        ));
    }

    #[tokio::test]
    async fn missing_price_factor_field_is_parse_failed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_reply(
                serde_json::Value::String("{\"score\": 1.0}".to_string()),
            )))
            .mount(&server)
            .await;

        let client =
            CompletionClient::with_base_url(&server.uri(), "test-key".to_string()).unwrap();
        let result = client.score_price_factor("bitcoin", 1.0, 1.0, 0.0).await;

        assert!(matches!(
            result.unwrap_err(),
            CompletionError::ParseFailed(_)
        ));
    }

    #[tokio::test]
    async fn unauthorized_is_invalid_api_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let client =
            CompletionClient::with_base_url(&server.uri(), "bad-key".to_string()).unwrap();
        let result = client.score_price_factor("bitcoin", 1.0, 1.0, 0.0).await;

        assert!(matches!(
            result.unwrap_err(),
            CompletionError::InvalidApiKey
        ));
    }

    #[test]
    fn prompt_formats_prices_to_4_decimals_and_change_to_2() {
        let prompt = format_stats_prompt("bitcoin", 100.5, 95.25, 5.5);
        assert_eq!(
            prompt,
            "Analyze the recent price statistics for bitcoin:\n\
             7-day moving average: $100.5000\n\
             30-day moving average: $95.2500\n\
             Day-over-day price change: 5.50%"
        );
    }

    #[test]
    fn prompt_rounds_rather_than_truncates() {
        let prompt = format_stats_prompt("ethereum", 0.123456, 0.1, -12.346);
        assert!(prompt.contains("$0.1235"));
        assert!(prompt.contains("$0.1000"));
        assert!(prompt.contains("-12.35%"));
    }
}
