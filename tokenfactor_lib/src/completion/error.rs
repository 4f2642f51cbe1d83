//! Error types for completion-provider operations.

use thiserror::Error;

/// Errors from the completion provider.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The provider returned no choices, or a null or empty message content.
    #[error("completion service returned empty content")]
    EmptyCompletion,
    /// Bad API key (HTTP 401).
    #[error("invalid API key (HTTP 401)")]
    InvalidApiKey,
    /// The provider returned a non-success status.
    #[error("completion request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The reply was not the expected `{"priceFactor": <number>}` object.
    #[error("failed to parse completion reply: {0}")]
    ParseFailed(String),
    #[error("network error")]
    Network(#[from] reqwest::Error),
}
