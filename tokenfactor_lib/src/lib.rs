//! Library layer for the token price-factor pipeline: pure statistics over
//! fetched price series, a completion-provider client that scores price
//! momentum, and the top-level analyzer that composes the stages.
//!
//! Wraps the `tokenfactor_api` market-data crate. The pipeline is strictly
//! sequential per call and holds no state across calls.

pub mod analyzer;
pub mod completion;
pub mod config;
pub mod error;
pub mod stats;

pub use tokenfactor_api;
pub use tokenfactor_api::types;
pub use tokenfactor_api::{Client, DEFAULT_LOOKBACK_DAYS};

pub use analyzer::{AnalysisResult, PriceAnalyzer};
pub use completion::{CompletionClient, CompletionError};
pub use config::{Config, ConfigError};
pub use error::AnalysisError;
pub use stats::{calculate_moving_average, calculate_price_change_percentage};
