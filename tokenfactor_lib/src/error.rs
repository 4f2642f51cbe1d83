//! Error types for the analysis layer.

use thiserror::Error;

/// Errors produced by the individual pipeline stages.
///
/// `PriceAnalyzer::analyze_token_price` never surfaces these to callers;
/// they exist so the statistics functions and clients can be used directly.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The market-data fetch failed.
    #[error(transparent)]
    Fetch(#[from] tokenfactor_api::Error),
    /// The series has fewer points than the operation requires.
    #[error("insufficient data: need at least {needed} price points, got {got}")]
    InsufficientData { needed: usize, got: usize },
    /// The series spans fewer than two distinct calendar days.
    #[error("insufficient days: need price points from at least 2 calendar days")]
    InsufficientDays,
    /// The completion provider failed to produce a score.
    #[error(transparent)]
    Scoring(#[from] crate::completion::CompletionError),
}
