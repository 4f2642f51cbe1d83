//! Error types for the market-data client.

/// Errors that can occur when fetching price history.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A transport failure, non-success status, or malformed response.
    /// The original cause is logged at the failure site and not carried here.
    #[error("failed to fetch historical prices")]
    FetchFailed,
}
