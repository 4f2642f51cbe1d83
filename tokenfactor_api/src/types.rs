//! Domain and wire types for the coin-chart endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single (timestamp, USD price) observation for a token.
///
/// Points are chronological as returned by the provider; no re-sort is
/// imposed on the series after deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Raw coin-chart response: `prices` is an array of `[epoch_ms, price]`
/// pairs. The provider also returns market caps and volumes; those fields
/// are not modeled and serde ignores them.
#[derive(Debug, Deserialize)]
pub(crate) struct MarketChart {
    pub prices: Vec<(f64, f64)>,
}
