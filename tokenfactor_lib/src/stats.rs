//! Pure descriptive statistics over fetched price series.
//!
//! Both functions operate on slices of `PricePoint` and perform no I/O.
//! Errors surface directly to the caller; there is no local recovery.

use std::collections::BTreeMap;

use tokenfactor_api::types::PricePoint;

use crate::error::AnalysisError;

/// Arithmetic mean of the last `period` points in series order.
///
/// No weighting and no gap-filling for missing days: the window is the
/// last `period` samples regardless of their spacing in time.
pub fn calculate_moving_average(
    prices: &[PricePoint],
    period: usize,
) -> Result<f64, AnalysisError> {
    if prices.len() < period {
        return Err(AnalysisError::InsufficientData {
            needed: period,
            got: prices.len(),
        });
    }
    let window = &prices[prices.len() - period..];
    Ok(window.iter().map(|p| p.price).sum::<f64>() / period as f64)
}

/// Percentage change between the last samples of the two most recent
/// calendar days: `(current - old) / old * 100`.
///
/// Points are bucketed by UTC date (`YYYY-MM-DD`); buckets sort
/// lexicographically, which is chronological for zero-padded ISO dates.
/// The comparison is last-sample-of-day against last-sample-of-previous-day,
/// not a 24-hour-apart comparison, so the result depends on how many samples
/// per day the provider happens to return.
pub fn calculate_price_change_percentage(prices: &[PricePoint]) -> Result<f64, AnalysisError> {
    if prices.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            needed: 2,
            got: prices.len(),
        });
    }

    let mut by_day: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for point in prices {
        let key = point.timestamp.format("%Y-%m-%d").to_string();
        by_day.entry(key).or_default().push(point.price);
    }
    if by_day.len() < 2 {
        return Err(AnalysisError::InsufficientDays);
    }

    let mut last_two = by_day.values().rev().take(2);
    let current = last_two.next().and_then(|day| day.last()).copied();
    let old = last_two.next().and_then(|day| day.last()).copied();
    match (old, current) {
        (Some(old), Some(current)) => Ok((current - old) / old * 100.0),
        // Buckets are non-empty by construction.
        _ => Err(AnalysisError::InsufficientDays),
    }
}
