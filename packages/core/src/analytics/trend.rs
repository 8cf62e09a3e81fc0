//! Base-fee trend classification

use crate::analytics::{
    config::TrendConfig,
    stats::{mean, tail},
    types::Trend,
};

/// Unrounded result of comparing the trailing window with the one before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendAnalysis {
    pub trend: Trend,
    pub percent_change: f64,
    pub avg_recent: f64,
    pub avg_previous: f64,
}

/// Compare the mean of the last `window` base fees against the mean of the
/// `window` fees immediately before them.
pub fn classify_trend(base_fees: &[f64], config: &TrendConfig) -> TrendAnalysis {
    let len = base_fees.len();
    let recent_start = len.saturating_sub(config.window);
    let previous_start = recent_start.saturating_sub(config.window);

    let recent = &base_fees[recent_start..];
    let previous = &base_fees[previous_start..recent_start];

    let avg_recent = mean(recent);
    // Without a preceding window the change is defined as zero.
    let avg_previous = if previous.is_empty() {
        avg_recent
    } else {
        mean(previous)
    };

    let percent_change = if avg_previous > 0.0 {
        (avg_recent - avg_previous) / avg_previous * 100.0
    } else {
        0.0
    };

    let trend = if percent_change > config.band_pct {
        Trend::Rising
    } else if percent_change < -config.band_pct {
        Trend::Falling
    } else {
        Trend::Flat
    };

    TrendAnalysis {
        trend,
        percent_change,
        avg_recent,
        avg_previous,
    }
}

/// The most recent base fee, or 0 when there are none.
pub fn current_base_fee(base_fees: &[f64]) -> f64 {
    tail(base_fees, 1).first().copied().unwrap_or(0.0)
}
