//! Configuration for the fee analytics engine

use serde::{Deserialize, Serialize};

/// Thresholds and window sizes used by the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub trend: TrendConfig,
    pub congestion: CongestionConfig,
    /// `maxFee = headroom_multiplier * currentBaseFee + tip`
    pub headroom_multiplier: f64,
}

/// Configuration for trend classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Number of trailing base fees compared against the window before them.
    pub window: usize,
    /// Percent change that must be exceeded to leave `flat`.
    pub band_pct: f64,
}

/// Configuration for congestion classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CongestionConfig {
    /// Number of trailing utilization ratios averaged into `fullness`.
    pub fullness_window: usize,
    pub congested_fullness: f64,
    pub choppy_fullness: f64,
    /// Absolute p90 - p50 spread, in gwei. Not scaled to the fee level.
    pub dispersion_gwei: f64,
    /// Rising percent change that alone marks the network congested.
    pub surge_pct: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend: TrendConfig::default(),
            congestion: CongestionConfig::default(),
            headroom_multiplier: 2.0,
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: 5,
            band_pct: 5.0,
        }
    }
}

impl Default for CongestionConfig {
    fn default() -> Self {
        Self {
            fullness_window: 10,
            congested_fullness: 0.95,
            choppy_fullness: 0.85,
            dispersion_gwei: 5.0,
            surge_pct: 15.0,
        }
    }
}
