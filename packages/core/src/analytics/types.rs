//! Core data types for fee analytics

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Percentile ranks requested from `eth_feeHistory`, in reward-row order.
pub const PERCENTILES: [u8; 5] = [10, 25, 50, 75, 90];

/// Number of percentile columns a reward row must carry to be admitted.
pub const PERCENTILE_COUNT: usize = PERCENTILES.len();

/// Raw `eth_feeHistory` result as delivered by the data source.
///
/// Fields are kept as untyped JSON so the parser can report exactly which
/// one is missing or has the wrong shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSampleSet {
    #[serde(default)]
    pub base_fee_per_gas: Option<Value>,
    #[serde(default)]
    pub reward: Option<Value>,
    #[serde(default)]
    pub gas_used_ratio: Option<Value>,
}

/// Typed, unit-converted samples ready for analysis. All fees are in gwei.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSamples {
    /// Base fee per block, oldest first (N+1 entries for N blocks).
    pub base_fees: Vec<f64>,
    /// Gas used / gas target per block.
    pub utilization: Vec<f64>,
    /// Priority fees grouped by percentile index (p10, p25, p50, p75, p90).
    /// All five columns always have the same length.
    pub priority_fees_by_percentile: [Vec<f64>; PERCENTILE_COUNT],
    /// Reward rows rejected for carrying fewer than five percentiles.
    pub rows_dropped: usize,
}

/// Direction of the base fee over the trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

/// Network congestion classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Congestion {
    Favorable,
    Choppy,
    Congested,
}

impl Congestion {
    /// Ordinal used for gauges: 0 favorable, 1 choppy, 2 congested.
    pub fn level(&self) -> u8 {
        match self {
            Congestion::Favorable => 0,
            Congestion::Choppy => 1,
            Congestion::Congested => 2,
        }
    }
}

/// Median priority fee for each requested percentile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TipMedians {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// A ready-to-use fee quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    pub tip: f64,
    pub max_fee: f64,
}

/// Quotes for the three urgency levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeTiers {
    pub next: FeeQuote,
    pub mid: FeeQuote,
    pub bargain: FeeQuote,
}

/// Output of one analysis run. Numbers are rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub current_base_fee: f64,
    pub base_fees: Vec<f64>,
    pub trend: Trend,
    pub percent_change: f64,
    pub congestion: Congestion,
    pub fullness: f64,
    pub dispersion: f64,
    pub tips: TipMedians,
    pub rows: FeeTiers,
}
