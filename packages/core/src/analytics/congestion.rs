//! Congestion detection from block fullness, tip spread and fee surges

use crate::analytics::{
    config::CongestionConfig,
    stats::{mean, tail},
    trend::TrendAnalysis,
    types::{Congestion, TipMedians, Trend},
};

/// Unrounded congestion signals and their classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CongestionAnalysis {
    pub congestion: Congestion,
    pub fullness: f64,
    pub dispersion: f64,
}

/// Mean utilization over the trailing `fullness_window` blocks.
pub fn fullness(utilization: &[f64], config: &CongestionConfig) -> f64 {
    mean(tail(utilization, config.fullness_window))
}

/// Spread between the p90 and p50 tip medians. Negative when inverted.
pub fn dispersion(tips: &TipMedians) -> f64 {
    tips.p90 - tips.p50
}

/// Classify the network. Any single extreme signal is enough for
/// `Congested`; high fullness alone only makes it `Choppy`.
pub fn classify_congestion(
    utilization: &[f64],
    tips: &TipMedians,
    trend: &TrendAnalysis,
    config: &CongestionConfig,
) -> CongestionAnalysis {
    let fullness = fullness(utilization, config);
    let dispersion = dispersion(tips);
    let surging = trend.trend == Trend::Rising && trend.percent_change > config.surge_pct;

    let congestion = if fullness > config.congested_fullness
        || dispersion > config.dispersion_gwei
        || surging
    {
        Congestion::Congested
    } else if fullness >= config.choppy_fullness {
        Congestion::Choppy
    } else {
        Congestion::Favorable
    };

    CongestionAnalysis {
        congestion,
        fullness,
        dispersion,
    }
}
