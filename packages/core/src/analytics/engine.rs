//! Fee Analytics Engine - turns normalized samples into a summary

use crate::analytics::{
    config::AnalyticsConfig,
    congestion::classify_congestion,
    error::AnalyticsError,
    parser,
    stats::{median, round_to},
    tiers::recommend_tiers,
    trend::{classify_trend, current_base_fee},
    types::*,
};

const FEE_PLACES: i32 = 6;
const FULLNESS_PLACES: i32 = 4;
const PERCENT_PLACES: i32 = 1;

/// Stateless analytics engine. Every call is independent of the previous
/// one, so a single instance can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct FeeAnalyticsEngine {
    config: AnalyticsConfig,
}

impl FeeAnalyticsEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Parse a raw sample set and analyze it.
    pub fn summarize(&self, raw: &RawSampleSet) -> Result<Summary, AnalyticsError> {
        let samples = parser::parse(raw)?;
        Ok(self.analyze(&samples))
    }

    /// Classify the samples and build fee quotes.
    ///
    /// All decisions use unrounded values; rounding happens only when the
    /// summary is assembled.
    pub fn analyze(&self, samples: &NormalizedSamples) -> Summary {
        let current = current_base_fee(&samples.base_fees);
        let trend = classify_trend(&samples.base_fees, &self.config.trend);
        let tips = tip_medians(samples);
        let congestion = classify_congestion(
            &samples.utilization,
            &tips,
            &trend,
            &self.config.congestion,
        );
        let rows = recommend_tiers(
            current,
            &tips,
            congestion.congestion,
            self.config.headroom_multiplier,
        );

        tracing::debug!(
            base_fee = current,
            percent_change = trend.percent_change,
            fullness = congestion.fullness,
            dispersion = congestion.dispersion,
            "Fee history analyzed"
        );

        Summary {
            current_base_fee: round_fee(current),
            base_fees: samples.base_fees.iter().copied().map(round_fee).collect(),
            trend: trend.trend,
            percent_change: round_to(trend.percent_change, PERCENT_PLACES),
            congestion: congestion.congestion,
            fullness: round_to(congestion.fullness, FULLNESS_PLACES),
            dispersion: round_fee(congestion.dispersion),
            tips: TipMedians {
                p10: round_fee(tips.p10),
                p25: round_fee(tips.p25),
                p50: round_fee(tips.p50),
                p75: round_fee(tips.p75),
                p90: round_fee(tips.p90),
            },
            rows: FeeTiers {
                next: round_quote(rows.next),
                mid: round_quote(rows.mid),
                bargain: round_quote(rows.bargain),
            },
        }
    }
}

/// Analyze samples with the default thresholds.
pub fn analyze(samples: &NormalizedSamples) -> Summary {
    FeeAnalyticsEngine::default().analyze(samples)
}

fn tip_medians(samples: &NormalizedSamples) -> TipMedians {
    let [p10, p25, p50, p75, p90] = &samples.priority_fees_by_percentile;
    TipMedians {
        p10: median(p10),
        p25: median(p25),
        p50: median(p50),
        p75: median(p75),
        p90: median(p90),
    }
}

fn round_fee(value: f64) -> f64 {
    round_to(value, FEE_PLACES)
}

fn round_quote(quote: FeeQuote) -> FeeQuote {
    FeeQuote {
        tip: round_fee(quote.tip),
        max_fee: round_fee(quote.max_fee),
    }
}
