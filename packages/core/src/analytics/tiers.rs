//! Fee-tier recommendations

use crate::analytics::types::{Congestion, FeeQuote, FeeTiers, TipMedians};

/// Pick a tip per urgency level and add base-fee headroom.
///
/// Values are unrounded; the engine rounds when building the summary.
pub fn recommend_tiers(
    current_base_fee: f64,
    tips: &TipMedians,
    congestion: Congestion,
    headroom_multiplier: f64,
) -> FeeTiers {
    let quote = |tip: f64| FeeQuote {
        tip,
        max_fee: headroom_multiplier * current_base_fee + tip,
    };

    let next_tip = match congestion {
        Congestion::Congested => tips.p90,
        Congestion::Choppy | Congestion::Favorable => tips.p75,
    };

    FeeTiers {
        next: quote(next_tip),
        mid: quote(tips.p50),
        bargain: quote(tips.p25),
    }
}
