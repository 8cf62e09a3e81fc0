//! End-to-end and property-based tests for the fee analytics engine.

use proptest::prelude::*;
use serde_json::{json, Value};

use crate::analytics::{
    analyze,
    config::AnalyticsConfig,
    engine::FeeAnalyticsEngine,
    parse,
    types::*,
};

const GWEI: u64 = 1_000_000_000;

fn hex_gwei(gwei: f64) -> Value {
    json!(format!("{:#x}", (gwei * GWEI as f64).round() as u64))
}

fn raw_history(base_fees: &[f64], rewards: &[[f64; 5]], utilization: &[f64]) -> RawSampleSet {
    RawSampleSet {
        base_fee_per_gas: Some(Value::Array(base_fees.iter().map(|&g| hex_gwei(g)).collect())),
        reward: Some(Value::Array(
            rewards
                .iter()
                .map(|row| Value::Array(row.iter().map(|&g| hex_gwei(g)).collect()))
                .collect(),
        )),
        gas_used_ratio: Some(json!(utilization)),
    }
}

fn samples(base_fees: Vec<f64>, utilization: Vec<f64>, rows: &[[f64; 5]]) -> NormalizedSamples {
    let mut priority_fees_by_percentile: [Vec<f64>; PERCENTILE_COUNT] = Default::default();
    for row in rows {
        for (column, &fee) in priority_fees_by_percentile.iter_mut().zip(row) {
            column.push(fee);
        }
    }
    NormalizedSamples {
        base_fees,
        utilization,
        priority_fees_by_percentile,
        rows_dropped: 0,
    }
}

// =============================================================================
// END-TO-END
// =============================================================================

#[test]
fn rising_base_fee_produces_congested_summary() {
    let base_fees = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0];
    let raw = raw_history(&base_fees, &[[1.0, 2.0, 3.0, 4.0, 5.0]; 10], &[0.5; 10]);

    let summary = FeeAnalyticsEngine::default().summarize(&raw).unwrap();

    assert_eq!(summary.current_base_fee, 20.0);
    assert_eq!(summary.trend, Trend::Rising);
    assert_eq!(summary.percent_change, 60.0);
    assert_eq!(summary.tips.p50, 3.0);
    assert_eq!(summary.tips.p90, 5.0);
    assert_eq!(summary.dispersion, 2.0);
    assert_eq!(summary.fullness, 0.5);
    assert_eq!(summary.congestion, Congestion::Congested);
    assert_eq!(summary.rows.next, FeeQuote { tip: 5.0, max_fee: 45.0 });
    assert_eq!(summary.rows.mid, FeeQuote { tip: 3.0, max_fee: 43.0 });
    assert_eq!(summary.rows.bargain, FeeQuote { tip: 2.0, max_fee: 42.0 });
    assert_eq!(summary.base_fees.len(), 11);
}

#[test]
fn all_zero_history_is_favorable_with_zero_quotes() {
    let raw = raw_history(&[0.0; 11], &[[0.0; 5]; 10], &[0.5; 10]);

    let summary = FeeAnalyticsEngine::default().summarize(&raw).unwrap();

    assert_eq!(summary.current_base_fee, 0.0);
    assert_eq!(summary.tips, TipMedians::default());
    for quote in [summary.rows.next, summary.rows.mid, summary.rows.bargain] {
        assert_eq!(quote, FeeQuote { tip: 0.0, max_fee: 0.0 });
    }
    assert_eq!(summary.trend, Trend::Flat);
    assert_eq!(summary.congestion, Congestion::Favorable);
}

#[test]
fn empty_history_degrades_to_zeroes() {
    let summary = analyze(&NormalizedSamples::default());

    assert_eq!(summary.current_base_fee, 0.0);
    assert_eq!(summary.percent_change, 0.0);
    assert_eq!(summary.fullness, 0.0);
    assert_eq!(summary.trend, Trend::Flat);
    assert_eq!(summary.congestion, Congestion::Favorable);
    assert!(summary.base_fees.is_empty());
}

#[test]
fn incomplete_reward_rows_do_not_skew_medians() {
    let raw = RawSampleSet {
        base_fee_per_gas: Some(json!(["0x3b9aca00", "0x3b9aca00"])),
        reward: Some(json!([
            ["0x3b9aca00", "0x77359400", "0xb2d05e00", "0xee6b2800", "0x12a05f200"],
            ["0x0", "0x0", "0x0"],
            []
        ])),
        gas_used_ratio: Some(json!([0.5])),
    };

    let parsed = parse(&raw).unwrap();
    assert_eq!(parsed.rows_dropped, 2);

    let summary = analyze(&parsed);
    assert_eq!(
        summary.tips,
        TipMedians { p10: 1.0, p25: 2.0, p50: 3.0, p75: 4.0, p90: 5.0 }
    );
}

#[test]
fn full_blocks_are_congested_while_falling() {
    let base_fees = vec![20.0, 20.0, 20.0, 20.0, 20.0, 20.0, 10.0, 10.0, 10.0, 10.0, 10.0];
    let summary = analyze(&samples(base_fees, vec![1.0; 10], &[[1.0; 5]; 10]));

    assert_eq!(summary.trend, Trend::Falling);
    assert_eq!(summary.percent_change, -50.0);
    assert_eq!(summary.congestion, Congestion::Congested);
    assert_eq!(summary.rows.next.tip, 1.0);
}

#[test]
fn choppy_network_quotes_p75_for_next_block() {
    let summary = analyze(&samples(
        vec![10.0; 11],
        vec![0.875; 10],
        &[[1.0, 2.0, 3.0, 4.0, 5.0]; 10],
    ));

    assert_eq!(summary.congestion, Congestion::Choppy);
    assert_eq!(summary.rows.next, FeeQuote { tip: 4.0, max_fee: 24.0 });
}

#[test]
fn outputs_are_rounded_only_at_the_boundary() {
    let summary = analyze(&samples(
        vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.123_456_789],
        vec![0.123_456_78; 3],
        &[[0.000_000_4, 0.000_001_5, 1.0, 2.0, 3.0]],
    ));

    assert_eq!(summary.current_base_fee, 1.123457);
    assert_eq!(summary.fullness, 0.1235);
    assert_eq!(summary.percent_change, 2.5);
    assert_eq!(summary.tips.p10, 0.0);
    assert_eq!(summary.tips.p25, 0.000002);
    assert_eq!(summary.rows.bargain.max_fee, 2.246915);
}

#[test]
fn dispersion_threshold_is_tunable() {
    let mut config = AnalyticsConfig::default();
    config.congestion.dispersion_gwei = 50.0;
    let data = samples(vec![30.0; 11], vec![0.5; 10], &[[1.0, 2.0, 3.0, 10.0, 20.0]; 10]);

    assert_eq!(analyze(&data).congestion, Congestion::Congested);
    assert_eq!(FeeAnalyticsEngine::new(config).analyze(&data).congestion, Congestion::Favorable);
}

#[test]
fn summary_serializes_with_camel_case_and_labels() {
    let summary = analyze(&samples(vec![10.0; 11], vec![0.5; 10], &[[1.0; 5]; 10]));
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["currentBaseFee"], 10.0);
    assert_eq!(json["trend"], "flat");
    assert_eq!(json["congestion"], "FAVORABLE");
    assert_eq!(json["percentChange"], 0.0);
    assert_eq!(json["rows"]["next"]["maxFee"], 21.0);
    assert_eq!(json["tips"]["p90"], 1.0);
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

fn fee_strategy() -> impl Strategy<Value = f64> {
    (0u64..500_000_000_000u64).prop_map(|wei| wei as f64 / GWEI as f64)
}

fn reward_row_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..100_000_000_000u64, 0..8)
}

proptest! {
    #[test]
    fn short_base_fee_series_are_flat(fees in prop::collection::vec(fee_strategy(), 0..6)) {
        let summary = analyze(&samples(fees, vec![0.5], &[]));
        prop_assert_eq!(summary.percent_change, 0.0);
        prop_assert_eq!(summary.trend, Trend::Flat);
    }

    #[test]
    fn percentile_columns_stay_aligned(
        rows in prop::collection::vec(reward_row_strategy(), 0..20)
    ) {
        let raw = RawSampleSet {
            base_fee_per_gas: Some(json!(["0x1"])),
            reward: Some(json!(rows
                .iter()
                .map(|row| row.iter().map(|wei| format!("{:#x}", wei)).collect::<Vec<_>>())
                .collect::<Vec<_>>())),
            gas_used_ratio: Some(json!([])),
        };

        let parsed = parse(&raw).unwrap();
        let admitted = rows.iter().filter(|row| row.len() >= PERCENTILE_COUNT).count();

        for column in &parsed.priority_fees_by_percentile {
            prop_assert_eq!(column.len(), admitted);
        }
        prop_assert_eq!(parsed.rows_dropped, rows.len() - admitted);
    }

    #[test]
    fn over_full_blocks_are_always_congested(
        fees in prop::collection::vec(fee_strategy(), 0..30),
        tips in prop::array::uniform5(fee_strategy()),
    ) {
        let summary = analyze(&samples(fees, vec![0.96875; 10], &[tips]));
        prop_assert_eq!(summary.congestion, Congestion::Congested);
    }

    #[test]
    fn max_fee_is_double_base_plus_tip(
        fees in prop::collection::vec(fee_strategy(), 1..30),
        tips in prop::array::uniform5(fee_strategy()),
    ) {
        let current = *fees.last().unwrap();
        let summary = analyze(&samples(fees, vec![0.5; 10], &[tips]));

        for quote in [summary.rows.next, summary.rows.mid, summary.rows.bargain] {
            let expected = 2.0 * current + quote.tip;
            prop_assert!((quote.max_fee - expected).abs() < 2e-6);
        }
    }

    #[test]
    fn dispersion_is_p90_minus_p50(
        tips in prop::collection::vec(prop::array::uniform5(fee_strategy()), 1..10),
    ) {
        let summary = analyze(&samples(vec![1.0], vec![0.5], &tips));
        prop_assert!((summary.dispersion - (summary.tips.p90 - summary.tips.p50)).abs() < 2e-6);
    }

    #[test]
    fn trend_matches_percent_change_band(fees in prop::collection::vec(fee_strategy(), 6..30)) {
        let summary = analyze(&samples(fees, vec![0.5], &[]));
        match summary.trend {
            Trend::Rising => prop_assert!(summary.percent_change >= 5.0),
            Trend::Falling => prop_assert!(summary.percent_change <= -5.0),
            Trend::Flat => prop_assert!(summary.percent_change.abs() <= 5.0),
        }
    }
}
