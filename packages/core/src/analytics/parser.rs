//! Sample Parser: raw `eth_feeHistory` result to typed gwei samples.

use serde_json::Value;

use crate::analytics::{
    error::AnalyticsError,
    types::{NormalizedSamples, RawSampleSet, PERCENTILE_COUNT},
    units::{parse_quantity, wei_to_gwei},
};

/// Validate and normalize a raw sample set.
///
/// Reward rows with fewer than five percentile values are dropped whole so
/// every percentile column keeps the same length.
pub fn parse(raw: &RawSampleSet) -> Result<NormalizedSamples, AnalyticsError> {
    let base_fee_per_gas = require_array(raw.base_fee_per_gas.as_ref(), "baseFeePerGas")?;
    let reward = require_array(raw.reward.as_ref(), "reward")?;
    let gas_used_ratio = require_array(raw.gas_used_ratio.as_ref(), "gasUsedRatio")?;

    let base_fees = base_fee_per_gas
        .iter()
        .enumerate()
        .map(|(i, value)| to_gwei(value, "baseFeePerGas", i))
        .collect::<Result<Vec<_>, _>>()?;

    let utilization = gas_used_ratio
        .iter()
        .enumerate()
        .map(|(i, value)| {
            value
                .as_f64()
                .ok_or_else(|| AnalyticsError::invalid_quantity("gasUsedRatio", i, value))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut priority_fees_by_percentile: [Vec<f64>; PERCENTILE_COUNT] = Default::default();
    let mut rows_dropped = 0;

    for (i, row) in reward.iter().enumerate() {
        let entries = match row.as_array() {
            Some(entries) if entries.len() >= PERCENTILE_COUNT => entries,
            _ => {
                rows_dropped += 1;
                continue;
            }
        };

        // Convert the whole row before admitting any of it.
        let mut converted = [0.0; PERCENTILE_COUNT];
        for (slot, value) in converted.iter_mut().zip(entries) {
            *slot = to_gwei(value, "reward", i)?;
        }
        for (column, fee) in priority_fees_by_percentile.iter_mut().zip(converted) {
            column.push(fee);
        }
    }

    if rows_dropped > 0 {
        tracing::debug!("Dropped {} incomplete reward rows", rows_dropped);
    }

    Ok(NormalizedSamples {
        base_fees,
        utilization,
        priority_fees_by_percentile,
        rows_dropped,
    })
}

fn require_array<'a>(
    value: Option<&'a Value>,
    field: &str,
) -> Result<&'a Vec<Value>, AnalyticsError> {
    match value {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(AnalyticsError::malformed(format!("{} is not an array", field))),
        None => Err(AnalyticsError::malformed(format!("{} is missing", field))),
    }
}

fn to_gwei(value: &Value, field: &'static str, index: usize) -> Result<f64, AnalyticsError> {
    parse_quantity(value)
        .map(wei_to_gwei)
        .ok_or_else(|| AnalyticsError::invalid_quantity(field, index, value))
}
