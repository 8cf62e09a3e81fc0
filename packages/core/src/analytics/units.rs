//! Wei quantity parsing and unit conversion.
//!
//! Raw fee values routinely exceed 2^53, so they are parsed into a 256-bit
//! integer and split into whole and fractional gwei before anything touches
//! floating point.

use primitive_types::U256;
use serde_json::Value;

const WEI_PER_GWEI: u64 = 1_000_000_000;

/// Parse a JSON quantity: `0x` hex string, decimal string or integral number.
pub fn parse_quantity(value: &Value) -> Option<U256> {
    match value {
        Value::String(text) => parse_quantity_str(text.trim()),
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                return Some(U256::from(n));
            }
            let f = number.as_f64()?;
            if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u128::MAX as f64 {
                Some(U256::from(f as u128))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn parse_quantity_str(text: &str) -> Option<U256> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return U256::from_str_radix(hex, 16).ok();
    }
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    U256::from_dec_str(text).ok()
}

/// Convert a wei amount to gwei. The division happens on the integer.
pub fn wei_to_gwei(wei: U256) -> f64 {
    let (whole, rem) = wei.div_mod(U256::from(WEI_PER_GWEI));
    u256_to_f64(whole) + rem.low_u64() as f64 / WEI_PER_GWEI as f64
}

fn u256_to_f64(value: U256) -> f64 {
    const LIMB: f64 = 18_446_744_073_709_551_616.0; // 2^64
    value.0.iter().rev().fold(0.0, |acc, &limb| acc * LIMB + limb as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_hex_and_decimal_strings() {
        assert_eq!(
            parse_quantity(&json!("0x3b9aca00")),
            Some(U256::from(1_000_000_000u64))
        );
        assert_eq!(parse_quantity(&json!("0X10")), Some(U256::from(16u64)));
        assert_eq!(
            parse_quantity(&json!("1000000000")),
            Some(U256::from(1_000_000_000u64))
        );
        assert_eq!(parse_quantity(&json!(" 42 ")), Some(U256::from(42u64)));
    }

    #[test]
    fn parses_integral_numbers() {
        assert_eq!(parse_quantity(&json!(7)), Some(U256::from(7u64)));
        assert_eq!(
            parse_quantity(&json!(1e20)),
            Some(U256::from(100_000_000_000_000_000_000u128))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_quantity(&json!("0x")).is_none());
        assert!(parse_quantity(&json!("0xzz")).is_none());
        assert!(parse_quantity(&json!("-5")).is_none());
        assert!(parse_quantity(&json!("1.5")).is_none());
        assert!(parse_quantity(&json!("")).is_none());
        assert!(parse_quantity(&json!(1.5)).is_none());
        assert!(parse_quantity(&json!(-3)).is_none());
        assert!(parse_quantity(&json!(null)).is_none());
        assert!(parse_quantity(&json!([1])).is_none());
    }

    #[test]
    fn converts_wei_to_gwei() {
        assert_eq!(wei_to_gwei(U256::zero()), 0.0);
        assert_eq!(wei_to_gwei(U256::from(1_000_000_000u64)), 1.0);
        assert!((wei_to_gwei(U256::from(12_345_678_901u64)) - 12.345678901).abs() < 1e-12);
        assert!((wei_to_gwei(U256::from(1u64)) - 1e-9).abs() < 1e-21);
    }

    #[test]
    fn keeps_precision_beyond_f64_safe_integers() {
        // 2^53 + 1 wei is not representable as f64, but the gwei value is.
        let wei = U256::from(9_007_199_254_740_993u64);
        let gwei = wei_to_gwei(wei);
        assert!((gwei - 9_007_199.254_740_993).abs() < 1e-6);
    }

    #[test]
    fn converts_values_wider_than_u128() {
        let wei = U256::from_dec_str("1000000000000000000000000000000000000000000").unwrap();
        let gwei = wei_to_gwei(wei);
        assert!((gwei / 1e33 - 1.0).abs() < 1e-12);
    }
}
