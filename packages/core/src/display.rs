//! Human-facing formatting derived from a summary: badge text and colour,
//! gwei and percentage strings.

use serde::{Deserialize, Serialize};

/// Badge colour bands keyed on the current base fee (gwei).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Red,
    Amber,
    Blue,
    Green,
    /// Shown while no fresh data is available.
    Neutral,
}

impl BadgeColor {
    pub fn for_base_fee(gwei: f64) -> Self {
        if gwei >= 50.0 {
            BadgeColor::Red
        } else if gwei >= 20.0 {
            BadgeColor::Amber
        } else if gwei >= 5.0 {
            BadgeColor::Blue
        } else {
            BadgeColor::Green
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            BadgeColor::Red => "#dc2626",
            BadgeColor::Amber => "#f59e0b",
            BadgeColor::Blue => "#3b82f6",
            BadgeColor::Green => "#22c55e",
            BadgeColor::Neutral => "#71717a",
        }
    }
}

/// Badge content for an icon or status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    pub color: String,
}

impl Badge {
    pub fn for_base_fee(gwei: f64) -> Self {
        Self {
            text: badge_text(gwei),
            color: BadgeColor::for_base_fee(gwei).hex().to_string(),
        }
    }

    /// Neutral badge used instead of stale or fabricated numbers.
    pub fn placeholder() -> Self {
        Self {
            text: "...".to_string(),
            color: BadgeColor::Neutral.hex().to_string(),
        }
    }
}

/// Integer at 100+, one decimal at 10+, three decimals below.
pub fn badge_text(gwei: f64) -> String {
    if gwei >= 100.0 {
        format!("{}", (gwei + 0.5).floor() as u64)
    } else if gwei >= 10.0 {
        to_fixed(gwei, 1)
    } else {
        to_fixed(gwei, 3)
    }
}

/// Gwei amount with enough decimals to stay meaningful on cheap chains.
pub fn format_gwei(gwei: f64) -> String {
    if gwei == 0.0 {
        "0.000".to_string()
    } else if gwei >= 0.001 {
        to_fixed(gwei, 3)
    } else if gwei >= 0.000_01 {
        to_fixed(gwei, 5)
    } else {
        to_fixed(gwei, 7)
    }
}

/// Utilization ratio as a percentage with one decimal.
pub fn format_fullness(ratio: f64) -> String {
    format!("{}%", to_fixed(ratio * 100.0, 1))
}

/// Fixed-point formatting that rounds on the exact binary value, with exact
/// ties going away from zero.
///
/// `format!("{:.N}")` already rounds on the exact value but breaks exact ties
/// to even, so `10.25` would print as `10.2` instead of `10.3`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    round_exact_tie(value, digits).unwrap_or_else(|| format!("{:.*}", digits, value))
}

/// `Some` only when `value` sits exactly halfway between two `digits`-place
/// decimals.
fn round_exact_tie(value: f64, digits: usize) -> Option<String> {
    let magnitude = value.abs();
    let candidate = format!("{:.*}", digits + 1, magnitude);
    if !candidate.ends_with('5') {
        return None;
    }

    // candidate = scaled / 10^(digits + 1); it is a binary fraction only when
    // 5^(digits + 1) divides scaled.
    let scaled: u128 = candidate.replace('.', "").parse().ok()?;
    let five_pow = 5u128.checked_pow(digits as u32 + 1)?;
    if scaled % five_pow != 0 {
        return None;
    }
    let numerator = scaled / five_pow;
    if numerator >= 1 << f64::MANTISSA_DIGITS {
        return None;
    }
    let exact = numerator as f64 / 2f64.powi(digits as i32 + 1);
    if exact != magnitude {
        return None;
    }

    let rounded = scaled / 10 + 1;
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if digits == 0 {
        return Some(format!("{}{}", sign, rounded));
    }
    let unit = 10u128.pow(digits as u32);
    Some(format!(
        "{}{}.{:0width$}",
        sign,
        rounded / unit,
        rounded % unit,
        width = digits
    ))
}
