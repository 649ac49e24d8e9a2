//! Numeric converters shared by the compute and report modules.
//!
//! The prediction service and the original dashboard format numbers the way
//! `Number.prototype.toFixed` does: the exact binary value of the float is
//! rounded to the requested number of decimals and an exact midpoint is
//! rounded away from zero. Going through `Decimal::from_f64_retain` keeps the
//! exact binary value, so `1.005` (stored as `1.00499999...`) rounds down while
//! `0.125` (exactly representable) rounds up.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::trace;

/// Round `value` to `decimals` places, half away from zero.
///
/// Non-finite values and values outside the `Decimal` range are returned
/// unchanged so that a `NaN` stays visible instead of turning into zero.
pub fn round_fixed(value: f64, decimals: u32) -> f64 {
    match to_rounded_decimal(value, decimals) {
        // Parsing the decimal text gives the correctly rounded nearest f64.
        Some(rounded) => rounded.to_string().parse().unwrap_or(value),
        None => {
            trace!(value, decimals, "Value cannot be rounded as a decimal, returning as-is");
            value
        }
    }
}

/// Shorthand for the two-decimal rounding used across charts and reports.
pub fn round2(value: f64) -> f64 {
    round_fixed(value, 2)
}

/// Format `value` with exactly `decimals` fractional digits (`toFixed`).
pub fn format_fixed(value: f64, decimals: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    match to_rounded_decimal(value.abs(), decimals) {
        Some(mut magnitude) => {
            magnitude.rescale(decimals);
            if value < 0.0 {
                format!("-{}", magnitude)
            } else {
                magnitude.to_string()
            }
        }
        None => format!("{:.*}", decimals as usize, value),
    }
}

/// Format a number the way it is displayed when interpolated into text:
/// the shortest representation that round-trips, without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

fn to_rounded_decimal(value: f64, decimals: u32) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    let exact = Decimal::from_f64_retain(value).or_else(|| Decimal::from_f64(value))?;
    Some(exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_matches_fixed_point_formatting() {
        assert_eq!(round2(3.456), 3.46);
        assert_eq!(round2(3.456 * 1.05), 3.63);
        assert_eq!(round2(-2.346), -2.35);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn test_round2_uses_exact_binary_value() {
        // 1.005 is stored slightly below the midpoint
        assert_eq!(round2(1.005), 1.0);
        // 0.125 is exactly representable, so the midpoint goes away from zero
        assert_eq!(round_fixed(0.125, 2), 0.13);
        assert_eq!(round_fixed(-0.125, 2), -0.13);
    }

    #[test]
    fn test_round_keeps_nan_visible() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(5.2, 2), "5.20");
        assert_eq!(format_fixed(26.804123, 1), "26.8");
        assert_eq!(format_fixed(0.0, 1), "0.0");
        assert_eq!(format_fixed(-0.001, 2), "-0.00");
        assert_eq!(format_fixed(-0.0, 2), "0.00");
        assert_eq!(format_fixed(-3.5, 2), "-3.50");
        assert_eq!(format_fixed(f64::NAN, 2), "NaN");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(3.456), "3.456");
        assert_eq!(format_number(-0.5), "-0.5");
        assert_eq!(format_number(-0.0), "0");
    }
}
