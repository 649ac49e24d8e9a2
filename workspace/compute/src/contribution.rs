//! Contribution analyzer and confidence heuristic.
//!
//! "Contribution" is a factor's share of the total absolute input magnitude.
//! It is a relative-magnitude breakdown for display, not a causal
//! attribution. The confidence score is a fixed display rule and is kept
//! bit-for-bit compatible with the dashboard's output.

use common::{ContributionEntry, IndicatorRates};
use tracing::{instrument, trace};

use crate::error::{ComputeError, Result};

pub const CONFIDENCE_MIN: f64 = 85.0;
pub const CONFIDENCE_MAX: f64 = 95.0;
const TRADE_GAP_WEIGHT: f64 = 2.0;
const DEMAND_GAP_WEIGHT: f64 = 1.5;

/// Per-factor signed value and percentage share of `sum(|rate|)`.
///
/// Percentages sum to 100 when any rate is non-zero and are all 0 when every
/// rate is exactly zero. Rates must be finite.
#[instrument(level = "debug")]
pub fn analyze_contributions(rates: &IndicatorRates) -> Result<Vec<ContributionEntry>> {
    ensure_finite(rates)?;

    // Scaled by the largest magnitude so the sum stays finite near f64::MAX
    let largest = rates
        .iter()
        .map(|(_, value)| value.abs())
        .fold(0.0_f64, f64::max);
    let scaled = |value: f64| if largest > 0.0 { value.abs() / largest } else { 0.0 };
    let total: f64 = rates.iter().map(|(_, value)| scaled(value)).sum();
    trace!(largest, total, "Total scaled contribution");

    Ok(rates
        .iter()
        .map(|(indicator, value)| ContributionEntry {
            indicator,
            name: indicator.factor_name().to_string(),
            value,
            percentage: if total > 0.0 {
                scaled(value) / total * 100.0
            } else {
                0.0
            },
        })
        .collect())
}

/// `100 - 2|exports - imports| - 1.5|investment - consumption|`, clamped to
/// `[85, 95]` and rounded to the nearest integer.
pub fn confidence_score(rates: &IndicatorRates) -> Result<u8> {
    ensure_finite(rates)?;

    let consistency = 100.0
        - (rates.exports - rates.imports).abs() * TRADE_GAP_WEIGHT
        - (rates.investment - rates.consumption).abs() * DEMAND_GAP_WEIGHT;
    let clamped = consistency.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);
    // Half-way values round upwards, like Math.round.
    Ok((clamped + 0.5).floor() as u8)
}

fn ensure_finite(rates: &IndicatorRates) -> Result<()> {
    match rates.first_non_finite() {
        Some(indicator) => Err(ComputeError::NonFiniteRate { indicator }),
        None => Ok(()),
    }
}
