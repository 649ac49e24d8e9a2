//! Growth-rate calculator: derives the six scenario rates from raw
//! previous-year and current-year indicator values.

use common::round2;
use std::fmt;
use tracing::debug;

use crate::error::{ComputeError, Result};

/// Indicators of the calculator, with their long display labels.
pub const GROWTH_INDICATORS: [(&str, &str); 6] = [
    ("population", "Population"),
    ("exports", "Exports of Goods and Services"),
    ("imports", "Imports of Goods and Services"),
    ("capitalFormation", "Gross Capital Formation"),
    ("consumption", "Final Consumption Expenditure"),
    ("government", "Government Expenditure"),
];

/// Sign of a computed rate, used to colour it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthTrend {
    Positive,
    Negative,
    Flat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthIndicator {
    pub name: &'static str,
    pub label: &'static str,
    pub previous_year: String,
    pub current_year: String,
    pub growth_rate: Option<f64>,
}

impl GrowthIndicator {
    pub fn trend(&self) -> Option<GrowthTrend> {
        self.growth_rate.map(|rate| {
            if rate > 0.0 {
                GrowthTrend::Positive
            } else if rate < 0.0 {
                GrowthTrend::Negative
            } else {
                GrowthTrend::Flat
            }
        })
    }
}

/// `(current - previous) / previous * 100`, rounded to 2 decimals.
///
/// `None` when either value does not parse or `previous` is zero.
pub fn calculate_growth_rate(previous: &str, current: &str) -> Option<f64> {
    let previous: f64 = previous.trim().parse().ok()?;
    let current: f64 = current.trim().parse().ok()?;
    if previous.is_nan() || current.is_nan() || previous == 0.0 {
        return None;
    }
    Some(round2((current - previous) / previous * 100.0))
}

/// Six indicators with their raw values and computed rates.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthCalculator {
    indicators: Vec<GrowthIndicator>,
}

impl Default for GrowthCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowthCalculator {
    pub fn new() -> Self {
        let indicators = GROWTH_INDICATORS
            .iter()
            .map(|&(name, label)| GrowthIndicator {
                name,
                label,
                previous_year: String::new(),
                current_year: String::new(),
                growth_rate: None,
            })
            .collect();
        Self { indicators }
    }

    pub fn indicators(&self) -> &[GrowthIndicator] {
        &self.indicators
    }

    /// Set both raw values of the indicator called `name`.
    pub fn set_values(&mut self, name: &str, previous: &str, current: &str) -> Result<()> {
        let indicator = self
            .indicators
            .iter_mut()
            .find(|i| i.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ComputeError::GrowthCalculation(format!("Unknown indicator: {name}")))?;
        indicator.previous_year = previous.to_string();
        indicator.current_year = current.to_string();
        Ok(())
    }

    pub fn has_any_input(&self) -> bool {
        self.indicators
            .iter()
            .any(|i| !i.previous_year.is_empty() || !i.current_year.is_empty())
    }

    pub fn has_all_inputs(&self) -> bool {
        self.indicators
            .iter()
            .all(|i| !i.previous_year.is_empty() && !i.current_year.is_empty())
    }

    /// Recompute every rate from the current raw values.
    pub fn calculate(&mut self) {
        for indicator in &mut self.indicators {
            indicator.growth_rate =
                calculate_growth_rate(&indicator.previous_year, &indicator.current_year);
        }
        debug!(
            computed = self.indicators.iter().filter(|i| i.growth_rate.is_some()).count(),
            "Growth rates calculated"
        );
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// `"<label>: <rate>%"` for each computed indicator, one per line.
    pub fn copy_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GrowthCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .indicators
            .iter()
            .filter_map(|i| {
                i.growth_rate
                    .map(|rate| format!("{}: {}%", i.label, common::format_number(rate)))
            })
            .collect();
        f.write_str(&lines.join("\n"))
    }
}
