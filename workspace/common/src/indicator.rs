use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six economic growth indicators a scenario is made of.
///
/// The declaration order is the canonical order used by every breakdown,
/// report section and request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Population,
    Exports,
    Imports,
    Investment,
    Consumption,
    GovernmentSpending,
}

impl Indicator {
    pub const ALL: [Indicator; 6] = [
        Indicator::Population,
        Indicator::Exports,
        Indicator::Imports,
        Indicator::Investment,
        Indicator::Consumption,
        Indicator::GovernmentSpending,
    ];

    /// Short factor name used in contribution breakdowns.
    pub fn factor_name(self) -> &'static str {
        match self {
            Indicator::Population => "Population",
            Indicator::Exports => "Exports",
            Indicator::Imports => "Imports",
            Indicator::Investment => "Investment",
            Indicator::Consumption => "Consumption",
            Indicator::GovernmentSpending => "Govt Spending",
        }
    }

    /// Label of the input field as the user fills it in.
    pub fn input_label(self) -> &'static str {
        match self {
            Indicator::Population => "Population Growth",
            Indicator::Exports => "Exports Growth",
            Indicator::Imports => "Imports Growth",
            Indicator::Investment => "Investment (Capital Formation)",
            Indicator::Consumption => "Consumption Expenditure",
            Indicator::GovernmentSpending => "Government Spending",
        }
    }

    /// Label used in the indicator summary of the report.
    pub fn summary_label(self) -> &'static str {
        match self {
            Indicator::Population => "Population Growth",
            Indicator::Exports => "Exports Growth",
            Indicator::Imports => "Imports Growth",
            Indicator::Investment => "Investment Growth",
            Indicator::Consumption => "Consumption Growth",
            Indicator::GovernmentSpending => "Govt Spending Growth",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.factor_name())
    }
}

/// The six growth-rate percentages of a scenario, as parsed numbers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorRates {
    pub population: f64,
    pub exports: f64,
    pub imports: f64,
    pub investment: f64,
    pub consumption: f64,
    pub government_spending: f64,
}

impl IndicatorRates {
    pub fn get(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Population => self.population,
            Indicator::Exports => self.exports,
            Indicator::Imports => self.imports,
            Indicator::Investment => self.investment,
            Indicator::Consumption => self.consumption,
            Indicator::GovernmentSpending => self.government_spending,
        }
    }

    pub fn set(&mut self, indicator: Indicator, value: f64) {
        match indicator {
            Indicator::Population => self.population = value,
            Indicator::Exports => self.exports = value,
            Indicator::Imports => self.imports = value,
            Indicator::Investment => self.investment = value,
            Indicator::Consumption => self.consumption = value,
            Indicator::GovernmentSpending => self.government_spending = value,
        }
    }

    /// Iterate over `(indicator, rate)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Indicator, f64)> + '_ {
        Indicator::ALL.into_iter().map(move |indicator| (indicator, self.get(indicator)))
    }

    /// First indicator whose rate is `NaN` or infinite, if any.
    pub fn first_non_finite(&self) -> Option<Indicator> {
        self.iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(indicator, _)| indicator)
    }
}

/// A complete scenario: the selected country plus its six rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub country: String,
    pub rates: IndicatorRates,
}

impl ScenarioInput {
    pub fn new(country: impl Into<String>, rates: IndicatorRates) -> Self {
        Self {
            country: country.into(),
            rates,
        }
    }
}
