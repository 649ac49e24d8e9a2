//! Input validation for the scenario form.
//!
//! The form holds the raw text of the six growth-rate fields. A prediction
//! may only be requested once a country is selected and every field parses
//! as a finite base-10 float; no range or sign is enforced.

use common::{Indicator, IndicatorRates, ScenarioInput};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("No country selected")]
    NoCountry,

    #[error("{} is required", .0.input_label())]
    MissingField(Indicator),

    #[error("{} is not a number: {text:?}", .indicator.input_label())]
    NotANumber { indicator: Indicator, text: String },

    /// `NaN`/`inf` literals parse as floats but would poison every
    /// downstream sum, so they are rejected here explicitly.
    #[error("{} must be a finite number", .0.input_label())]
    NonFinite(Indicator),
}

/// Raw text state of the scenario form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioForm {
    pub country: Option<String>,
    fields: [String; 6],
}

impl ScenarioForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = Some(country.into());
    }

    pub fn set_field(&mut self, indicator: Indicator, text: impl Into<String>) {
        self.fields[index_of(indicator)] = text.into();
    }

    pub fn field(&self, indicator: Indicator) -> &str {
        &self.fields[index_of(indicator)]
    }

    /// Clear the six fields, keeping the selected country.
    pub fn clear_fields(&mut self) {
        self.fields = Default::default();
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// Parse the form into a scenario, reporting the first problem found.
    pub fn validate(&self) -> Result<ScenarioInput, ValidationError> {
        let country = self
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(ValidationError::NoCountry)?;

        let mut rates = IndicatorRates::default();
        for indicator in Indicator::ALL {
            let value = parse_rate(indicator, self.field(indicator))?;
            rates.set(indicator, value);
        }

        debug!(country, ?rates, "Scenario form validated");
        Ok(ScenarioInput::new(country, rates))
    }
}

/// Parse one growth-rate field.
pub fn parse_rate(indicator: Indicator, text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(indicator));
    }
    let value: f64 = trimmed.parse().map_err(|_| ValidationError::NotANumber {
        indicator,
        text: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::NonFinite(indicator));
    }
    Ok(value)
}

fn index_of(indicator: Indicator) -> usize {
    match indicator {
        Indicator::Population => 0,
        Indicator::Exports => 1,
        Indicator::Imports => 2,
        Indicator::Investment => 3,
        Indicator::Consumption => 4,
        Indicator::GovernmentSpending => 5,
    }
}
