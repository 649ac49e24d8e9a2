use serde::{Deserialize, Serialize};

use crate::indicator::{Indicator, IndicatorRates, ScenarioInput};

/// Request body for `POST /simulate` (mirrors the service's field names).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRequest {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Population_Growth_Rate")]
    pub population_growth_rate: f64,
    #[serde(rename = "Exports_Growth_Rate")]
    pub exports_growth_rate: f64,
    #[serde(rename = "Imports_Growth_Rate")]
    pub imports_growth_rate: f64,
    #[serde(rename = "Investment_Growth_Rate")]
    pub investment_growth_rate: f64,
    #[serde(rename = "Consumption_Growth_Rate")]
    pub consumption_growth_rate: f64,
    #[serde(rename = "Govt_Spend_Growth_Rate")]
    pub govt_spend_growth_rate: f64,
}

impl From<&ScenarioInput> for PredictionRequest {
    fn from(input: &ScenarioInput) -> Self {
        let rates = &input.rates;
        Self {
            country: input.country.clone(),
            population_growth_rate: rates.population,
            exports_growth_rate: rates.exports,
            imports_growth_rate: rates.imports,
            investment_growth_rate: rates.investment,
            consumption_growth_rate: rates.consumption,
            govt_spend_growth_rate: rates.government_spending,
        }
    }
}

/// Response body of `POST /simulate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    pub predicted_gdp_growth: f64,
    pub model_type: String,
    #[serde(default)]
    pub interpretation: String,
    #[serde(default)]
    pub note: String,
}

/// A factor's signed input value and its share of total absolute magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionEntry {
    pub indicator: Indicator,
    pub name: String,
    pub value: f64,
    pub percentage: f64,
}

/// Everything known about one successful prediction.
///
/// Only `predicted_growth`, `model_type`, `interpretation` and `note` come
/// from the service; confidence and contributions are derived locally and
/// recomputed on every prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub scenario: ScenarioInput,
    pub predicted_growth: f64,
    pub model_type: String,
    pub interpretation: String,
    pub note: String,
    pub confidence: u8,
    pub contributions: Vec<ContributionEntry>,
}

impl PredictionOutcome {
    pub fn rates(&self) -> &IndicatorRates {
        &self.scenario.rates
    }

    pub fn country(&self) -> &str {
        &self.scenario.country
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_service_field_names() {
        let input = ScenarioInput::new(
            "United States",
            IndicatorRates {
                population: 1.1,
                exports: 5.2,
                imports: 4.8,
                investment: 3.5,
                consumption: 2.8,
                government_spending: 2.0,
            },
        );
        let value = serde_json::to_value(PredictionRequest::from(&input)).unwrap();
        assert_eq!(value["Country"], "United States");
        assert_eq!(value["Exports_Growth_Rate"], 5.2);
        assert_eq!(value["Govt_Spend_Growth_Rate"], 2.0);
        assert_eq!(value.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_response_tolerates_missing_text_fields() {
        let response: PredictionResponse =
            serde_json::from_str(r#"{"predicted_gdp_growth":3.456,"model_type":"Ridge"}"#).unwrap();
        assert_eq!(response.predicted_gdp_growth, 3.456);
        assert!(response.interpretation.is_empty());
    }
}
