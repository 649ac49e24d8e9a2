pub mod contribution;
pub mod error;
pub mod fallback;
pub mod growth;
pub mod timeline;
pub mod validation;

use common::{PredictionOutcome, PredictionResponse, ScenarioInput};
use tracing::{info, instrument};

use error::{ComputeError, Result};

/// Derives the locally computed presentation fields for one prediction.
///
/// This is the pipeline run after every successful `/simulate` call: the
/// service's raw value and labels are kept as-is, the contribution breakdown
/// and confidence score are recomputed from the scenario's six rates.
#[instrument(skip(response), fields(country = %scenario.country))]
pub fn analyze_prediction(
    scenario: &ScenarioInput,
    response: &PredictionResponse,
) -> Result<PredictionOutcome> {
    if !response.predicted_gdp_growth.is_finite() {
        return Err(ComputeError::NonFinitePrediction(response.predicted_gdp_growth));
    }

    let contributions = contribution::analyze_contributions(&scenario.rates)?;
    let confidence = contribution::confidence_score(&scenario.rates)?;

    info!(
        predicted = response.predicted_gdp_growth,
        confidence,
        model = %response.model_type,
        "Prediction analyzed"
    );

    Ok(PredictionOutcome {
        scenario: scenario.clone(),
        predicted_growth: response.predicted_gdp_growth,
        model_type: response.model_type.clone(),
        interpretation: response.interpretation.clone(),
        note: response.note.clone(),
        confidence,
        contributions,
    })
}
