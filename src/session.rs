//! Dashboard session: the state behind the scenario screen.
//!
//! The session owns every piece of mutable state (country list, form text,
//! display timeline, errors, last prediction, identity) and wires the client
//! and the pure compute/report crates together. Remote results are applied
//! through request tokens so that a response belonging to a superseded
//! request never overwrites fresher state.

use chrono::NaiveDate;
use common::{
    ApiErrorInfo, ChartDataPoint, HistoricalDataPoint, Indicator, PredictionOutcome,
    PredictionRequest, PredictionResponse, ScenarioInput, format_fixed, round2,
};
use compute::error::ComputeError;
use compute::fallback::{fallback_country_names, generate_estimated_history};
use compute::timeline::{
    add_prediction_to_timeline, historical_only, needs_history, recent_trend,
    transform_historical_data,
};
use compute::validation::{ScenarioForm, ValidationError};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use report::{ReportData, ReportError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::auth::AuthContext;
use crate::client::{self, PredictionApi, handle_api_error};

pub const EXPORT_WITHOUT_PREDICTION: &str = "Please run a simulation first before exporting.";
const ESTIMATED_BANNER: &str = "Showing estimated data.";

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Api(ApiErrorInfo),

    #[error(transparent)]
    Compute(#[from] ComputeError),

    #[error("{}", EXPORT_WITHOUT_PREDICTION)]
    NoPrediction,

    #[error("Failed to generate report: {0}")]
    Report(#[from] ReportError),
}

/// Identifies one issued request of a logical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Monotonic token source for one logical operation.
#[derive(Debug, Default)]
struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

/// An issued, not yet applied, history request.
#[derive(Debug, Clone)]
pub struct PendingHistory {
    pub token: RequestToken,
    pub country: String,
}

/// An issued, not yet applied, prediction request.
#[derive(Debug, Clone)]
pub struct PendingPrediction {
    pub token: RequestToken,
    pub scenario: ScenarioInput,
}

/// The prediction compared with the mean of the recent timeline window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendComparison {
    /// Window mean, rounded to 2 decimals as displayed
    pub trend: f64,
    pub predicted: f64,
}

impl TrendComparison {
    pub fn is_above(&self) -> bool {
        self.predicted > self.trend
    }
}

pub struct Dashboard<C: PredictionApi, R: Rng = StdRng> {
    client: C,
    rng: R,
    auth: AuthContext,
    countries: Vec<String>,
    countries_from_fallback: bool,
    form: ScenarioForm,
    timeline: Vec<ChartDataPoint>,
    is_estimated: bool,
    history_error: Option<String>,
    api_error: Option<ApiErrorInfo>,
    prediction: Option<PredictionOutcome>,
    history_requests: RequestSequence,
    prediction_requests: RequestSequence,
}

impl<C: PredictionApi> Dashboard<C, StdRng> {
    pub fn new(client: C, auth: AuthContext) -> Self {
        Self::with_rng(client, auth, StdRng::from_os_rng())
    }
}

impl<C: PredictionApi, R: Rng> Dashboard<C, R> {
    pub fn with_rng(client: C, auth: AuthContext, rng: R) -> Self {
        Self {
            client,
            rng,
            auth,
            countries: Vec::new(),
            countries_from_fallback: false,
            form: ScenarioForm::new(),
            timeline: Vec::new(),
            is_estimated: false,
            history_error: None,
            api_error: None,
            prediction: None,
            history_requests: RequestSequence::default(),
            prediction_requests: RequestSequence::default(),
        }
    }

    // ===================== State =====================

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn countries_from_fallback(&self) -> bool {
        self.countries_from_fallback
    }

    pub fn form(&self) -> &ScenarioForm {
        &self.form
    }

    pub fn selected_country(&self) -> Option<&str> {
        self.form.country.as_deref()
    }

    pub fn timeline(&self) -> &[ChartDataPoint] {
        &self.timeline
    }

    /// Whether the displayed history was synthesized locally.
    pub fn is_estimated(&self) -> bool {
        self.is_estimated
    }

    pub fn history_error(&self) -> Option<&str> {
        self.history_error.as_deref()
    }

    /// Banner text shown above an estimated history, `None` when the history
    /// came from the service.
    pub fn history_banner(&self) -> Option<String> {
        self.history_error
            .as_ref()
            .map(|message| format!("{} {}", ESTIMATED_BANNER, message))
    }

    pub fn api_error(&self) -> Option<&ApiErrorInfo> {
        self.api_error.as_ref()
    }

    pub fn prediction(&self) -> Option<&PredictionOutcome> {
        self.prediction.as_ref()
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut AuthContext {
        &mut self.auth
    }

    pub fn set_field(&mut self, indicator: Indicator, text: impl Into<String>) {
        self.form.set_field(indicator, text);
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit()
    }

    // ===================== Countries =====================

    /// Load the selectable countries, substituting the static list when the
    /// service cannot provide one.
    #[instrument(skip(self))]
    pub fn load_countries(&mut self) -> &[String] {
        match self.client.list_countries() {
            Ok(countries) => {
                info!(count = countries.len(), "Countries loaded");
                self.countries = countries;
                self.countries_from_fallback = false;
            }
            Err(e) => {
                warn!("Failed to load countries, using fallback list: {}", e);
                self.countries = fallback_country_names();
                self.countries_from_fallback = true;
            }
        }
        &self.countries
    }

    // ===================== History =====================

    /// Select a country and load its history.
    pub fn select_country(&mut self, country: &str) {
        let pending = self.begin_history(country);
        let result = self.client.fetch_history(&pending.country);
        self.apply_history(pending, result);
    }

    /// Re-fetch the history of the selected country.
    pub fn retry_history(&mut self) -> Result<(), DashboardError> {
        let country = self
            .form
            .country
            .clone()
            .ok_or(ValidationError::NoCountry)?;
        self.select_country(&country);
        Ok(())
    }

    /// Record the selection and issue a history request for it. Selecting a
    /// different country drops the prediction made for the previous one.
    pub fn begin_history(&mut self, country: &str) -> PendingHistory {
        if self.selected_country() != Some(country) && self.prediction.take().is_some() {
            debug!(country, "Country changed, previous prediction dropped");
        }
        self.form.set_country(country);
        self.history_error = None;
        let token = self.history_requests.issue();
        debug!(?token, country, "History request issued");
        PendingHistory {
            token,
            country: country.to_string(),
        }
    }

    /// Apply a history response. Returns `false` when the request has been
    /// superseded and the response was discarded.
    pub fn apply_history(
        &mut self,
        pending: PendingHistory,
        result: client::Result<Vec<HistoricalDataPoint>>,
    ) -> bool {
        if !self.history_requests.is_latest(pending.token) {
            debug!(
                token = ?pending.token,
                country = %pending.country,
                "Discarding stale history response"
            );
            return false;
        }

        match result {
            Ok(points) => {
                self.timeline = transform_historical_data(&points);
                self.is_estimated = false;
                self.history_error = None;
                info!(country = %pending.country, points = self.timeline.len(), "History loaded");
            }
            Err(e) => {
                let error = handle_api_error(&e);
                warn!(
                    country = %pending.country,
                    "History unavailable, showing estimated data: {}", error
                );
                self.timeline = generate_estimated_history(&pending.country, &mut self.rng);
                self.is_estimated = true;
                self.history_error = Some(error.message);
            }
        }
        true
    }

    // ===================== Prediction =====================

    /// Validate the form, submit it and apply the outcome.
    pub fn predict(&mut self) -> Result<&PredictionOutcome, DashboardError> {
        let pending = self.begin_prediction()?;
        let result = self.request_prediction(&pending.scenario);
        self.apply_prediction(pending, result)?;
        self.prediction.as_ref().ok_or(DashboardError::NoPrediction)
    }

    /// Resubmit the current form.
    pub fn retry_prediction(&mut self) -> Result<&PredictionOutcome, DashboardError> {
        self.predict()
    }

    /// Validate the form and issue a prediction request for it. A form that
    /// does not validate leaves all state untouched.
    pub fn begin_prediction(&mut self) -> Result<PendingPrediction, DashboardError> {
        let scenario = self.form.validate()?;
        self.api_error = None;
        let token = self.prediction_requests.issue();
        debug!(?token, country = %scenario.country, "Prediction request issued");
        Ok(PendingPrediction { token, scenario })
    }

    /// Submit the scenario, loading the history first-hand when the timeline
    /// has none yet.
    fn request_prediction(
        &mut self,
        scenario: &ScenarioInput,
    ) -> client::Result<PredictionResponse> {
        let response = self.client.submit_prediction(&PredictionRequest::from(scenario))?;
        if needs_history(&self.timeline) {
            debug!(country = %scenario.country, "Timeline has no history, fetching it");
            let points = self.client.fetch_history(&scenario.country)?;
            self.timeline = transform_historical_data(&points);
            self.is_estimated = false;
            self.history_error = None;
        }
        Ok(response)
    }

    /// Apply a prediction response. Returns `Ok(false)` when the request has
    /// been superseded. A failure records the error and keeps the previous
    /// prediction.
    pub fn apply_prediction(
        &mut self,
        pending: PendingPrediction,
        result: client::Result<PredictionResponse>,
    ) -> Result<bool, DashboardError> {
        if !self.prediction_requests.is_latest(pending.token) {
            debug!(token = ?pending.token, "Discarding stale prediction response");
            return Ok(false);
        }

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let error = handle_api_error(&e);
                warn!(country = %pending.scenario.country, "Prediction failed: {}", error);
                self.api_error = Some(error.clone());
                return Err(DashboardError::Api(error));
            }
        };

        let outcome = match compute::analyze_prediction(&pending.scenario, &response) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.api_error = Some(handle_api_error(&e));
                return Err(e.into());
            }
        };

        let history = historical_only(&self.timeline);
        self.timeline = add_prediction_to_timeline(outcome.predicted_growth, &history);
        info!(
            country = %outcome.country(),
            predicted = outcome.predicted_growth,
            confidence = outcome.confidence,
            "Prediction applied"
        );
        self.prediction = Some(outcome);
        Ok(true)
    }

    /// The prediction against the recent timeline trend.
    pub fn trend_comparison(&self) -> Option<TrendComparison> {
        let prediction = self.prediction.as_ref()?;
        let trend = recent_trend(&self.timeline)?;
        Some(TrendComparison {
            trend: round2(trend),
            predicted: prediction.predicted_growth,
        })
    }

    /// Recent trend formatted with two decimals.
    pub fn recent_trend_text(&self) -> Option<String> {
        recent_trend(&self.timeline).map(|trend| format_fixed(trend, 2))
    }

    // ===================== Lifecycle =====================

    /// Clear the six fields and the prediction, keeping the country.
    pub fn reset(&mut self) {
        self.form.clear_fields();
        self.prediction = None;
        debug!("Scenario reset");
    }

    /// Leave the screen: clear everything and invalidate outstanding requests.
    pub fn leave(&mut self) {
        self.form = ScenarioForm::new();
        self.timeline.clear();
        self.is_estimated = false;
        self.history_error = None;
        self.api_error = None;
        self.prediction = None;
        self.history_requests.issue();
        self.prediction_requests.issue();
        debug!("Dashboard left");
    }

    // ===================== Export =====================

    /// Render the report of the current prediction into `dir`.
    pub fn export_report(
        &self,
        dir: &Path,
        generated_on: NaiveDate,
    ) -> Result<PathBuf, DashboardError> {
        let outcome = self.prediction.as_ref().ok_or(DashboardError::NoPrediction)?;
        let data = ReportData {
            outcome,
            timeline: &self.timeline,
            generated_on,
        };
        let path = report::export_scenario_report(&data, dir)?;
        info!(path = %path.display(), "Report exported");
        Ok(path)
    }
}
