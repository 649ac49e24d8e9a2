//! Remote data client for the prediction service.
//!
//! Three single-shot JSON-over-HTTP operations: list countries, fetch a
//! country's historical series, submit a scenario for prediction. No retry,
//! no cancellation; failures are reported as [`ClientError`] and turned into
//! user-facing text by [`handle_api_error`].

pub mod error;

use common::{HistoricalDataPoint, PredictionRequest, PredictionResponse};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace, warn};

pub use error::{ClientError, handle_api_error};

pub type Result<T> = std::result::Result<T, ClientError>;

/// Characters left as-is in a query component: alphanumerics and
/// `- _ . ! ~ * ' ( )`. A space becomes `%20`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The operations the dashboard needs from the prediction service.
pub trait PredictionApi {
    fn list_countries(&self) -> Result<Vec<String>>;
    fn fetch_history(&self, country: &str) -> Result<Vec<HistoricalDataPoint>>;
    fn submit_prediction(&self, request: &PredictionRequest) -> Result<PredictionResponse>;
}

/// Error body the service may send with a failed `/simulate` call. Every
/// field is optional: the shape is not guaranteed.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }
}

/// Blocking HTTP implementation of [`PredictionApi`].
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    agent: ureq::Agent,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Attach `Authorization: Bearer <token>` to every request.
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        match &self.bearer_token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token.trim())),
            None => request,
        }
    }

    /// Shared GET handler: any non-success status fails with
    /// `<failure>: <status text>`.
    fn get_json<T: DeserializeOwned>(
        &self,
        request: ureq::Request,
        url: &str,
        failure: &str,
    ) -> Result<T> {
        debug!("GET request to: {}", url);
        let response = match self.authorize(request).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let message = format!("{}: {}", failure, response.status_text());
                warn!("GET {} - Non-OK response: {}", url, code);
                return Err(ClientError::Status {
                    status: code,
                    message,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                error!("GET {} - Request failed: {}", url, transport);
                return Err(ClientError::Transport {
                    url: url.to_string(),
                    message: transport.to_string(),
                });
            }
        };

        trace!("GET {} - Response received, parsing JSON", url);
        let data = decode(response, url)?;
        info!("GET {} - Success", url);
        Ok(data)
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response, url: &str) -> Result<T> {
    response.into_json::<T>().map_err(|e| {
        error!("{} - Failed to parse response: {}", url, e);
        ClientError::Decode(e.to_string())
    })
}

impl PredictionApi for HttpApiClient {
    #[instrument(skip(self))]
    fn list_countries(&self) -> Result<Vec<String>> {
        let url = self.url("/api/countries");
        let countries: Vec<String> =
            self.get_json(self.agent.get(&url), &url, "Failed to fetch countries")?;
        debug!(count = countries.len(), "Countries loaded");
        Ok(countries)
    }

    #[instrument(skip(self))]
    fn fetch_history(&self, country: &str) -> Result<Vec<HistoricalDataPoint>> {
        let url = format!(
            "{}?country={}",
            self.url("/api/history"),
            utf8_percent_encode(country, QUERY_COMPONENT)
        );
        self.get_json(self.agent.get(&url), &url, "Failed to fetch historical data")
    }

    #[instrument(skip(self, request), fields(country = %request.country))]
    fn submit_prediction(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        let url = self.url("/simulate");
        debug!("POST request to: {}", url);

        let call = self
            .authorize(self.agent.post(&url))
            .set("Content-Type", "application/json")
            .send_json(request);

        let response = match call {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                warn!("POST {} - Non-OK response: {}", url, code);
                let status_text = response.status_text().to_string();
                let body = response.into_string().unwrap_or_default();
                let message = match ErrorBody::parse(&body).message() {
                    Some(message) => {
                        error!("POST {} - API error: {}", url, message);
                        message.to_string()
                    }
                    None => format!("Scenario simulation failed: {}", status_text),
                };
                return Err(ClientError::Status {
                    status: code,
                    message,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                error!("POST {} - Request failed: {}", url, transport);
                return Err(ClientError::Transport {
                    url,
                    message: transport.to_string(),
                });
            }
        };

        trace!("POST {} - Response received, parsing JSON", url);
        let prediction: PredictionResponse = decode(response, &url)?;
        info!("POST {} - Success", url);
        Ok(prediction)
    }
}
