//! Common transport-layer and domain types shared by the client, the compute
//! module and the report renderer. The wire structs mirror the prediction
//! service's JSON payloads so no crate has to duplicate their shapes.

pub mod converters;
mod indicator;
mod prediction;
mod timeseries;

pub use converters::{format_fixed, format_number, round2, round_fixed};
pub use indicator::{Indicator, IndicatorRates, ScenarioInput};
pub use prediction::{ContributionEntry, PredictionOutcome, PredictionRequest, PredictionResponse};
pub use timeseries::{ChartDataPoint, HistoricalDataPoint, PointKind};

use serde::{Deserialize, Serialize};
use std::fmt;

// ===================== Errors =====================

/// Machine-readable classification of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "NETWORK_ERROR")]
    Network,
    #[serde(rename = "TIMEOUT_ERROR")]
    Timeout,
    #[serde(rename = "UNKNOWN_ERROR")]
    Unknown,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Network => "NETWORK_ERROR",
            ErrorCode::Timeout => "TIMEOUT_ERROR",
            ErrorCode::Unknown => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing description of a failure. `code` is `None` for messages that
/// are passed through unclassified (e.g. a service-reported error).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorInfo {
    pub message: String,
    pub code: Option<ErrorCode>,
}

impl ApiErrorInfo {
    pub fn new(message: impl Into<String>, code: Option<ErrorCode>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

impl fmt::Display for ApiErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_wire_names() {
        assert_eq!(serde_json::to_value(ErrorCode::Network).unwrap(), "NETWORK_ERROR");
        assert_eq!(ErrorCode::Timeout.to_string(), "TIMEOUT_ERROR");
    }

    #[test]
    fn test_api_error_display() {
        let info = ApiErrorInfo::new("Request timed out. Please try again.", Some(ErrorCode::Timeout));
        assert_eq!(info.to_string(), "Request timed out. Please try again. (TIMEOUT_ERROR)");
        assert_eq!(ApiErrorInfo::new("boom", None).to_string(), "boom");
    }
}
