use common::Indicator;
use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, PartialEq)]
pub enum ComputeError {
    /// A rate reached the arithmetic as `NaN` or infinity
    #[error("{indicator} growth rate is not a finite number")]
    NonFiniteRate { indicator: Indicator },

    /// The predicted value returned by the service is not usable
    #[error("Predicted growth is not a finite number: {0}")]
    NonFinitePrediction(f64),

    /// Invalid input to the growth-rate calculator
    #[error("Growth calculation error: {0}")]
    GrowthCalculation(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
