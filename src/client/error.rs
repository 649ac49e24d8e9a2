use common::{ApiErrorInfo, ErrorCode};
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to connect to the server. Please check your connection and try again.";
pub const TIMEOUT_ERROR_MESSAGE: &str = "Request timed out. Please try again.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Failure of a call to the prediction service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The service could not be reached (DNS, connect, reset, timeout)
    #[error("Failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    /// The service answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Case-sensitive, so a "Gateway Timeout" status text passes through.
    fn mentions_timeout(text: &str) -> bool {
        text.contains("timeout") || text.contains("timed out")
    }
}

/// Map any error to the user-facing message and code.
///
/// Transport failures become `NETWORK_ERROR` (or `TIMEOUT_ERROR` when the
/// transport reports a timeout). Every other error is passed through with
/// its own message, classified `TIMEOUT_ERROR` only if that message talks
/// about timing out. An error without a message is `UNKNOWN_ERROR`.
pub fn handle_api_error(error: &(dyn std::error::Error + 'static)) -> ApiErrorInfo {
    if let Some(ClientError::Transport { message, .. }) = error.downcast_ref::<ClientError>() {
        if ClientError::mentions_timeout(message) {
            return ApiErrorInfo::new(TIMEOUT_ERROR_MESSAGE, Some(ErrorCode::Timeout));
        }
        return ApiErrorInfo::new(NETWORK_ERROR_MESSAGE, Some(ErrorCode::Network));
    }

    let message = error.to_string();
    if message.trim().is_empty() {
        return ApiErrorInfo::new(UNKNOWN_ERROR_MESSAGE, Some(ErrorCode::Unknown));
    }
    if ClientError::mentions_timeout(&message) {
        return ApiErrorInfo::new(TIMEOUT_ERROR_MESSAGE, Some(ErrorCode::Timeout));
    }
    ApiErrorInfo::new(message, None)
}
