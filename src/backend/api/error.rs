//! Errors returned by the API client.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Shown for transport failures, whatever the underlying cause.
pub const NETWORK_ERROR_MESSAGE: &str = "Network response was not ok";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network(#[source] reqwest::Error),
    /// The server answered 401.
    #[error("{message}")]
    Unauthorized { message: String },
    /// Any other non-2xx answer.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// A 2xx answer whose body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("Invalid API configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Builds the error for a non-2xx response from its raw body.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let message = extract_message(body).unwrap_or_else(|| fallback_message(status));
        if status == StatusCode::UNAUTHORIZED {
            Self::Unauthorized { message }
        } else {
            Self::Status {
                status: status.as_u16(),
                message,
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::Config(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Reads `{ "message": "..." }` (or `error`) from a failure body.
pub fn extract_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn fallback_message(status: StatusCode) -> String {
    match status {
        StatusCode::UNAUTHORIZED => "Your session is not authorized. Please log in again.".to_string(),
        StatusCode::FORBIDDEN => "You do not have permission to perform this action.".to_string(),
        StatusCode::NOT_FOUND => "The requested resource was not found.".to_string(),
        s if s.is_server_error() => format!("Server error ({})", s.as_u16()),
        s => format!("Request failed with status {}", s.as_u16()),
    }
}
