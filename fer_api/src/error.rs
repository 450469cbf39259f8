//! # API Error Types
//!
//! Failures from the backend keep their HTTP status and the human-readable
//! message extracted from the response body (`error` or `message` field,
//! falling back to a generic string). A 401 is a state, not an error worth
//! alerting about: callers check [`ApiError::is_unauthorized`] and treat it
//! as "logged out".

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Error type for backend calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-2xx status; `message` comes from the
    /// response body when present
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never completed (DNS, TLS, timeout, connection reset)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded as the expected shape
    #[error("Failed to parse response: {reason}")]
    Decode { reason: String },
}

/// Error payload shape used by the backend for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ApiError {
    /// Build a status error from a response body, applying the
    /// `error`-then-`message` extraction rule.
    pub fn from_status(status: u16, body: &str) -> Self {
        let fallback = format!("Request failed ({status})");
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or(fallback);
        ApiError::Status { status, message }
    }

    /// HTTP status of the failure, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Decode { .. } => None,
        }
    }

    /// True for a 401: the user is simply not authenticated.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
