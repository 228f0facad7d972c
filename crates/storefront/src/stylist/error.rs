//! Error types for the stylist API client.

use thiserror::Error;

/// Errors that can occur when asking the text-generation API for advice.
#[derive(Debug, Error)]
pub enum StylistError {
    /// No API key was configured.
    #[error("no stylist API key configured")]
    MissingCredential,

    /// The configured API key cannot be sent as a header.
    #[error("stylist API key contains invalid header characters")]
    InvalidCredential,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited")]
    RateLimited,

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The request did not complete in time.
    #[error("timed out after {0} ms")]
    Timeout(u64),
}

impl StylistError {
    /// Whether another attempt could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited | Self::Timeout(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::MissingCredential | Self::InvalidCredential | Self::Parse(_) => false,
        }
    }
}

/// Error body returned by the Gemini API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details. Only the message is surfaced.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Error message.
    pub message: String,
}
