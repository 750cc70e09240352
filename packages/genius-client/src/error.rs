//! Genius API error types

use thiserror::Error;

/// Genius API client errors
#[derive(Error, Debug)]
pub enum GeniusError {
    /// No access token configured for a call that needs one
    #[error("access token is required for Genius API access")]
    MissingCredential,

    /// Invalid input provided to API method
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Genius answered with a non-success status
    #[error("Genius API returned status {status}: {message}")]
    Remote { status: u16, message: String },

    /// Request timeout
    #[error("Request to Genius timed out after {0} seconds")]
    Timeout(u64),

    /// Response body was not the JSON shape we expect
    #[error("Malformed Genius response: {0}")]
    MalformedResponse(String),
}

impl GeniusError {
    /// HTTP status observed on the wire, if the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            GeniusError::Remote { status, .. } => Some(*status),
            GeniusError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error came from talking to the remote service
    ///
    /// Timeouts and transport failures count as remote failures alongside
    /// non-success statuses.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            GeniusError::Remote { .. } | GeniusError::Timeout(_) | GeniusError::Http(_)
        )
    }
}

impl From<serde_json::Error> for GeniusError {
    fn from(e: serde_json::Error) -> Self {
        GeniusError::MalformedResponse(e.to_string())
    }
}

/// Result type for Genius operations
pub type GeniusResult<T> = Result<T, GeniusError>;
