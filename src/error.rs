// SPDX-License-Identifier: MIT

//! API error type shared by every backend call.

/// Error raised by the API client.
///
/// Every failure mode of a backend call collapses into this one type so that
/// callers can handle transport problems, HTTP errors and bad payloads with a
/// single match.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No HTTP response was received at all (refused connection, DNS, ...).
    #[error("Network error: Unable to connect to server. Please check if the backend is running.")]
    Unreachable(#[source] reqwest::Error),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's `detail` field when the body parsed as
    /// JSON and carried one, otherwise a generic `HTTP <status>: <reason>`
    /// line. `raw` keeps the parsed body for callers that want more.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        raw: Option<serde_json::Value>,
    },

    /// A success response whose body could not be parsed as the expected type.
    #[error("Invalid response from server: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status of the failure; 0 when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => *status,
            ApiError::Unreachable(_) | ApiError::Decode(_) => 0,
        }
    }

    /// True for failures where no response arrived from the backend.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Unreachable(_))
    }
}

/// Result type alias for API calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
