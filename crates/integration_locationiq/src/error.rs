//! LocationIQ error types
//!
//! Every failed call is classified by HTTP status into one of five kinds.
//! Network and timeout failures carry a synthetic status of 500.

use thiserror::Error;

/// Message used for every 404 response, regardless of the body
pub const NOT_FOUND_MESSAGE: &str = "No location or places were found for the given input";

/// Status reported for failures that never produced an HTTP response
pub const SYNTHETIC_SERVER_ERROR_STATUS: u16 = 500;

/// Errors returned by the LocationIQ API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No location or places matched the input (404)
    #[error("Response Code {status}: {message}")]
    NotFound {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// The API key is invalid or not active (401)
    #[error("Response Code {status}: {message}")]
    InvalidKey {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Required parameters are missing or invalid (400)
    #[error("Response Code {status}: {message}")]
    InvalidRequest {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Per-second, per-minute or per-day rate limit exceeded (429)
    #[error("Response Code {status}: {message}")]
    RateLimited {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Any other failure, including network errors and timeouts
    #[error("Response Code {status}: {message}")]
    ServerError {
        /// HTTP status code (500 when no response was received)
        status: u16,
        /// Error message
        message: String,
    },
}

impl ApiError {
    /// Classify a failed response by its HTTP status code
    ///
    /// A 404 always carries [`NOT_FOUND_MESSAGE`]; the given message is
    /// kept for every other status.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => Self::NotFound {
                status,
                message: NOT_FOUND_MESSAGE.to_string(),
            },
            401 => Self::InvalidKey { status, message },
            400 => Self::InvalidRequest { status, message },
            429 => Self::RateLimited { status, message },
            _ => Self::ServerError { status, message },
        }
    }

    /// Failure that produced no HTTP response (connect error, timeout, ...)
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::ServerError {
            status: SYNTHETIC_SERVER_ERROR_STATUS,
            message: message.into(),
        }
    }

    /// HTTP status code carried by this error
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::NotFound { status, .. }
            | Self::InvalidKey { status, .. }
            | Self::InvalidRequest { status, .. }
            | Self::RateLimited { status, .. }
            | Self::ServerError { status, .. } => *status,
        }
    }

    /// Error message carried by this error
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message, .. }
            | Self::InvalidKey { message, .. }
            | Self::InvalidRequest { message, .. }
            | Self::RateLimited { message, .. }
            | Self::ServerError { message, .. } => message,
        }
    }

    /// Returns true if the lookup succeeded but matched nothing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the same call may succeed later
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::ServerError { .. })
    }
}
