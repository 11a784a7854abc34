//! Core error type shared by the translator, classifier and transports.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the Twitter webservice.
///
/// `NotFound` is the only variant absorbed locally, and only on reads, where
/// it becomes an empty result collection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WebserviceError {
    /// The API answered 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API answered 429.
    #[error("Rate limit exceeded ({code}): {message}")]
    RateLimitExceeded {
        message: String,
        code: u16,
        /// Unix timestamp from `x-rate-limit-reset`, when the API sent one.
        reset_at: Option<u64>,
    },

    /// Any other non-2xx answer on a read.
    #[error("Unknown error ({status}): {message}")]
    UnknownError { status: u16, message: String },

    /// A create/update/delete call came back without a 2xx status.
    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// Transport level failure (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// A 2xx body that could not be interpreted.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl WebserviceError {
    /// Shorthand for a 429 classification.
    pub fn rate_limited(message: impl Into<String>, reset_at: Option<u64>) -> Self {
        Self::RateLimitExceeded {
            message: message.into(),
            code: 429,
            reset_at,
        }
    }

    /// Shorthand for an unclassified non-2xx read.
    pub fn unknown(status: u16, message: impl Into<String>) -> Self {
        Self::UnknownError {
            status,
            message: message.into(),
        }
    }

    /// HTTP status associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::RateLimitExceeded { code, .. } => Some(*code),
            Self::UnknownError { status, .. } | Self::RequestFailed { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Whether a caller-side retry has a chance of succeeding.
    ///
    /// The webservice itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimitExceeded { .. } | Self::HttpError(_) => true,
            Self::UnknownError { status, .. } | Self::RequestFailed { status, .. } => {
                (500..=599).contains(status)
            }
            _ => false,
        }
    }

    /// Delay until the rate-limit window resets, relative to `now` (unix seconds).
    pub fn retry_after(&self, now: u64) -> Option<Duration> {
        match self {
            Self::RateLimitExceeded {
                reset_at: Some(reset),
                ..
            } if *reset > now => Some(Duration::from_secs(reset - now)),
            _ => None,
        }
    }

    /// The API-provided message, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(message)
            | Self::HttpError(message)
            | Self::JsonError(message)
            | Self::ParseError(message)
            | Self::ConfigurationError(message) => message,
            Self::RateLimitExceeded { message, .. }
            | Self::UnknownError { message, .. }
            | Self::RequestFailed { message, .. } => message,
        }
    }
}
