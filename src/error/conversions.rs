//! From implementations for foreign error types.

use super::types::WebserviceError;

impl From<reqwest::Error> for WebserviceError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for WebserviceError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
