//! HTTP transport abstraction.
//!
//! The webservice never talks to the network directly: it hands a translated
//! request to an injectable transport and classifies whatever comes back.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::WebserviceError;
use crate::types::{HttpMethod, Params, RequestDescriptor};

/// Transport-level response data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpTransportResponse {
    pub status: u16,
    /// Response headers with lowercased names.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpTransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Response with a serialized JSON body.
    pub fn json_body(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// 2xx check.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Raw body text (lossy UTF-8).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// True when the API sent no content.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Parsed JSON body; `None` for empty or non-JSON bodies.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Custom HTTP transport.
///
/// Implementations must be safe to share across tasks; the webservice keeps
/// one behind an `Arc` and issues independent calls through it.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET with query parameters.
    async fn get(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<HttpTransportResponse, WebserviceError>;

    /// POST with form parameters.
    async fn post(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<HttpTransportResponse, WebserviceError>;

    /// Dispatch a translated request on its method.
    async fn send(
        &self,
        request: &RequestDescriptor,
    ) -> Result<HttpTransportResponse, WebserviceError> {
        match request.method {
            HttpMethod::Get => self.get(&request.url, &request.params).await,
            HttpMethod::Post => self.post(&request.url, &request.params).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_is_any_2xx() {
        assert!(HttpTransportResponse::new(200, "").is_success());
        assert!(HttpTransportResponse::new(204, "").is_success());
        assert!(!HttpTransportResponse::new(304, "").is_success());
        assert!(!HttpTransportResponse::new(404, "").is_success());
    }

    #[test]
    fn json_is_none_for_text_and_empty_bodies() {
        assert!(HttpTransportResponse::new(500, "Internal Error").json().is_none());
        assert!(HttpTransportResponse::new(200, "  ").json().is_none());
        assert!(HttpTransportResponse::new(200, "  ").is_empty());
        let resp = HttpTransportResponse::json_body(200, &json!({"id": 1}));
        assert_eq!(resp.json(), Some(json!({"id": 1})));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let resp = HttpTransportResponse::new(429, "").with_header("X-Rate-Limit-Reset", "99");
        assert_eq!(resp.header("x-rate-limit-reset"), Some("99"));
        assert_eq!(resp.header("X-RATE-LIMIT-RESET"), Some("99"));
    }
}
