//! The default `reqwest` transport.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use tracing::debug;

use super::transport::{HttpTransport, HttpTransportResponse};
use crate::config::TwitterConfig;
use crate::error::WebserviceError;
use crate::observability::tracing::mask_sensitive_value;
use crate::types::{HttpConfig, Params};

/// Extra headers from the configuration, validated.
fn default_headers(config: &HttpConfig) -> Result<HeaderMap, WebserviceError> {
    config
        .headers
        .iter()
        .map(|(name, value)| {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                WebserviceError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                WebserviceError::ConfigurationError(format!("Invalid value for header '{name}': {e}"))
            })?;
            Ok((name, value))
        })
        .collect()
}

/// Client for the default transport: timeouts, user agent, proxy and extra headers.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, WebserviceError> {
    let mut builder = reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.as_str())
        .default_headers(default_headers(config)?);

    if let Some(proxy) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| WebserviceError::ConfigurationError(format!("Invalid proxy '{proxy}': {e}")))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| WebserviceError::HttpError(format!("Cannot build HTTP client: {e}")))
}

/// Transport over `reqwest`: GET query strings, POST form bodies.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    api_url: String,
    bearer_token: Option<SecretString>,
}

impl ReqwestTransport {
    /// Build a transport (and its client) from configuration.
    pub fn new(config: &TwitterConfig) -> Result<Self, WebserviceError> {
        let client = build_client(&config.http)?;
        debug!(
            api_url = %config.api_url,
            bearer = %config
                .bearer_token
                .as_ref()
                .map(|t| mask_sensitive_value(t.expose_secret()))
                .unwrap_or_default(),
            "Building Twitter transport"
        );
        Ok(Self::with_client(client, &config.api_url)
            .with_bearer_token(config.bearer_token.clone()))
    }

    /// Wrap an existing client. `api_url` is the origin the `/1.1/...` paths are joined to.
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: Option<SecretString>) -> Self {
        self.bearer_token = token;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn read_response(
        resp: reqwest::Response,
    ) -> Result<HttpTransportResponse, WebserviceError> {
        let status = resp.status().as_u16();
        let headers: HashMap<String, String> = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = resp.bytes().await?.to_vec();
        debug!(status, body_len = body.len(), "Twitter response received");
        Ok(HttpTransportResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<HttpTransportResponse, WebserviceError> {
        let url = self.endpoint_url(url);
        debug!(method = "GET", url = %url, "Sending Twitter request");
        let resp = self
            .authorize(self.client.get(&url).query(params))
            .send()
            .await?;
        Self::read_response(resp).await
    }

    async fn post(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<HttpTransportResponse, WebserviceError> {
        let url = self.endpoint_url(url);
        debug!(method = "POST", url = %url, "Sending Twitter request");
        let mut builder = self.client.post(&url);
        if !params.is_empty() {
            builder = builder.form(params);
        }
        let resp = self.authorize(builder).send().await?;
        Self::read_response(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_a_client() {
        assert!(build_client(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn header_with_a_space_in_its_name_is_a_configuration_error() {
        let config = HttpConfig::default().with_header("X Client", "cron");
        let err = build_client(&config).unwrap_err();
        assert!(matches!(err, WebserviceError::ConfigurationError(msg) if msg.contains("X Client")));
    }

    #[test]
    fn configured_headers_become_default_headers() {
        let config = HttpConfig::default().with_header("X-Client", "cron");
        let headers = default_headers(&config).unwrap();
        assert_eq!(headers.get("x-client").map(|v| v.to_str().unwrap()), Some("cron"));
    }

    #[test]
    fn unparsable_proxy_is_a_configuration_error() {
        let config = HttpConfig::default().with_proxy("not a url");
        assert!(matches!(
            build_client(&config),
            Err(WebserviceError::ConfigurationError(_))
        ));
    }

    #[test]
    fn endpoint_url_joins_origin_and_path() {
        let transport =
            ReqwestTransport::with_client(reqwest::Client::new(), "https://api.twitter.com/");
        assert_eq!(
            transport.endpoint_url("/1.1/lists/list.json"),
            "https://api.twitter.com/1.1/lists/list.json"
        );
        assert_eq!(
            transport.endpoint_url("https://upload.twitter.com/1.1/media/upload.json"),
            "https://upload.twitter.com/1.1/media/upload.json"
        );
    }
}
