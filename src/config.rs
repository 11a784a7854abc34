//! Webservice configuration.

use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::defaults;
use crate::error::WebserviceError;
use crate::types::HttpConfig;

/// Environment variable holding the API origin.
pub const ENV_API_URL: &str = "TWITTER_API_URL";
/// Environment variable holding an app-only bearer token.
pub const ENV_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "TWITTER_TIMEOUT_SECS";

/// Configuration for the default transport.
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    /// Origin the `/1.1/...` paths are joined to (default: https://api.twitter.com)
    pub api_url: String,
    /// Optional bearer token sent as `Authorization: Bearer ...`
    pub bearer_token: Option<SecretString>,
    pub http: HttpConfig,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::api::API_URL.to_string(),
            bearer_token: None,
            http: HttpConfig::default(),
        }
    }
}

/// On-disk shape of the configuration.
#[derive(Debug, Deserialize)]
struct TwitterConfigFile {
    #[serde(default = "default_api_url")]
    api_url: String,
    #[serde(default)]
    bearer_token: Option<String>,
    #[serde(default)]
    http: HttpConfig,
}

fn default_api_url() -> String {
    defaults::api::API_URL.to_string()
}

impl TwitterConfig {
    pub fn builder() -> TwitterConfigBuilder {
        TwitterConfigBuilder::default()
    }

    /// Defaults overridden by `TWITTER_API_URL`, `TWITTER_BEARER_TOKEN` and `TWITTER_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, WebserviceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WebserviceError> {
        let mut builder = Self::builder();
        if let Some(url) = lookup(ENV_API_URL) {
            builder = builder.api_url(url);
        }
        if let Some(token) = lookup(ENV_BEARER_TOKEN).filter(|t| !t.trim().is_empty()) {
            builder = builder.bearer_token(token);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                WebserviceError::ConfigurationError(format!("Invalid {ENV_TIMEOUT_SECS} '{raw}': {e}"))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, WebserviceError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            WebserviceError::ConfigurationError(format!("Cannot read {}: {e}", path.display()))
        })?;
        let file: TwitterConfigFile = serde_json::from_str(&raw)?;
        let mut builder = Self::builder().api_url(file.api_url).http(file.http);
        if let Some(token) = file.bearer_token {
            builder = builder.bearer_token(token);
        }
        builder.build()
    }
}

/// Builder for `TwitterConfig`
#[derive(Debug, Default)]
pub struct TwitterConfigBuilder {
    api_url: Option<String>,
    bearer_token: Option<SecretString>,
    http: Option<HttpConfig>,
    timeout: Option<Duration>,
}

impl TwitterConfigBuilder {
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(SecretString::from(token.into()));
        self
    }

    pub fn http(mut self, http: HttpConfig) -> Self {
        self.http = Some(http);
        self
    }

    /// Request timeout, applied on top of the HTTP configuration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<TwitterConfig, WebserviceError> {
        let api_url = self
            .api_url
            .unwrap_or_else(default_api_url)
            .trim_end_matches('/')
            .to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(WebserviceError::ConfigurationError(format!(
                "API URL must be absolute, got '{api_url}'"
            )));
        }

        let mut http = self.http.unwrap_or_default();
        if let Some(timeout) = self.timeout {
            http.timeout = timeout;
        }

        Ok(TwitterConfig {
            api_url,
            bearer_token: self.bearer_token,
            http,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_the_public_api() {
        let config = TwitterConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, "https://api.twitter.com");
        assert!(config.bearer_token.is_none());
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = TwitterConfig::from_lookup(lookup(&[
            (ENV_API_URL, "http://localhost:8080/"),
            (ENV_BEARER_TOKEN, "AAAA-token"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(
            config.bearer_token.as_ref().map(|t| t.expose_secret().to_string()),
            Some("AAAA-token".to_string())
        );
        assert_eq!(config.http.timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_timeout_is_a_configuration_error() {
        let err = TwitterConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, WebserviceError::ConfigurationError(_)));
    }

    #[test]
    fn relative_api_url_is_rejected() {
        let err = TwitterConfig::builder().api_url("api.twitter.com").build().unwrap_err();
        assert!(matches!(err, WebserviceError::ConfigurationError(_)));
    }

    #[test]
    fn json_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"api_url": "https://example.test", "bearer_token": "t", "http": {{"timeout": 3}}}}"#
        )
        .unwrap();

        let config = TwitterConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.api_url, "https://example.test");
        assert!(config.bearer_token.is_some());
        assert_eq!(config.http.timeout, Duration::from_secs(3));
    }

    #[test]
    fn secrets_are_not_printed() {
        let config = TwitterConfig::builder().bearer_token("super-secret").build().unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
