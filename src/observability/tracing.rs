//! Tracing subscriber setup and log-safe formatting.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::WebserviceError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `twitter_webservice=debug`.
    pub level: String,
    pub format: OutputFormat,
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: OutputFormat::Text,
            with_target: true,
        }
    }
}

impl TracingConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Install a global `fmt` subscriber. `RUST_LOG` wins over `config.level`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> Result<(), WebserviceError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            WebserviceError::ConfigurationError(format!(
                "Invalid log filter '{}': {e}",
                config.level
            ))
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target);

    let result = match config.format {
        OutputFormat::Text => builder.try_init(),
        OutputFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| WebserviceError::ConfigurationError(format!("Tracing init failed: {e}")))
}

/// Shorten a credential for logging: `Bearer AAAA...wxyz`.
pub fn mask_sensitive_value(value: &str) -> String {
    fn ends(value: &str, head: usize, tail: usize) -> String {
        let chars: Vec<char> = value.chars().collect();
        let start: String = chars[..head].iter().collect();
        let end: String = chars[chars.len() - tail..].iter().collect();
        format!("{start}...{end}")
    }

    if let Some(token) = value.strip_prefix("Bearer ")
        && token.chars().count() > 8
    {
        return format!("Bearer {}", ends(token, 4, 4));
    }
    match value.chars().count() {
        0 => String::new(),
        n if n > 16 => ends(value, 6, 4),
        _ => "***".to_string(),
    }
}
