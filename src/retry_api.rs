//! Caller-side retry helper.
//!
//! The webservice never retries on its own. Callers that want to ride out
//! rate limits or transient server errors can wrap a call here:
//!
//! ```rust,ignore
//! use twitter_webservice::retry_api::{retry_with_backoff, RetryOptions};
//!
//! let timeline = retry_with_backoff(&RetryOptions::default(), || {
//!     webservice.find(&StatusesEndpoint, &query)
//! })
//! .await?;
//! ```

use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::WebserviceError;

/// Backoff configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryOptions {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub multiplier: f64,
    /// Give up after this much time; `None` retries forever.
    pub max_elapsed_time: Option<Duration>,
}

impl Default for RetryOptions {
    fn default() -> Self {
        // Rate-limit windows are 15 minutes long.
        Self {
            initial_interval: Duration::from_millis(1000),
            max_interval: Duration::from_secs(60),
            multiplier: 2.0,
            max_elapsed_time: Some(Duration::from_secs(15 * 60)),
        }
    }
}

impl RetryOptions {
    pub fn with_max_elapsed_time(mut self, max: Option<Duration>) -> Self {
        self.max_elapsed_time = max;
        self
    }

    pub fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_interval)
            .with_max_interval(self.max_interval)
            .with_multiplier(self.multiplier)
            .with_max_elapsed_time(self.max_elapsed_time)
            .build()
    }
}

/// Map an error to a backoff decision, honouring the rate-limit reset time.
fn to_backoff_error(err: WebserviceError) -> backoff::Error<WebserviceError> {
    if !err.is_retryable() {
        return backoff::Error::permanent(err);
    }
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    match err.retry_after(now) {
        Some(delay) => backoff::Error::retry_after(err, delay),
        None => backoff::Error::transient(err),
    }
}

/// Retry `operation` while it fails with a retryable error.
pub async fn retry_with_backoff<F, Fut, T>(
    options: &RetryOptions,
    operation: F,
) -> Result<T, WebserviceError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, WebserviceError>>,
{
    let operation = &operation;
    backoff::future::retry_notify(
        options.backoff(),
        move || {
            let fut = operation();
            async move { fut.await.map_err(to_backoff_error) }
        },
        |err: WebserviceError, delay: Duration| {
            warn!(error = %err, delay_ms = delay.as_millis() as u64, "Retrying Twitter request");
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryOptions {
        RetryOptions::default()
            .with_initial_interval(Duration::from_millis(1))
            .with_max_elapsed_time(Some(Duration::from_secs(5)))
    }

    #[tokio::test]
    async fn retries_server_errors_until_success() {
        let attempts = Arc::new(AtomicU32::new(0));
        let result = retry_with_backoff(&fast(), || {
            let attempts = attempts.clone();
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(WebserviceError::unknown(503, "Over capacity"))
                } else {
                    Ok("done")
                }
            }
        })
        .await;
        assert_eq!(result, Ok("done"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_errors_are_returned_immediately() {
        let attempts = Arc::new(AtomicU32::new(0));
        let result: Result<(), _> = retry_with_backoff(&fast(), || {
            let attempts = attempts.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(WebserviceError::unknown(401, "Could not authenticate you."))
            }
        })
        .await;
        assert_eq!(
            result,
            Err(WebserviceError::unknown(401, "Could not authenticate you."))
        );
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rate_limits_with_a_future_reset_wait_for_it() {
        let reset = chrono::Utc::now().timestamp() as u64 + 30;
        let err = WebserviceError::rate_limited("Rate limit exceeded", Some(reset));
        match to_backoff_error(err) {
            backoff::Error::Transient {
                retry_after: Some(delay),
                ..
            } => assert!(delay <= Duration::from_secs(30)),
            other => panic!("unexpected decision: {other:?}"),
        }
    }
}
