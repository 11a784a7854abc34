//! Error handling types for the Twitter webservice.
//!
//! # Example
//!
//! ```rust,ignore
//! use twitter_webservice::error::WebserviceError;
//!
//! let error = WebserviceError::rate_limited("Rate limit exceeded", None);
//! assert_eq!(error.status_code(), Some(429));
//! assert!(error.is_retryable());
//! ```

mod conversions;
pub mod types;

pub use types::*;
