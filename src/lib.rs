//! # twitter-webservice
//!
//! Translates generic CRUD queries (find/create/update/delete against an
//! endpoint) into Twitter REST API v1.1 calls and normalizes the JSON
//! responses back into entity records.
//!
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,no_run
//! use twitter_webservice::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), WebserviceError> {
//!     let config = TwitterConfig::from_env()?;
//!     let webservice = TwitterWebservice::from_config(&config)?;
//!
//!     let query = Query::read().where_eq("screen_name", "rustlang").limit(20);
//!     let found = webservice.find(&StatusesEndpoint, &query).await?;
//!     for status in found.iter() {
//!         println!("{:?}", status.get_str("text"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod defaults;
pub mod endpoint;
pub mod error;
pub mod execution;
pub mod observability;
pub mod retry_api;
pub mod types;
pub mod webservice;

pub use config::{TwitterConfig, TwitterConfigBuilder};
pub use endpoint::{EndpointSpec, ListsEndpoint, StatusesEndpoint, UsersEndpoint};
pub use error::WebserviceError;
pub use execution::http::{HttpTransport, HttpTransportResponse, ReqwestTransport};
pub use types::{
    EntityRecord, HttpConfig, InvalidOperation, Query, QueryAction, QueryResult,
    RequestDescriptor, ResultCollection,
};
pub use webservice::TwitterWebservice;

/// Commonly used items.
pub mod prelude {
    pub use crate::config::TwitterConfig;
    pub use crate::endpoint::{EndpointSpec, ListsEndpoint, StatusesEndpoint, UsersEndpoint};
    pub use crate::error::WebserviceError;
    pub use crate::execution::http::{HttpTransport, ReqwestTransport};
    pub use crate::types::{EntityRecord, Query, QueryResult, ResultCollection};
    pub use crate::webservice::TwitterWebservice;
}
