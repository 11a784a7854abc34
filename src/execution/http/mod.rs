//! HTTP Utilities
//!
//! - transport.rs: the transport seam consumed by the webservice
//! - client.rs: the default `reqwest` transport and client construction

pub mod client;
pub mod transport;

pub use client::*;
pub use transport::*;
