//! Data types shared across the webservice.

pub mod entity;
pub mod http;
pub mod params;
pub mod query;
pub mod result;

pub use entity::*;
pub use http::*;
pub use params::*;
pub use query::*;
pub use result::*;
