//! Request execution: translation, transport, classification, normalization.

pub mod errors;
pub mod http;
pub mod nested;
pub mod normalizer;
pub mod translator;

pub use nested::{NestedResource, NestedResources};
pub use translator::ReadRequest;
