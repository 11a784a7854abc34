//! Endpoint configuration.
//!
//! An endpoint describes one Twitter resource collection: its URL segment,
//! primary key, display field, default read index and write rules. The
//! translator only reads this configuration.

mod lists;
mod statuses;
mod users;

pub use lists::ListsEndpoint;
pub use statuses::StatusesEndpoint;
pub use users::UsersEndpoint;

use serde::de::DeserializeOwned;
use validator::Validate;

use crate::types::{Fields, InvalidOperation};

/// Resource configuration consumed by the webservice.
pub trait EndpointSpec: Send + Sync {
    /// Resource name, used as URL segment and as the array key of search bodies.
    fn name(&self) -> &str;

    fn primary_key(&self) -> &str {
        "id"
    }

    fn display_field(&self) -> &str;

    /// Read sub-route used when a query does not pick one.
    fn default_index(&self) -> &str;

    /// Validate a create/update field set.
    fn validate_write(&self, _fields: &Fields) -> Result<(), InvalidOperation> {
        Ok(())
    }

    /// Cap on the total number of records a create may grow the collection to.
    fn max_records(&self) -> Option<u64> {
        None
    }
}

/// Deserialize `fields` into `T` and run its validator rules.
pub(crate) fn validate_as<T>(fields: &Fields) -> Result<(), InvalidOperation>
where
    T: DeserializeOwned + Validate,
{
    let typed: T = serde_json::from_value(serde_json::Value::Object(fields.clone()))
        .map_err(|e| InvalidOperation::Invalid(e.to_string()))?;
    typed
        .validate()
        .map_err(|e| InvalidOperation::Invalid(e.to_string()))
}
