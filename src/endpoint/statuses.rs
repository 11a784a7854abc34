use serde::Deserialize;
use validator::Validate;

use super::{EndpointSpec, validate_as};
use crate::types::{Fields, InvalidOperation};

/// `statuses` resource (tweets).
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusesEndpoint;

#[derive(Debug, Deserialize, Validate)]
struct StatusFields {
    #[validate(length(max = 280))]
    status: Option<String>,
}

impl EndpointSpec for StatusesEndpoint {
    fn name(&self) -> &str {
        "statuses"
    }

    fn display_field(&self) -> &str {
        "text"
    }

    fn default_index(&self) -> &str {
        "home_timeline"
    }

    fn validate_write(&self, fields: &Fields) -> Result<(), InvalidOperation> {
        validate_as::<StatusFields>(fields)
    }
}
