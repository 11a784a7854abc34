use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::{EndpointSpec, validate_as};
use crate::types::{Fields, InvalidOperation};

/// Accepted values of a list's `mode`.
const LIST_MODES: [&str; 2] = ["public", "private"];

/// Twitter refuses to create more lists than this per account.
const MAX_LISTS: u64 = 1000;

/// `lists` resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListsEndpoint;

#[derive(Debug, Deserialize, Validate)]
struct ListFields {
    #[validate(length(max = 25))]
    name: Option<String>,
    #[validate(custom(function = "validate_mode"))]
    mode: Option<String>,
    #[validate(length(max = 100))]
    description: Option<String>,
}

fn validate_mode(mode: &str) -> Result<(), ValidationError> {
    if mode.is_empty() || LIST_MODES.contains(&mode) {
        Ok(())
    } else {
        Err(ValidationError::new("mode").with_message("mode must be public or private".into()))
    }
}

impl EndpointSpec for ListsEndpoint {
    fn name(&self) -> &str {
        "lists"
    }

    fn display_field(&self) -> &str {
        "name"
    }

    fn default_index(&self) -> &str {
        "list"
    }

    fn validate_write(&self, fields: &Fields) -> Result<(), InvalidOperation> {
        validate_as::<ListFields>(fields)
    }

    fn max_records(&self) -> Option<u64> {
        Some(MAX_LISTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn mode_accepts_public_private_and_empty() {
        let endpoint = ListsEndpoint;
        for mode in ["public", "private", ""] {
            assert!(
                endpoint
                    .validate_write(&fields(json!({"name": "x", "mode": mode})))
                    .is_ok(),
                "mode {mode:?} should be accepted"
            );
        }
        assert!(endpoint.validate_write(&fields(json!({"name": "x"}))).is_ok());
    }

    #[test]
    fn unknown_mode_is_invalid() {
        let err = ListsEndpoint
            .validate_write(&fields(json!({"name": "x", "mode": "secret"})))
            .unwrap_err();
        assert!(matches!(err, InvalidOperation::Invalid(msg) if msg.contains("mode")));
    }

    #[test]
    fn wrongly_typed_field_is_invalid() {
        let err = ListsEndpoint
            .validate_write(&fields(json!({"mode": 3})))
            .unwrap_err();
        assert!(matches!(err, InvalidOperation::Invalid(_)));
    }
}
