//! Wire parameters.
//!
//! Twitter takes form/query encoded strings, so every JSON value is flattened
//! to a string before it reaches the transport.

use serde_json::Value;
use std::collections::BTreeMap;

/// Ordered parameter map sent as a query string (GET) or form body (POST).
pub type Params = BTreeMap<String, String>;

/// Render a JSON value the way Twitter expects it on the wire.
///
/// Lists are comma-joined (`[1, 2, 3]` → `"1,2,3"`), `null` becomes an empty
/// string and nested objects are sent as compact JSON.
pub fn param_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => join_values(items),
        Value::Object(_) => value.to_string(),
    }
}

/// Comma-join a list of values.
pub fn join_values(items: &[Value]) -> String {
    items.iter().map(param_value).collect::<Vec<_>>().join(",")
}

/// Flatten a field map into wire parameters.
pub fn params_from_fields(fields: &serde_json::Map<String, Value>) -> Params {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), param_value(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_and_lists_render_as_plain_strings() {
        assert_eq!(param_value(&json!("x")), "x");
        assert_eq!(param_value(&json!(20)), "20");
        assert_eq!(param_value(&json!(true)), "true");
        assert_eq!(param_value(&json!(null)), "");
        assert_eq!(param_value(&json!([1, "2", 3])), "1,2,3");
    }

    #[test]
    fn large_tweet_ids_keep_full_precision() {
        assert_eq!(
            param_value(&json!(1_180_000_000_000_000_000u64)),
            "1180000000000000000"
        );
    }
}
