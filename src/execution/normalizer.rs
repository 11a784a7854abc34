//! Response normalization: Twitter JSON → entity records.

use serde_json::Value;

use super::http::HttpTransportResponse;
use super::translator::ReadRequest;
use crate::defaults::api::{HOME_TIMELINE_TOTAL, USER_TIMELINE_TOTAL};
use crate::endpoint::EndpointSpec;
use crate::error::WebserviceError;
use crate::types::{EntityRecord, ResultCollection};

/// Total reported for a plain sequence read.
///
/// Timelines report the API's retrieval cap rather than the page size, so
/// callers can plan pagination; these totals are upper bounds, not counts.
pub fn sequence_total(index: &str, len: usize) -> u64 {
    match index {
        "user_timeline" => USER_TIMELINE_TOTAL,
        "home_timeline" => HOME_TIMELINE_TOTAL,
        _ => len as u64,
    }
}

fn parse_body(resp: &HttpTransportResponse) -> Result<Value, WebserviceError> {
    serde_json::from_slice(&resp.body)
        .map_err(|e| WebserviceError::ParseError(format!("invalid JSON body: {e}")))
}

fn to_record(value: Value) -> Result<EntityRecord, WebserviceError> {
    let kind = match &value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    EntityRecord::from_value(value)
        .ok_or_else(|| WebserviceError::ParseError(format!("expected a JSON object, got {kind}")))
}

fn to_records(values: Vec<Value>) -> Result<Vec<EntityRecord>, WebserviceError> {
    values.into_iter().map(to_record).collect()
}

/// Single-object body of a create or update.
pub fn normalize_record(resp: &HttpTransportResponse) -> Result<EntityRecord, WebserviceError> {
    to_record(parse_body(resp)?)
}

/// Body of a successful read.
pub fn normalize_read(
    endpoint: &dyn EndpointSpec,
    read: &ReadRequest,
    resp: &HttpTransportResponse,
) -> Result<ResultCollection, WebserviceError> {
    if resp.is_empty() {
        return Ok(ResultCollection::empty());
    }
    let json = parse_body(resp)?;
    if json.is_null() {
        return Ok(ResultCollection::empty());
    }

    if read.search {
        return normalize_search(endpoint, json);
    }

    match json {
        Value::Array(items) => {
            let records = to_records(items)?;
            let total = sequence_total(&read.index, records.len());
            Ok(ResultCollection::new(records, total))
        }
        single => Ok(ResultCollection::new(vec![to_record(single)?], 1)),
    }
}

/// Search envelope: `{"<resource>": [...], "search_metadata": {"count": n}}`.
fn normalize_search(
    endpoint: &dyn EndpointSpec,
    mut json: Value,
) -> Result<ResultCollection, WebserviceError> {
    let items = match json.get_mut(endpoint.name()).map(Value::take) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            return Err(WebserviceError::ParseError(format!(
                "search field `{}` is not an array",
                endpoint.name()
            )));
        }
    };
    let records = to_records(items)?;
    let total = json
        .get("search_metadata")
        .and_then(|m| m.get("count"))
        .and_then(Value::as_u64)
        .unwrap_or(records.len() as u64);
    Ok(ResultCollection::new(records, total))
}
