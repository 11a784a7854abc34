//! Query translation.
//!
//! Maps an abstract query plus endpoint configuration to a concrete request
//! descriptor. Translation is pure: no I/O, no state beyond its inputs.

use crate::defaults::api::{STATUSES_SEARCH_URL, VERSION_PREFIX};
use crate::endpoint::EndpointSpec;
use crate::execution::nested::NestedResources;
use crate::types::{
    IdCondition, InvalidOperation, Params, Query, RequestDescriptor, SEARCH_KEY, join_values,
    param_value, params_from_fields,
};

/// A translated read, with what the normalizer needs to know about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    pub descriptor: RequestDescriptor,
    /// Index the read was planned against (default or override).
    pub index: String,
    /// Free-text search reads are normalized from the search envelope.
    pub search: bool,
}

/// `/1.1/{resource}`
pub fn base_url(endpoint: &dyn EndpointSpec) -> String {
    format!("{VERSION_PREFIX}/{}", endpoint.name())
}

/// Search route for an endpoint.
///
/// Tweets are searched at the API-wide `/1.1/search/tweets.json`; every other
/// resource keeps the route under its own base.
pub fn search_url(endpoint: &dyn EndpointSpec) -> String {
    if endpoint.name() == "statuses" {
        STATUSES_SEARCH_URL.to_string()
    } else {
        format!("{}/search/tweets.json", base_url(endpoint))
    }
}

/// POST `{base}/create.json` with the write set as parameters.
pub fn translate_create(
    endpoint: &dyn EndpointSpec,
    query: &Query,
) -> Result<RequestDescriptor, InvalidOperation> {
    if query
        .write_set()
        .get(endpoint.primary_key())
        .is_some_and(serde_json::Value::is_array)
    {
        return Err(InvalidOperation::IdList);
    }
    Ok(RequestDescriptor::post(
        format!("{}/create.json", base_url(endpoint)),
        params_from_fields(query.write_set()),
    ))
}

/// GET against the index, search, nested or lookup route.
///
/// Routing precedence, lowest to highest: index, search, nested resource,
/// lookup (an `id` list always goes to `lookup.json`).
pub fn translate_read(
    endpoint: &dyn EndpointSpec,
    query: &Query,
    nested: &NestedResources,
) -> ReadRequest {
    let conditions = query.where_clause();
    let clauses = query.clauses();

    // Null conditions are left off the query string.
    let mut params: Params = conditions
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), param_value(value)))
        .collect();
    if let Some(limit) = clauses.limit.filter(|v| *v > 0) {
        params.insert("count".to_string(), limit.to_string());
    }
    if let Some(page) = clauses.page.filter(|v| *v > 0) {
        params.insert("page".to_string(), page.to_string());
    }
    if let Some(offset) = clauses.offset.filter(|v| *v > 0) {
        params.insert("since_id".to_string(), offset.to_string());
    }

    let index = query
        .options()
        .index
        .clone()
        .unwrap_or_else(|| endpoint.default_index().to_string());
    let mut url = format!("{}/{index}.json", base_url(endpoint));

    if let Some(display) = query.condition(endpoint.display_field()) {
        params.insert(SEARCH_KEY.to_string(), param_value(display));
    }

    let search = query.is_search();
    if let Some(term) = query.condition(SEARCH_KEY) {
        params.insert(SEARCH_KEY.to_string(), param_value(term));
        params.remove("page");
        url = search_url(endpoint);
    }

    if let Some(nested_url) = nested.resolve(conditions) {
        url = nested_url;
    }

    if let IdCondition::List(ids) = query.id_condition() {
        params.insert(endpoint.primary_key().to_string(), join_values(ids));
        url = format!("{}/lookup.json", base_url(endpoint));
    }

    ReadRequest {
        descriptor: RequestDescriptor::get(url, params),
        index,
        search,
    }
}

/// POST `{base}/update.json` with the write set plus the primary key.
pub fn translate_update(
    endpoint: &dyn EndpointSpec,
    query: &Query,
) -> Result<RequestDescriptor, InvalidOperation> {
    let id = scalar_id(query)?;
    let mut params: Params = params_from_fields(query.write_set());
    params.insert(endpoint.primary_key().to_string(), id);
    Ok(RequestDescriptor::post(
        format!("{}/update.json", base_url(endpoint)),
        params,
    ))
}

/// POST `{base}/destroy/{id}.json` without a body.
pub fn translate_delete(
    endpoint: &dyn EndpointSpec,
    query: &Query,
) -> Result<RequestDescriptor, InvalidOperation> {
    let id = scalar_id(query)?;
    Ok(RequestDescriptor::post(
        format!("{}/destroy/{}.json", base_url(endpoint), urlencoding::encode(&id)),
        Params::new(),
    ))
}

fn scalar_id(query: &Query) -> Result<String, InvalidOperation> {
    match query.id_condition() {
        IdCondition::Scalar(id) => Ok(param_value(id)),
        IdCondition::List(_) => Err(InvalidOperation::IdList),
        IdCondition::Missing => Err(InvalidOperation::MissingId),
    }
}
