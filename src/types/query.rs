//! The abstract, CRUD-style query consumed by the translator.
//!
//! A `Query` is built and owned by the caller; the webservice only reads it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name → JSON value map used for conditions and write sets.
pub type Fields = serde_json::Map<String, Value>;

/// Condition key that requests a free-text search.
pub const SEARCH_KEY: &str = "q";

/// Condition key carrying the record id (scalar) or ids (list).
pub const ID_KEY: &str = "id";

/// Operation kind of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryAction {
    Create,
    Read,
    Update,
    Delete,
}

impl std::fmt::Display for QueryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Pagination clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clauses {
    pub limit: Option<u64>,
    pub page: Option<u64>,
    /// Reinterpreted as a minimum-id cursor (`since_id`), not a row skip.
    pub offset: Option<u64>,
}

/// Per-query options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Read sub-route overriding the endpoint's default index.
    pub index: Option<String>,
}

/// Shape of the `id` condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdCondition<'a> {
    Missing,
    Scalar(&'a Value),
    List(&'a [Value]),
}

/// Abstract query against an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    action: QueryAction,
    #[serde(default)]
    conditions: Fields,
    #[serde(default)]
    clauses: Clauses,
    #[serde(default)]
    set: Fields,
    #[serde(default)]
    options: QueryOptions,
}

impl Query {
    pub fn new(action: QueryAction) -> Self {
        Self {
            action,
            conditions: Fields::new(),
            clauses: Clauses::default(),
            set: Fields::new(),
            options: QueryOptions::default(),
        }
    }

    pub fn read() -> Self {
        Self::new(QueryAction::Read)
    }

    pub fn create() -> Self {
        Self::new(QueryAction::Create)
    }

    pub fn update() -> Self {
        Self::new(QueryAction::Update)
    }

    pub fn delete() -> Self {
        Self::new(QueryAction::Delete)
    }

    /// Add a single condition.
    pub fn where_eq(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(key.into(), value.into());
        self
    }

    /// Merge a condition map.
    pub fn conditions(mut self, conditions: Fields) -> Self {
        self.conditions.extend(conditions);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.clauses.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: u64) -> Self {
        self.clauses.page = Some(page);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.clauses.offset = Some(offset);
        self
    }

    /// Add one field to the write set.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set.insert(field.into(), value.into());
        self
    }

    /// Merge a field map into the write set.
    pub fn set_fields(mut self, fields: Fields) -> Self {
        self.set.extend(fields);
        self
    }

    /// Read from a specific sub-route instead of the endpoint default.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.options.index = Some(index.into());
        self
    }

    pub fn action(&self) -> QueryAction {
        self.action
    }

    pub fn where_clause(&self) -> &Fields {
        &self.conditions
    }

    pub fn clauses(&self) -> &Clauses {
        &self.clauses
    }

    pub fn write_set(&self) -> &Fields {
        &self.set
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Classify the `id` condition. A `null` id counts as missing.
    pub fn id_condition(&self) -> IdCondition<'_> {
        match self.conditions.get(ID_KEY) {
            None | Some(Value::Null) => IdCondition::Missing,
            Some(Value::Array(ids)) => IdCondition::List(ids),
            Some(value) => IdCondition::Scalar(value),
        }
    }

    /// Condition value, with `null` treated as absent.
    pub fn condition(&self, key: &str) -> Option<&Value> {
        self.conditions.get(key).filter(|v| !v.is_null())
    }

    /// Whether this read requests a free-text search. A `null` term does not.
    pub fn is_search(&self) -> bool {
        self.condition(SEARCH_KEY).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_search_term_is_not_a_search() {
        assert!(!Query::read().where_eq("q", Value::Null).is_search());
        assert!(Query::read().where_eq("q", "rust").is_search());
    }

    #[test]
    fn id_condition_distinguishes_scalar_list_and_missing() {
        assert_eq!(Query::read().id_condition(), IdCondition::Missing);
        assert_eq!(
            Query::read().where_eq("id", Value::Null).id_condition(),
            IdCondition::Missing
        );
        let scalar = Query::read().where_eq("id", 42);
        assert_eq!(scalar.id_condition(), IdCondition::Scalar(&json!(42)));
        let list = Query::read().where_eq("id", json!([1, 2]));
        assert_eq!(list.id_condition(), IdCondition::List(&[json!(1), json!(2)]));
    }

    #[test]
    fn query_deserializes_with_defaults() {
        let query: Query = serde_json::from_value(json!({
            "action": "read",
            "conditions": {"q": "rust"},
            "clauses": {"limit": 20}
        }))
        .unwrap();
        assert_eq!(query.action(), QueryAction::Read);
        assert!(query.is_search());
        assert_eq!(query.clauses().limit, Some(20));
        assert!(query.write_set().is_empty());
        assert_eq!(query.options().index, None);
    }
}
