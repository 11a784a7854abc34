//! Generic entity records and result collections.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `created_at` layout used by the v1.1 API, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// One Twitter object (list, tweet, user) as a flat field map.
///
/// Equality is structural; the only identity is the `id` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord {
    fields: serde_json::Map<String, Value>,
}

impl EntityRecord {
    pub fn new(fields: serde_json::Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from a JSON value. Non-object values yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// The primary key value.
    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    /// `id_str` when present, otherwise the numeric `id` rendered as a string.
    ///
    /// Tweet ids exceed 2^53, so consumers that round-trip through floats
    /// should prefer this.
    pub fn id_str(&self) -> Option<String> {
        self.get_str("id_str")
            .map(str::to_string)
            .or_else(|| self.id().map(crate::types::param_value))
    }

    /// Parsed `created_at`, if present and well-formed.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.get_str("created_at")?;
        DateTime::parse_from_str(raw, TWITTER_DATE_FORMAT).ok()
    }

    pub fn fields(&self) -> &serde_json::Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> serde_json::Map<String, Value> {
        self.fields
    }
}

/// Ordered records plus a total count.
///
/// `total` is not always the number of records: timeline reads report a
/// fixed upper bound meant for pagination planning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultCollection {
    records: Vec<EntityRecord>,
    total: u64,
}

impl ResultCollection {
    pub fn new(records: Vec<EntityRecord>, total: u64) -> Self {
        Self { records, total }
    }

    /// The collection returned for reads that found nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&EntityRecord> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EntityRecord> {
        self.records
    }
}

impl IntoIterator for ResultCollection {
    type Item = EntityRecord;
    type IntoIter = std::vec::IntoIter<EntityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultCollection {
    type Item = &'a EntityRecord;
    type IntoIter = std::slice::Iter<'a, EntityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn created_at_parses_twitter_timestamps() {
        let record = EntityRecord::from_value(json!({
            "id": 1,
            "created_at": "Wed Oct 10 20:19:24 +0000 2018"
        }))
        .unwrap();
        let ts = record.created_at().expect("timestamp");
        assert_eq!(ts.year(), 2018);
        assert_eq!(ts.month(), 10);
        assert_eq!(ts.hour(), 20);
    }

    #[test]
    fn id_str_prefers_the_string_field() {
        let record = EntityRecord::from_value(json!({
            "id": 1050118621198921728u64,
            "id_str": "1050118621198921728"
        }))
        .unwrap();
        assert_eq!(record.id_str().as_deref(), Some("1050118621198921728"));

        let numeric = EntityRecord::from_value(json!({"id": 7})).unwrap();
        assert_eq!(numeric.id_str().as_deref(), Some("7"));
    }

    #[test]
    fn non_objects_are_not_records() {
        assert!(EntityRecord::from_value(json!([1, 2])).is_none());
        assert!(EntityRecord::from_value(json!("text")).is_none());
    }
}
