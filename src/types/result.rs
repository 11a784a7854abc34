//! Outcomes of an executed query.

use serde::{Deserialize, Serialize};

use super::entity::{EntityRecord, ResultCollection};

/// Local precondition failure. Returned as a sentinel, before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum InvalidOperation {
    /// Update/delete without an `id` condition.
    #[error("an `id` condition is required")]
    MissingId,
    /// Create/update/delete given a list of ids.
    #[error("writes target exactly one resource; a list of ids was given")]
    IdList,
    /// The write set failed endpoint validation.
    #[error("invalid fields: {0}")]
    Invalid(String),
    /// A business rule rejected the write (e.g. `maximumAmount`).
    #[error("rule `{0}` rejected the write")]
    RuleViolated(String),
}

/// Result of `TwitterWebservice::execute`.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Created(EntityRecord),
    Found(ResultCollection),
    Updated(EntityRecord),
    /// Number of destroyed resources; always 1 on success.
    Deleted(u64),
    Rejected(InvalidOperation),
}

impl QueryResult {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn into_collection(self) -> Option<ResultCollection> {
        match self {
            Self::Found(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<EntityRecord> {
        match self {
            Self::Created(record) | Self::Updated(record) => Some(record),
            _ => None,
        }
    }
}
