//! Twitter webservice: executes abstract queries against the v1.1 API.
//!
//! Each call translates the query, sends exactly one request through the
//! injected transport (two for capped creates), classifies the response and
//! normalizes the body. The webservice holds no mutable state and never
//! retries; rate limits and unknown errors go straight back to the caller.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::config::TwitterConfig;
use crate::endpoint::EndpointSpec;
use crate::error::WebserviceError;
use crate::execution::errors::{classify_twitter_http_error, classify_write_error};
use crate::execution::http::{HttpTransport, ReqwestTransport};
use crate::execution::nested::{NestedResource, NestedResources};
use crate::execution::normalizer::{normalize_read, normalize_record};
use crate::execution::translator::{
    translate_create, translate_delete, translate_read, translate_update,
};
use crate::types::{
    Fields, ID_KEY, InvalidOperation, Query, QueryAction, QueryResult, ResultCollection,
};

/// Rule name reported when a capped endpoint is full.
pub const MAXIMUM_AMOUNT_RULE: &str = "maximumAmount";

/// Adapter between abstract queries and the Twitter REST API.
#[derive(Clone)]
pub struct TwitterWebservice {
    transport: Arc<dyn HttpTransport>,
    nested: NestedResources,
}

impl std::fmt::Debug for TwitterWebservice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterWebservice")
            .field("nested", &self.nested)
            .finish_non_exhaustive()
    }
}

impl TwitterWebservice {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            nested: NestedResources::new(),
        }
    }

    /// Webservice over the default `reqwest` transport.
    pub fn from_config(config: &TwitterConfig) -> Result<Self, WebserviceError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(config)?)))
    }

    /// Register a nested resource route. Earlier registrations win.
    pub fn with_nested_resource(mut self, resource: NestedResource) -> Self {
        self.nested.add(resource);
        self
    }

    pub fn nested_resources(&self) -> &NestedResources {
        &self.nested
    }

    /// Execute a query against an endpoint.
    #[instrument(
        skip_all,
        fields(
            endpoint = endpoint.name(),
            action = %query.action(),
            request_id = %Uuid::new_v4(),
        )
    )]
    pub async fn execute(
        &self,
        endpoint: &dyn EndpointSpec,
        query: &Query,
    ) -> Result<QueryResult, WebserviceError> {
        match query.action() {
            QueryAction::Create => self.execute_create(endpoint, query).await,
            QueryAction::Read => self.execute_read(endpoint, query).await.map(QueryResult::Found),
            QueryAction::Update => self.execute_update(endpoint, query).await,
            QueryAction::Delete => self.execute_delete(endpoint, query).await,
        }
    }

    /// Read records. A 404 is an empty collection, not an error.
    pub async fn find(
        &self,
        endpoint: &dyn EndpointSpec,
        query: &Query,
    ) -> Result<ResultCollection, WebserviceError> {
        self.execute_read(endpoint, query).await
    }

    /// Create one record from `fields`.
    pub async fn create(
        &self,
        endpoint: &dyn EndpointSpec,
        fields: Fields,
    ) -> Result<QueryResult, WebserviceError> {
        self.execute(endpoint, &Query::create().set_fields(fields))
            .await
    }

    /// Update the record identified by `id`.
    pub async fn update(
        &self,
        endpoint: &dyn EndpointSpec,
        id: impl Into<Value>,
        fields: Fields,
    ) -> Result<QueryResult, WebserviceError> {
        let query = Query::update().where_eq(ID_KEY, id).set_fields(fields);
        self.execute(endpoint, &query).await
    }

    /// Destroy the record identified by `id`.
    pub async fn delete(
        &self,
        endpoint: &dyn EndpointSpec,
        id: impl Into<Value>,
    ) -> Result<QueryResult, WebserviceError> {
        self.execute(endpoint, &Query::delete().where_eq(ID_KEY, id))
            .await
    }

    async fn execute_create(
        &self,
        endpoint: &dyn EndpointSpec,
        query: &Query,
    ) -> Result<QueryResult, WebserviceError> {
        let request = match translate_create(endpoint, query) {
            Ok(request) => request,
            Err(rejection) => return Ok(reject(rejection)),
        };
        if let Err(rejection) = endpoint.validate_write(query.write_set()) {
            return Ok(reject(rejection));
        }

        if let Some(cap) = endpoint.max_records() {
            let existing = self.execute_read(endpoint, &Query::read()).await?;
            if existing.total() >= cap {
                debug!(cap, total = existing.total(), "Endpoint is full");
                return Ok(reject(InvalidOperation::RuleViolated(
                    MAXIMUM_AMOUNT_RULE.to_string(),
                )));
            }
        }

        let resp = self.transport.send(&request).await?;
        if let Some(err) = classify_write_error(QueryAction::Create, &resp) {
            warn!(status = resp.status, error = %err, "Create failed");
            return Err(err);
        }
        normalize_record(&resp).map(QueryResult::Created)
    }

    async fn execute_read(
        &self,
        endpoint: &dyn EndpointSpec,
        query: &Query,
    ) -> Result<ResultCollection, WebserviceError> {
        let read = translate_read(endpoint, query, &self.nested);
        debug!(
            url = %read.descriptor.url,
            index = %read.index,
            search = read.search,
            "Translated read"
        );

        let resp = self.transport.send(&read.descriptor).await?;
        match classify_twitter_http_error(&resp) {
            None => normalize_read(endpoint, &read, &resp),
            Some(WebserviceError::NotFound(message)) => {
                debug!(message = %message, "Read not found, returning empty result");
                Ok(ResultCollection::empty())
            }
            Some(err) => {
                warn!(status = resp.status, error = %err, "Read failed");
                Err(err)
            }
        }
    }

    async fn execute_update(
        &self,
        endpoint: &dyn EndpointSpec,
        query: &Query,
    ) -> Result<QueryResult, WebserviceError> {
        let request = match translate_update(endpoint, query) {
            Ok(request) => request,
            Err(rejection) => return Ok(reject(rejection)),
        };
        if let Err(rejection) = endpoint.validate_write(query.write_set()) {
            return Ok(reject(rejection));
        }

        let resp = self.transport.send(&request).await?;
        if let Some(err) = classify_write_error(QueryAction::Update, &resp) {
            warn!(status = resp.status, error = %err, "Update failed");
            return Err(err);
        }
        normalize_record(&resp).map(QueryResult::Updated)
    }

    async fn execute_delete(
        &self,
        endpoint: &dyn EndpointSpec,
        query: &Query,
    ) -> Result<QueryResult, WebserviceError> {
        let request = match translate_delete(endpoint, query) {
            Ok(request) => request,
            Err(rejection) => return Ok(reject(rejection)),
        };

        let resp = self.transport.send(&request).await?;
        if let Some(err) = classify_write_error(QueryAction::Delete, &resp) {
            warn!(status = resp.status, error = %err, "Delete failed");
            return Err(err);
        }
        Ok(QueryResult::Deleted(1))
    }
}

fn reject(rejection: InvalidOperation) -> QueryResult {
    debug!(reason = %rejection, "Query rejected before sending");
    QueryResult::Rejected(rejection)
}
