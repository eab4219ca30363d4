//! The REST contract consumed from the QueryLens backend.

mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{NewQueryLog, QueryLogRecord, SchemaSuggestionList};

pub use http::HttpApiClient;

pub const QUERY_LOG_PATH: &str = "/api/query-log/";
pub const SCHEMA_SUGGESTIONS_PATH: &str = "/api/schema-suggestions/";

/// Backend operations used by the stores.
///
/// Any non-2xx status, network failure or undecodable body is an `ApiError`;
/// callers do not distinguish between them.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// `GET /api/query-log/`
    async fn list_query_logs(&self) -> Result<Vec<QueryLogRecord>, ApiError>;

    /// `POST /api/query-log/`. The response body is not used.
    async fn create_query_log(&self, payload: &NewQueryLog) -> Result<(), ApiError>;

    /// `GET /api/schema-suggestions/`, returning the undecorated envelope
    async fn list_schema_suggestions(&self) -> Result<SchemaSuggestionList, ApiError>;
}
