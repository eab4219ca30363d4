//! In-memory backend used by the store tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{NewQueryLog, QueryLogRecord, SchemaSuggestionList};

pub const SLOW_SUGGESTION: &str = "Consider adding indexes or optimizing the query structure.";
pub const FAST_SUGGESTION: &str = "Query is optimized.";

#[derive(Default)]
pub struct FakeApi {
    pub records: Mutex<Vec<QueryLogRecord>>,
    pub suggestions: Mutex<Vec<String>>,
    pub fail_list: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_suggestions: AtomicBool,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub suggestion_calls: AtomicUsize,
    write_gate: Arc<AsyncMutex<()>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_records(records: Vec<QueryLogRecord>) -> Arc<Self> {
        let api = Self::default();
        *api.records.lock().unwrap() = records;
        Arc::new(api)
    }

    /// Block `create_query_log` until the returned guard is dropped
    pub async fn hold_writes(&self) -> OwnedMutexGuard<()> {
        self.write_gate.clone().lock_owned().await
    }

    pub fn calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
            + self.create_calls.load(Ordering::SeqCst)
            + self.suggestion_calls.load(Ordering::SeqCst)
    }
}

pub fn record(query_text: &str, execution_time: f64) -> QueryLogRecord {
    QueryLogRecord {
        query_text: query_text.to_string(),
        execution_time,
        records_processed: Some(0),
        indexes_used: None,
        columns_accessed: None,
        optimization_suggestion: None,
        created_at: None,
    }
}

#[async_trait]
impl ApiClient for FakeApi {
    async fn list_query_logs(&self) -> Result<Vec<QueryLogRecord>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create_query_log(&self, payload: &NewQueryLog) -> Result<(), ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let _gate = self.write_gate.lock().await;
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }

        let suggestion = if payload.execution_time > 1.0 {
            SLOW_SUGGESTION
        } else {
            FAST_SUGGESTION
        };
        self.records.lock().unwrap().push(QueryLogRecord {
            query_text: payload.query_text.clone(),
            execution_time: payload.execution_time,
            records_processed: payload.records_processed,
            indexes_used: Some(payload.indexes_used.clone()).filter(|s| !s.is_empty()),
            columns_accessed: Some(payload.columns_accessed.clone()).filter(|s| !s.is_empty()),
            optimization_suggestion: Some(suggestion.to_string()),
            created_at: Some("2024-03-01T10:00:00Z".to_string()),
        });
        Ok(())
    }

    async fn list_schema_suggestions(&self) -> Result<SchemaSuggestionList, ApiError> {
        self.suggestion_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_suggestions.load(Ordering::SeqCst) {
            return Err(ApiError::Decode("expected value at line 1 column 1".to_string()));
        }
        Ok(SchemaSuggestionList {
            suggestions: self.suggestions.lock().unwrap().clone(),
        })
    }
}
