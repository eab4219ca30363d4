use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use super::request::{DisplayState, RequestState};
use crate::api::ApiClient;
use crate::error::StoreError;
use crate::models::{FormField, PendingQueryForm, QueryLogRecord};
use crate::validation::{validate, ValidationError};

const QUERY_LOGS: &str = "query logs";

/// Result of a `QueryLogStore::submit` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend accepted the record and the list was re-fetched
    Submitted,
    /// Another operation was in flight; nothing happened
    Ignored,
    /// Local validation failed; no request was made
    Rejected(ValidationError),
    /// The backend refused the write or could not be reached
    Failed,
}

/// Point-in-time copy of a `QueryLogStore`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryLogSnapshot {
    pub records: Vec<QueryLogRecord>,
    pub form: PendingQueryForm,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct QueryLogState {
    records: Vec<QueryLogRecord>,
    form: PendingQueryForm,
    request: RequestState,
}

/// Client-side view of the backend's query log plus the pending entry form.
///
/// The record list is only replaced by a completed fetch; it is never edited
/// locally. The state lock is never held across a network call.
pub struct QueryLogStore {
    api: Arc<dyn ApiClient>,
    state: Mutex<QueryLogState>,
}

impl QueryLogStore {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self {
            api,
            state: Mutex::new(QueryLogState::default()),
        }
    }

    /// Create the store and perform its initial fetch
    pub async fn mount(api: Arc<dyn ApiClient>) -> Self {
        let store = Self::new(api);
        store.refresh().await;
        store
    }

    fn lock(&self) -> MutexGuard<'_, QueryLogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-fetch the full list. On failure the previous list is kept and the
    /// error banner is set.
    ///
    /// A call made while the store is loading does nothing; the running
    /// operation already ends with a fetch.
    pub async fn refresh(&self) {
        if !self.lock().request.try_begin() {
            log::debug!("Ignoring refresh while a request is in flight");
            return;
        }
        self.fetch().await;
        self.lock().request.finish();
    }

    async fn fetch(&self) {
        match self.api.list_query_logs().await {
            Ok(records) => {
                log::debug!("Loaded {} query logs", records.len());
                let mut state = self.lock();
                state.records = records;
                state.request.error = None;
            }
            Err(source) => {
                let banner = StoreError::fetch(QUERY_LOGS, source).into_banner();
                self.lock().request.fail(banner);
            }
        }
    }

    /// Validate and send the pending form, then re-fetch the list.
    ///
    /// A call made while the store is loading does nothing. The form is
    /// cleared only once the backend has accepted the write.
    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut state = self.lock();
            if state.request.loading {
                log::debug!("Ignoring submit while a request is in flight");
                return SubmitOutcome::Ignored;
            }

            match validate(&state.form) {
                Ok(payload) => {
                    state.request.try_begin();
                    payload
                }
                Err(err) => {
                    state.request.fail(StoreError::from(err.clone()).into_banner());
                    return SubmitOutcome::Rejected(err);
                }
            }
        };

        let outcome = match self.api.create_query_log(&payload).await {
            Ok(()) => {
                log::info!("Recorded query log ({}s)", payload.execution_time);
                self.fetch().await;
                self.lock().form.clear();
                SubmitOutcome::Submitted
            }
            Err(source) => {
                let banner = StoreError::Submit(source).into_banner();
                self.lock().request.fail(banner);
                SubmitOutcome::Failed
            }
        };

        self.lock().request.finish();
        outcome
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.lock().form.set(field, value);
    }

    /// Replace every form field at once
    pub fn fill_form(&self, form: PendingQueryForm) {
        self.lock().form = form;
    }

    pub fn clear_form(&self) {
        self.lock().form.clear();
    }

    pub fn form(&self) -> PendingQueryForm {
        self.lock().form.clone()
    }

    pub fn records(&self) -> Vec<QueryLogRecord> {
        self.lock().records.clone()
    }

    pub fn request_state(&self) -> RequestState {
        self.lock().request.clone()
    }

    pub fn display_state(&self) -> DisplayState<QueryLogRecord> {
        let state = self.lock();
        DisplayState::from_parts(&state.request, &state.records)
    }

    pub fn snapshot(&self) -> QueryLogSnapshot {
        let state = self.lock();
        QueryLogSnapshot {
            records: state.records.clone(),
            form: state.form.clone(),
            loading: state.request.loading,
            error: state.request.error.clone(),
        }
    }
}
