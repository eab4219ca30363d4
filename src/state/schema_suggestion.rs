use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use super::request::{DisplayState, RequestState};
use crate::api::ApiClient;
use crate::error::StoreError;
use crate::models::SchemaSuggestion;

const SCHEMA_SUGGESTIONS: &str = "schema suggestions";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaSuggestionSnapshot {
    pub suggestions: Vec<SchemaSuggestion>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct SchemaSuggestionState {
    suggestions: Vec<SchemaSuggestion>,
    request: RequestState,
}

/// Read-only feed of schema migration suggestions
pub struct SchemaSuggestionStore {
    api: Arc<dyn ApiClient>,
    state: Mutex<SchemaSuggestionState>,
}

impl SchemaSuggestionStore {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self {
            api,
            state: Mutex::new(SchemaSuggestionState::default()),
        }
    }

    pub async fn mount(api: Arc<dyn ApiClient>) -> Self {
        let store = Self::new(api);
        store.refresh().await;
        store
    }

    fn lock(&self) -> MutexGuard<'_, SchemaSuggestionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the list with the backend's current suggestions
    /// A call made while a refresh is already running does nothing.
    pub async fn refresh(&self) {
        if !self.lock().request.try_begin() {
            log::debug!("Ignoring refresh while a request is in flight");
            return;
        }

        match self.api.list_schema_suggestions().await {
            Ok(envelope) => {
                log::debug!("Loaded {} schema suggestions", envelope.suggestions.len());
                let mut state = self.lock();
                state.suggestions = envelope.suggestions;
                state.request.error = None;
            }
            Err(source) => {
                let banner = StoreError::fetch(SCHEMA_SUGGESTIONS, source).into_banner();
                self.lock().request.fail(banner);
            }
        }

        self.lock().request.finish();
    }

    pub fn suggestions(&self) -> Vec<SchemaSuggestion> {
        self.lock().suggestions.clone()
    }

    pub fn request_state(&self) -> RequestState {
        self.lock().request.clone()
    }

    pub fn display_state(&self) -> DisplayState<SchemaSuggestion> {
        let state = self.lock();
        DisplayState::from_parts(&state.request, &state.suggestions)
    }

    pub fn snapshot(&self) -> SchemaSuggestionSnapshot {
        let state = self.lock();
        SchemaSuggestionSnapshot {
            suggestions: state.suggestions.clone(),
            loading: state.request.loading,
            error: state.request.error.clone(),
        }
    }
}
