mod query_log;
mod request;
mod schema_suggestion;

use std::path::PathBuf;
use std::sync::Arc;

pub use query_log::{QueryLogSnapshot, QueryLogStore, SubmitOutcome};
pub use request::{DisplayState, RequestState};
pub use schema_suggestion::{SchemaSuggestionSnapshot, SchemaSuggestionStore};

use crate::api::ApiClient;
use crate::models::ClientSettings;

/// Application state shared by the command handlers
pub struct AppState {
    /// Settings in effect for this run (file values plus overrides)
    pub settings: ClientSettings,

    /// Where settings are persisted
    pub settings_path: PathBuf,

    /// Query history and the pending entry form
    pub query_logs: QueryLogStore,

    /// Schema migration suggestions
    pub schema_suggestions: SchemaSuggestionStore,
}

impl AppState {
    /// Build both stores over one client. Nothing is fetched yet.
    pub fn new(settings: ClientSettings, settings_path: PathBuf, api: Arc<dyn ApiClient>) -> Self {
        Self {
            settings,
            settings_path,
            query_logs: QueryLogStore::new(api.clone()),
            schema_suggestions: SchemaSuggestionStore::new(api),
        }
    }

    /// Refresh both stores concurrently. They share no state, so a failure
    /// in one leaves the other untouched.
    pub async fn refresh_all(&self) {
        futures::join!(self.query_logs.refresh(), self.schema_suggestions.refresh());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{record, FakeApi};
    use std::sync::atomic::Ordering;

    fn app(api: Arc<FakeApi>) -> AppState {
        AppState::new(ClientSettings::default(), PathBuf::from("settings.json"), api)
    }

    #[tokio::test]
    async fn one_store_failing_does_not_touch_the_other() {
        let api = FakeApi::with_records(vec![record("SELECT 1", 0.2)]);
        *api.suggestions.lock().unwrap() = vec!["Add index on t(id)".to_string()];
        api.fail_list.store(true, Ordering::SeqCst);

        let state = app(api.clone());
        state.refresh_all().await;

        assert_eq!(
            state.query_logs.display_state(),
            DisplayState::Error("Error fetching query logs".to_string())
        );
        assert_eq!(
            state.schema_suggestions.display_state(),
            DisplayState::Ready(vec!["Add index on t(id)".to_string()])
        );
    }

    #[tokio::test]
    async fn refresh_all_hits_both_endpoints_once() {
        let api = FakeApi::new();
        let state = app(api.clone());
        state.refresh_all().await;

        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.suggestion_calls.load(Ordering::SeqCst), 1);
        assert!(!state.query_logs.request_state().loading);
        assert!(!state.schema_suggestions.request_state().loading);
    }
}
