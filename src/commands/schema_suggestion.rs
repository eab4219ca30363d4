use crate::state::{AppState, SchemaSuggestionSnapshot};

/// Refresh the schema suggestion feed and return what the view should show
pub async fn load_schema_suggestions(state: &AppState) -> SchemaSuggestionSnapshot {
    state.schema_suggestions.refresh().await;
    state.schema_suggestions.snapshot()
}
