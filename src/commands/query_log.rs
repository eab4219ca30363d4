use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::{PendingQueryForm, QueryLogRecord};
use crate::state::{AppState, QueryLogSnapshot, SubmitOutcome};

const CSV_HEADERS: [&str; 7] = [
    "query_text",
    "execution_time",
    "records_processed",
    "indexes_used",
    "columns_accessed",
    "optimization_suggestion",
    "created_at",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportCsvResult {
    pub success: bool,
    pub rows_exported: u64,
}

/// Refresh the query log and return what the view should show
pub async fn load_query_logs(state: &AppState) -> QueryLogSnapshot {
    state.query_logs.refresh().await;
    state.query_logs.snapshot()
}

/// Replace the pending form with `form` and submit it.
///
/// Returns the refreshed snapshot when the backend accepted the record, or
/// the store's error banner otherwise.
pub async fn submit_query_log(
    state: &AppState,
    form: PendingQueryForm,
) -> Result<QueryLogSnapshot, String> {
    state.query_logs.fill_form(form);
    submit_pending(state).await
}

/// Submit whatever is currently in the pending form
pub async fn submit_pending(state: &AppState) -> Result<QueryLogSnapshot, String> {
    match state.query_logs.submit().await {
        SubmitOutcome::Submitted => Ok(state.query_logs.snapshot()),
        SubmitOutcome::Ignored => Err("A submission is already in progress".to_string()),
        SubmitOutcome::Rejected(err) => Err(err.to_string()),
        SubmitOutcome::Failed => Err(state
            .query_logs
            .request_state()
            .error
            .unwrap_or_else(|| "Error submitting query".to_string())),
    }
}

/// Refresh the query log and write it to a CSV file
pub async fn export_query_logs(state: &AppState, file_path: &Path) -> Result<ExportCsvResult, String> {
    let snapshot = load_query_logs(state).await;
    if let Some(error) = snapshot.error {
        return Err(format!("Failed to load query logs: {}", error));
    }

    let file = File::create(file_path).map_err(|e| format!("Failed to create file: {}", e))?;
    let rows_exported = write_csv(&snapshot.records, BufWriter::new(file))?;

    log::info!("Exported {} query logs to {}", rows_exported, file_path.display());
    Ok(ExportCsvResult {
        success: true,
        rows_exported,
    })
}

/// Write records as CSV with a header row. Absent values become empty cells.
pub fn write_csv<W: Write>(records: &[QueryLogRecord], out: W) -> Result<u64, String> {
    let mut writer = csv::Writer::from_writer(out);

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| format!("Failed to write headers: {}", e))?;

    let mut rows_exported: u64 = 0;
    for record in records {
        let row = [
            record.query_text.clone(),
            record.execution_time.to_string(),
            record
                .records_processed
                .map(|n| n.to_string())
                .unwrap_or_default(),
            record.indexes_used.clone().unwrap_or_default(),
            record.columns_accessed.clone().unwrap_or_default(),
            record.optimization_suggestion.clone().unwrap_or_default(),
            record.created_at.clone().unwrap_or_default(),
        ];
        writer
            .write_record(&row)
            .map_err(|e| format!("Failed to write row: {}", e))?;
        rows_exported += 1;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush writer: {}", e))?;

    Ok(rows_exported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{record, FakeApi};
    use crate::models::ClientSettings;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::atomic::Ordering;

    fn app(api: std::sync::Arc<FakeApi>) -> AppState {
        AppState::new(ClientSettings::default(), PathBuf::from("settings.json"), api)
    }

    #[test]
    fn csv_quotes_sql_and_blanks_missing_values() {
        let mut first = record("SELECT a, b FROM t", 0.25);
        first.optimization_suggestion = Some("Query is optimized.".to_string());
        let mut second = record("SELECT 1", 2.0);
        second.records_processed = None;

        let mut buf = Vec::new();
        let rows = write_csv(&[first, second], &mut buf).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "query_text,execution_time,records_processed,indexes_used,columns_accessed,optimization_suggestion,created_at\n\
             \"SELECT a, b FROM t\",0.25,0,,,Query is optimized.,\n\
             SELECT 1,2,,,,,\n"
        );
    }

    #[tokio::test]
    async fn export_writes_refreshed_list() {
        let api = FakeApi::with_records(vec![record("SELECT 1", 0.1)]);
        let state = app(api);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.csv");

        let result = export_query_logs(&state, &path).await.unwrap();
        assert_eq!(result.rows_exported, 1);
        assert!(std::fs::read_to_string(&path).unwrap().contains("SELECT 1"));
    }

    #[tokio::test]
    async fn export_refuses_stale_data() {
        let api = FakeApi::new();
        api.fail_list.store(true, Ordering::SeqCst);
        let state = app(api);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.csv");

        let err = export_query_logs(&state, &path).await.unwrap_err();
        assert_eq!(err, "Failed to load query logs: Error fetching query logs");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn submit_reports_store_banner() {
        let api = FakeApi::new();
        let state = app(api.clone());

        let err = submit_query_log(&state, PendingQueryForm::default()).await.unwrap_err();
        assert_eq!(err, "Query text and execution time are required!");

        api.fail_create.store(true, Ordering::SeqCst);
        let form = PendingQueryForm {
            query_text: "SELECT 1".to_string(),
            execution_time: "0.5".to_string(),
            ..Default::default()
        };
        let err = submit_query_log(&state, form.clone()).await.unwrap_err();
        assert_eq!(err, "Error submitting query");
        assert_eq!(state.query_logs.form(), form);

        api.fail_create.store(false, Ordering::SeqCst);
        let snapshot = submit_pending(&state).await.unwrap();
        assert_eq!(snapshot.records.len(), 1);
        assert!(snapshot.form.is_empty());
    }
}
