//! Plain-text rendering of store snapshots for the terminal.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::models::{DisplaySettings, FormField, PendingQueryForm, QueryLogRecord};
use crate::state::{QueryLogSnapshot, SchemaSuggestionSnapshot};

const LOADING: &str = "Loading...";
const NONE: &str = "None";

pub fn render_query_logs(snapshot: &QueryLogSnapshot, display: &DisplaySettings) -> String {
    let mut out = String::from("Query Logs\n");

    if snapshot.loading {
        out.push_str(LOADING);
        out.push('\n');
        return out;
    }

    // A failed fetch keeps the previous list, so show it under the banner
    if let Some(ref error) = snapshot.error {
        let _ = writeln!(out, "Error: {}", error);
    }

    if snapshot.records.is_empty() {
        if snapshot.error.is_none() {
            out.push_str("No query logs recorded yet.\n");
        }
        return out;
    }

    for record in &snapshot.records {
        out.push('\n');
        render_record(&mut out, record, display);
    }
    out
}

fn render_record(out: &mut String, record: &QueryLogRecord, display: &DisplaySettings) {
    let _ = writeln!(out, "  Query: {}", record.query_text);
    let _ = writeln!(out, "  Execution Time: {}s", record.execution_time);
    let _ = writeln!(
        out,
        "  Records Processed: {}",
        record
            .records_processed
            .map(|n| n.to_string())
            .unwrap_or_default()
    );
    let _ = writeln!(out, "  Indexes Used: {}", or_none(record.indexes_used.as_deref()));
    if display.show_columns {
        let _ = writeln!(
            out,
            "  Columns Accessed: {}",
            or_none(record.columns_accessed.as_deref())
        );
    }
    if display.show_created_at {
        let _ = writeln!(
            out,
            "  Recorded At: {}",
            record
                .created_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_else(|| NONE.to_string())
        );
    }
    let _ = writeln!(
        out,
        "  Optimization Suggestion: {}",
        or_none(record.optimization_suggestion.as_deref())
    );
}

pub fn render_schema_suggestions(snapshot: &SchemaSuggestionSnapshot) -> String {
    let mut out = String::from("Schema Migration Suggestions\n");

    if snapshot.loading {
        out.push_str(LOADING);
        out.push('\n');
        return out;
    }

    if let Some(ref error) = snapshot.error {
        let _ = writeln!(out, "Error: {}", error);
    }

    if snapshot.suggestions.is_empty() {
        if snapshot.error.is_none() {
            out.push_str("No suggestions available.\n");
        }
        return out;
    }

    for suggestion in &snapshot.suggestions {
        let _ = writeln!(out, "  - {}", suggestion);
    }
    out
}

pub fn render_form(form: &PendingQueryForm) -> String {
    let mut out = String::new();
    for field in FormField::ALL {
        let _ = writeln!(out, "  {:<18} {}", field.to_string(), form.get(field));
    }
    out
}

fn or_none(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NONE,
    }
}

/// Show RFC 3339 timestamps in local time; anything else is printed as sent
fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}
