use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The editable fields of a pending query log submission
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    QueryText,
    ExecutionTime,
    RecordsProcessed,
    IndexesUsed,
    ColumnsAccessed,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::QueryText,
        FormField::ExecutionTime,
        FormField::RecordsProcessed,
        FormField::IndexesUsed,
        FormField::ColumnsAccessed,
    ];
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormField::QueryText => write!(f, "query_text"),
            FormField::ExecutionTime => write!(f, "execution_time"),
            FormField::RecordsProcessed => write!(f, "records_processed"),
            FormField::IndexesUsed => write!(f, "indexes_used"),
            FormField::ColumnsAccessed => write!(f, "columns_accessed"),
        }
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "query_text" | "query" | "sql" => Ok(FormField::QueryText),
            "execution_time" | "time" => Ok(FormField::ExecutionTime),
            "records_processed" | "records" => Ok(FormField::RecordsProcessed),
            "indexes_used" | "indexes" => Ok(FormField::IndexesUsed),
            "columns_accessed" | "columns" => Ok(FormField::ColumnsAccessed),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

/// Raw user input for a new query log, kept as typed until submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingQueryForm {
    pub query_text: String,
    pub execution_time: String,
    pub records_processed: String,
    pub indexes_used: String,
    pub columns_accessed: String,
}

impl PendingQueryForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::QueryText => &self.query_text,
            FormField::ExecutionTime => &self.execution_time,
            FormField::RecordsProcessed => &self.records_processed,
            FormField::IndexesUsed => &self.indexes_used,
            FormField::ColumnsAccessed => &self.columns_accessed,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::QueryText => self.query_text = value,
            FormField::ExecutionTime => self.execution_time = value,
            FormField::RecordsProcessed => self.records_processed = value,
            FormField::IndexesUsed => self.indexes_used = value,
            FormField::ColumnsAccessed => self.columns_accessed = value,
        }
    }

    pub fn clear(&mut self) {
        *self = PendingQueryForm::default();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}
