use serde::{Deserialize, Serialize};

/// A recorded query as returned by `GET /api/query-log/`.
///
/// Records are owned by the backend; the client never edits them. Fields the
/// backend omits (it does not echo `columns_accessed` on list responses)
/// default to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLogRecord {
    pub query_text: String,
    /// Seconds
    pub execution_time: f64,
    #[serde(default)]
    pub records_processed: Option<i64>,
    #[serde(default)]
    pub indexes_used: Option<String>,
    #[serde(default)]
    pub columns_accessed: Option<String>,
    /// Computed by the backend, absent on records it has not analyzed yet
    #[serde(default)]
    pub optimization_suggestion: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>, // ISO 8601
}

/// Body of `POST /api/query-log/`.
///
/// `records_processed` is always present on the wire: a missing or
/// unparseable value is sent as `null` and left to the backend to judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQueryLog {
    pub query_text: String,
    pub execution_time: f64,
    pub records_processed: Option<i64>,
    pub indexes_used: String,
    pub columns_accessed: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_backend_list_entry() {
        let json = r#"{
            "query_text": "SELECT * FROM t",
            "execution_time": 1.5,
            "records_processed": 100,
            "indexes_used": "idx_t",
            "created_at": "2024-03-01T10:00:00Z",
            "optimization_suggestion": "Query is optimized."
        }"#;

        let record: QueryLogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record,
            QueryLogRecord {
                query_text: "SELECT * FROM t".to_string(),
                execution_time: 1.5,
                records_processed: Some(100),
                indexes_used: Some("idx_t".to_string()),
                columns_accessed: None,
                optimization_suggestion: Some("Query is optimized.".to_string()),
                created_at: Some("2024-03-01T10:00:00Z".to_string()),
            }
        );
    }

    #[test]
    fn decodes_null_optional_fields() {
        let json = r#"{"query_text": "SELECT 1", "execution_time": 0, "records_processed": null, "indexes_used": null}"#;
        let record: QueryLogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.records_processed, None);
        assert_eq!(record.indexes_used, None);
        assert_eq!(record.optimization_suggestion, None);
    }

    #[test]
    fn missing_records_processed_is_sent_as_null() {
        let payload = NewQueryLog {
            query_text: "SELECT 1".to_string(),
            execution_time: 0.2,
            records_processed: None,
            indexes_used: String::new(),
            columns_accessed: String::new(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "query_text": "SELECT 1",
                "execution_time": 0.2,
                "records_processed": null,
                "indexes_used": "",
                "columns_accessed": ""
            })
        );
    }
}
