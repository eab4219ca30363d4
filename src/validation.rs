//! Pre-flight checks for a pending query log submission.
//!
//! Only obviously incomplete input is rejected here. Everything else
//! (bounds, SQL syntax, a missing record count) is left to the backend.

use thiserror::Error;

use crate::models::{NewQueryLog, PendingQueryForm};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Query text and execution time are required!")]
    MissingRequired,

    #[error("Execution time must be a number")]
    InvalidExecutionTime,
}

/// Validate the form and coerce it into the request payload
pub fn validate(form: &PendingQueryForm) -> Result<NewQueryLog, ValidationError> {
    let execution_time = form.execution_time.trim();
    if form.query_text.trim().is_empty() || execution_time.is_empty() {
        return Err(ValidationError::MissingRequired);
    }

    let execution_time =
        parse_seconds(execution_time).ok_or(ValidationError::InvalidExecutionTime)?;

    Ok(NewQueryLog {
        query_text: form.query_text.clone(),
        execution_time,
        records_processed: parse_leading_int(&form.records_processed),
        indexes_used: form.indexes_used.clone(),
        columns_accessed: form.columns_accessed.clone(),
    })
}

fn parse_seconds(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse the integer prefix of `raw` ("12.7" and "12 rows" both give 12).
/// Returns `None` when there is no leading digit or the value overflows.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}
