//! Resolves raw response payloads into a [`ClassifiedResult`]

use serde_json::{Map, Value};

use crate::constants::TRANSPORT_FAILURE_MESSAGE;
use crate::error::TransportError;
use crate::models::{ClassifiedResult, RawResponse, Row};

/// Classify a payload. First match wins: `error`, then `message`, then tabular.
pub fn classify(raw: RawResponse) -> ClassifiedResult {
    if let Some(error) = raw.error {
        return ClassifiedResult::Error(value_text(error));
    }
    if let Some(message) = raw.message {
        return ClassifiedResult::Message(value_text(message));
    }

    ClassifiedResult::Tabular {
        question: raw.question.map(value_text).unwrap_or_default(),
        sql: raw.sql.map(value_text),
        rows: rows_of(raw.data),
    }
}

/// Classify the outcome of a request, replacing any transport failure
/// with the fixed user-facing message.
pub fn resolve_outcome(outcome: Result<RawResponse, TransportError>) -> ClassifiedResult {
    match outcome {
        Ok(raw) => classify(raw),
        Err(e) => {
            tracing::warn!(error = %e, "Query transport failure");
            ClassifiedResult::Error(TRANSPORT_FAILURE_MESSAGE.to_string())
        }
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Anything other than an array counts as no rows; non-object entries
/// become empty rows so the row count is kept.
fn rows_of(data: Option<Value>) -> Vec<Row> {
    match data {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => row,
                _ => Map::new(),
            })
            .collect(),
        _ => Vec::new(),
    }
}
