use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record of result data. Keeps the field order of the response body.
pub type Row = Map<String, Value>;

/// Request body sent to the query endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        QueryRequest {
            query: query.into(),
        }
    }
}

/// Response payload as received, before classification.
///
/// Every field is optional and untyped: the backend answers with one of
/// `{error}`, `{message}` or `{question, data}` but nothing enforces it.
/// A JSON null is stored as `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawResponse {
    pub error: Option<Value>,
    pub message: Option<Value>,
    pub question: Option<Value>,
    pub data: Option<Value>,
    /// Generated SQL echoed back by the backend
    pub sql: Option<Value>,
}

impl RawResponse {
    /// Build from any JSON value. Non-object values yield an empty payload.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return RawResponse::default();
        };

        let mut take = |key: &str| match fields.remove(key) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v),
        };

        RawResponse {
            error: take("error"),
            message: take("message"),
            question: take("question"),
            data: take("data"),
            sql: take("sql"),
        }
    }

    /// Parse a response body. Fails only when the body is not JSON at all.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Value>(body).map(Self::from_value)
    }
}

/// A response resolved into exactly one displayable shape
#[derive(Clone, Debug, PartialEq)]
pub enum ClassifiedResult {
    /// Server-reported error, or the generic transport failure text
    Error(String),
    /// Informational message from the server
    Message(String),
    /// Rows answering the question
    Tabular {
        question: String,
        sql: Option<String>,
        rows: Vec<Row>,
    },
}

impl ClassifiedResult {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedResult::Error(_) => "error",
            ClassifiedResult::Message(_) => "message",
            ClassifiedResult::Tabular { .. } => "tabular",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_drops_nulls() {
        let raw = RawResponse::from_value(json!({"error": null, "message": "hi"}));
        assert_eq!(raw.error, None);
        assert_eq!(raw.message, Some(json!("hi")));
    }

    #[test]
    fn test_from_value_non_object_is_empty() {
        assert_eq!(RawResponse::from_value(json!([1, 2])), RawResponse::default());
        assert_eq!(RawResponse::from_value(json!("text")), RawResponse::default());
    }

    #[test]
    fn test_from_json_rejects_non_json() {
        assert!(RawResponse::from_json("<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_row_keeps_field_order() {
        let raw = RawResponse::from_json(r#"{"data":[{"z":1,"a":2,"m":3}]}"#).unwrap();
        let rows = raw.data.unwrap();
        let keys: Vec<&String> = rows[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_query_request_body() {
        let body = serde_json::to_string(&QueryRequest::new("pending orders")).unwrap();
        assert_eq!(body, r#"{"query":"pending orders"}"#);
    }
}
