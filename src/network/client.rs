//! HTTP client wrapper - posts queries and decodes response payloads

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::TransportError;
use crate::messages::NetworkResponse;
use crate::models::{QueryRequest, RawResponse};

/// Client bound to one query endpoint
#[derive(Clone, Debug)]
pub struct QueryClient {
    http: reqwest::Client,
    endpoint: String,
    timeout_secs: Option<u64>,
}

impl QueryClient {
    pub fn new(endpoint: impl Into<String>, timeout_secs: Option<u64>) -> Self {
        QueryClient {
            http: create_client(timeout_secs),
            endpoint: endpoint.into(),
            timeout_secs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoint.clone(), config.request_timeout_secs)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `{"query": ...}` and decode the body.
    ///
    /// Any JSON body counts as a payload whatever the status code, since the
    /// backend reports its own errors as `400 {"error": ...}`.
    pub async fn post_query(&self, query: &str) -> Result<(u16, RawResponse), TransportError> {
        let result = self
            .http
            .post(&self.endpoint)
            .json(&QueryRequest::new(query))
            .send()
            .await;

        let resp = result.map_err(|e| self.map_error(e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_error(e))?;

        match RawResponse::from_json(&body) {
            Ok(raw) => Ok((status.as_u16(), raw)),
            Err(e) if status.is_success() => Err(TransportError::Decode(e.to_string())),
            Err(_) => Err(TransportError::Status {
                status: status.as_u16(),
                detail: truncate(&body, 200),
            }),
        }
    }

    /// Run a query and package the outcome for the App layer
    pub async fn execute(&self, id: u64, query: &str) -> NetworkResponse {
        let start = Instant::now();
        let result = self.post_query(query).await;
        let time_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok((status, raw)) => NetworkResponse::Payload {
                id,
                status,
                raw,
                time_ms,
            },
            Err(error) => NetworkResponse::TransportFailure { id, error, time_ms },
        }
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout_secs.unwrap_or_default())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_decode() || e.is_body() {
            TransportError::Decode(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Create an HTTP client. No timeout unless one is configured.
pub fn create_client(timeout_secs: Option<u64>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}
