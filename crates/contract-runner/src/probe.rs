//! HTTP delivery of generated payloads.

use contract_core::Payload;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Number of response body characters kept for the report.
pub const SNIPPET_LEN: usize = 500;

/// Error type for probe construction.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// What happened when a payload was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    /// HTTP status, absent when no response was received
    pub status: Option<u16>,
    pub elapsed_ms: u64,
    /// Leading part of the response body
    pub snippet: String,
    /// Transport error, when no response was received
    pub error: Option<String>,
}

impl ProbeOutcome {
    /// Outcome for a received response.
    pub fn response(status: u16, elapsed_ms: u64, body: &str) -> Self {
        Self {
            status: Some(status),
            elapsed_ms,
            snippet: body.chars().take(SNIPPET_LEN).collect(),
            error: None,
        }
    }

    /// Outcome for a request that never got a response.
    pub fn transport_error(elapsed_ms: u64, error: impl Into<String>) -> Self {
        Self {
            status: None,
            elapsed_ms,
            snippet: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_transport_error(&self) -> bool {
        self.status.is_none()
    }
}

/// Sends JSON payloads to one endpoint with a fixed method and header set.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    method: Method,
    url: String,
    headers: HeaderMap,
}

impl HttpProbe {
    /// Build a probe.
    ///
    /// `Content-Type: application/json` is always sent; user headers with
    /// the same name override it.
    pub fn new(
        method: &str,
        url: impl Into<String>,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> Result<Self, ProbeError> {
        let method = Method::from_bytes(method.to_uppercase().as_bytes())
            .map_err(|_| ProbeError::InvalidMethod(method.to_string()))?;

        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ProbeError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ProbeError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            header_map.insert(header_name, header_value);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            method,
            url: url.into(),
            headers: header_map,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `body` as JSON and record the outcome. Never fails: transport
    /// problems are part of the outcome.
    pub async fn send(&self, body: &Payload) -> ProbeOutcome {
        let start = Instant::now();
        let result = self
            .client
            .request(self.method.clone(), &self.url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                let text = match response.text().await {
                    Ok(text) => text,
                    Err(e) => {
                        debug!("Failed to read response body from {}: {e}", self.url);
                        String::new()
                    }
                };
                let elapsed = elapsed_ms(start);
                debug!("{} {} -> {status} in {elapsed}ms", self.method, self.url);
                ProbeOutcome::response(status, elapsed, &text)
            }
            Err(e) => {
                let elapsed = elapsed_ms(start);
                let message = error_chain(&e);
                debug!("{} {} failed after {elapsed}ms: {message}", self.method, self.url);
                ProbeOutcome::transport_error(elapsed, message)
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{spawn_server, spawn_silent_server, unused_address};

    fn probe(url: &str, timeout: Duration) -> HttpProbe {
        HttpProbe::new(
            "post",
            url,
            &[("X-Api-Key".to_string(), "secret".to_string())],
            timeout,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_probe_records_response() {
        let url = spawn_server(|request| {
            let has_key = request.header("x-api-key") == Some("secret");
            let is_json = request.header("content-type") == Some("application/json");
            let body_ok = request.body.contains("\"age\":42");
            if request.method == "POST" && has_key && is_json && body_ok {
                (201, "created".to_string())
            } else {
                (500, format!("unexpected request: {request:?}"))
            }
        })
        .await
        .unwrap();

        let payload = Payload::map_from([("age", Payload::Int(42))]);
        let outcome = probe(&url, Duration::from_secs(5)).send(&payload).await;

        assert_eq!(outcome.status, Some(201), "{outcome:?}");
        assert_eq!(outcome.snippet, "created");
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_probe_truncates_snippet() {
        let url = spawn_server(|_| (400, "x".repeat(2_000))).await.unwrap();

        let outcome = probe(&url, Duration::from_secs(5))
            .send(&Payload::invalid_sentinel())
            .await;

        assert_eq!(outcome.status, Some(400));
        assert_eq!(outcome.snippet.len(), SNIPPET_LEN);
    }

    #[tokio::test]
    async fn test_probe_connection_refused() {
        let url = unused_address().await.unwrap();

        let outcome = probe(&url, Duration::from_secs(5))
            .send(&Payload::Null)
            .await;

        assert!(outcome.is_transport_error());
        assert!(outcome.error.is_some());
        assert!(outcome.snippet.is_empty());
    }

    #[tokio::test]
    async fn test_probe_timeout() {
        let url = spawn_silent_server().await.unwrap();

        let outcome = probe(&url, Duration::from_millis(200))
            .send(&Payload::Null)
            .await;

        assert!(outcome.is_transport_error());
    }

    #[test]
    fn test_invalid_method_and_header() {
        let err = HttpProbe::new("NOT A METHOD", "http://localhost", &[], Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, ProbeError::InvalidMethod(_)));

        let err = HttpProbe::new(
            "GET",
            "http://localhost",
            &[("bad header".to_string(), "v".to_string())],
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, ProbeError::InvalidHeader { .. }));
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let body = "é".repeat(600);
        let outcome = ProbeOutcome::response(200, 1, &body);
        assert_eq!(outcome.snippet.chars().count(), SNIPPET_LEN);
    }
}
