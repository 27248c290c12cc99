//! Submission transport: the capability that durably commits a record.
//!
//! The confirmation gate only sees `dyn Transport`, so the stub and the HTTP
//! client are interchangeable.

use crate::config::TransportConfig;
use crate::types::ActionTypeRecord;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Reason a commit did not go through.
pub type TransportError = String;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Commit `record`. Must always resolve; there is no cancellation once
    /// the call has been issued.
    async fn commit(&self, record: &ActionTypeRecord) -> Result<(), TransportError>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Build the transport selected by configuration.
pub fn from_config(config: &TransportConfig) -> Box<dyn Transport> {
    match config {
        TransportConfig::Stub {
            latency_ms,
            fail_with,
        } => Box::new(StubTransport {
            latency: Duration::from_millis(*latency_ms),
            fail_with: fail_with.clone(),
        }),
        TransportConfig::Http {
            endpoint,
            timeout_seconds,
        } => Box::new(HttpTransport::new(
            endpoint.clone(),
            Duration::from_secs(*timeout_seconds),
        )),
    }
}

// ---------------------------------------------------------------------------
// StubTransport
// ---------------------------------------------------------------------------

/// Fixed-latency stand-in for the backend API.
#[derive(Debug, Clone)]
pub struct StubTransport {
    pub latency: Duration,
    pub fail_with: Option<String>,
}

impl StubTransport {
    pub fn succeeding(latency: Duration) -> Self {
        Self {
            latency,
            fail_with: None,
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            latency: Duration::ZERO,
            fail_with: Some(reason.into()),
        }
    }
}

impl Default for StubTransport {
    fn default() -> Self {
        Self::succeeding(Duration::from_millis(500))
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn commit(&self, record: &ActionTypeRecord) -> Result<(), TransportError> {
        debug!(name = %record.name, latency_ms = self.latency.as_millis() as u64, "stub commit");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match &self.fail_with {
            Some(reason) => Err(reason.clone()),
            None => {
                info!(name = %record.name, "action type committed (stub)");
                Ok(())
            }
        }
    }

    fn describe(&self) -> String {
        "stub".to_string()
    }
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// POSTs the record as JSON to a backend endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn commit(&self, record: &ActionTypeRecord) -> Result<(), TransportError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(record)
            .send()
            .await
            .map_err(|e| format!("request to {} failed: {e}", self.endpoint))?;

        let status = resp.status();
        if status.is_success() {
            info!(name = %record.name, %status, "action type committed");
            return Ok(());
        }
        Err(failure_reason(status, resp.text().await))
    }

    fn describe(&self) -> String {
        format!("http {}", self.endpoint)
    }
}

fn failure_reason<E: std::fmt::Display>(
    status: reqwest::StatusCode,
    body: std::result::Result<String, E>,
) -> TransportError {
    match body {
        Ok(body) if body.trim().is_empty() => format!("server responded {status}"),
        Ok(body) => format!("server responded {status}: {}", body.trim()),
        Err(e) => format!("server responded {status} (body unreadable: {e})"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
