// ==========================================
// Medication Shortage CDS Service - hook transport client
// ==========================================
// Dispatches a built hook request to the external CDS service as an HTTP
// POST with a bounded timeout and no retry. Failures are surfaced to the
// caller, never swallowed and never retried here.
// ==========================================

use crate::hooks::payload::CdsHookRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Default dispatch timeout.
pub const DEFAULT_HOOK_TIMEOUT: Duration = Duration::from_secs(20);

/// Transport-level failure, with timeout kept distinct from everything else
/// so callers can tell a slow service from a broken one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum HookTransportError {
    Timeout,
    Other(String),
}

/// What came back from one dispatch attempt.
///
/// `status_code` is present whenever the service answered at all; `body`
/// holds the parsed JSON response and `raw_body` the unparsed text when the
/// response was not valid JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookDispatchOutcome {
    pub target_url: String,
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<HookTransportError>,
}

/// Dispatch seam; the HTTP client below is the production implementation,
/// tests substitute a recording stub.
#[async_trait]
pub trait HookDispatcher: Send + Sync {
    async fn dispatch(&self, request: &CdsHookRequest) -> HookDispatchOutcome;

    fn target_url(&self) -> &str;
}

// ==========================================
// CdsHookClient - reqwest implementation
// ==========================================
pub struct CdsHookClient {
    http: reqwest::Client,
    endpoint: String,
}

impl CdsHookClient {
    /// Build a client for `endpoint` with the given dispatch timeout.
    pub fn new(endpoint: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl HookDispatcher for CdsHookClient {
    async fn dispatch(&self, request: &CdsHookRequest) -> HookDispatchOutcome {
        info!(target_url = %self.endpoint, hook_instance = %request.hook_instance, "dispatching CDS hook");

        let mut outcome = HookDispatchOutcome {
            target_url: self.endpoint.clone(),
            status_code: None,
            body: None,
            raw_body: None,
            error: None,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!(target_url = %self.endpoint, "hook dispatch timed out");
                outcome.error = Some(HookTransportError::Timeout);
                return outcome;
            }
            Err(e) => {
                warn!(target_url = %self.endpoint, error = %e, "hook dispatch failed");
                outcome.error = Some(HookTransportError::Other(e.to_string()));
                return outcome;
            }
        };

        let status = response.status();
        outcome.status_code = Some(status.as_u16());

        match response.text().await {
            Ok(text) => match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(value) => outcome.body = Some(value),
                Err(_) => {
                    warn!(status = status.as_u16(), "CDS service response was not valid JSON");
                    outcome.raw_body = Some(text);
                }
            },
            Err(e) if e.is_timeout() => {
                outcome.error = Some(HookTransportError::Timeout);
            }
            Err(e) => {
                outcome.error = Some(HookTransportError::Other(e.to_string()));
            }
        }

        if !status.is_success() {
            warn!(status = status.as_u16(), "CDS service answered with an error status");
        } else {
            info!(status = status.as_u16(), "CDS hook delivered");
        }

        outcome
    }

    fn target_url(&self) -> &str {
        &self.endpoint
    }
}
