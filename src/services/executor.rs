/// Execution client
/// One-shot submissions to the remote run service. The contract is lossy on
/// purpose: every failure mode collapses into displayable text and the
/// caller never sees an `Err`, so a broken service degrades the output pane
/// instead of the session.

use serde::{Deserialize, Serialize};

use crate::models::Language;

pub const DEFAULT_ENDPOINT: &str = "https://code-box.onrender.com/api/v1/submit";
pub const ENDPOINT_ENV: &str = "CODEBOX_SUBMIT_URL";

/// Shown when the service answered but sent neither output nor error.
const EMPTY_RESULT: &str = "Error occurred";
/// Shown for any transport or decode failure.
const TRANSPORT_ERROR: &str = "Network Error or Server Down";

/// Wire payload for the submit endpoint.
#[derive(Debug, Serialize)]
pub struct RunRequest<'a> {
    pub src: &'a str,
    pub lang: Language,
    pub stdin: &'a str,
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    #[serde(default)]
    data: Option<RunData>,
}

#[derive(Debug, Default, Deserialize)]
struct RunData {
    output: Option<String>,
    error: Option<String>,
}

pub struct ExecutionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ExecutionClient {
    /// Client against the configured endpoint; `CODEBOX_SUBMIT_URL`
    /// overrides the default. No request timeout: a hung service keeps the
    /// run latch up until the transport itself gives up.
    pub fn new() -> Self {
        let endpoint =
            std::env::var(ENDPOINT_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        ExecutionClient::with_endpoint(endpoint)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        ExecutionClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Submit one run and resolve it to displayable text: the service's
    /// `output` if present, else its `error`, else a fixed placeholder.
    pub async fn submit(&self, request: &RunRequest<'_>) -> String {
        let response = match self.http.post(&self.endpoint).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("run submission failed: {}", e);
                return TRANSPORT_ERROR.to_string();
            }
        };

        let parsed: RunResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("run response was not valid JSON: {}", e);
                return TRANSPORT_ERROR.to_string();
            }
        };

        match parsed.data.unwrap_or_default() {
            RunData {
                output: Some(output),
                ..
            } => output,
            RunData {
                error: Some(error), ..
            } => error,
            _ => EMPTY_RESULT.to_string(),
        }
    }
}

impl Default for ExecutionClient {
    fn default() -> Self {
        ExecutionClient::new()
    }
}
