//! Analyze endpoint client implementation

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, trace};

use codecritic_core::{AnalysisResult, AnalysisService, CodeSubmission, Error, Result};

use crate::config::ApiConfig;

/// HTTP client for the remote analyzer
pub struct AnalyzeClient {
    config: ApiConfig,
    endpoint: String,
    client: Client,
}

impl AnalyzeClient {
    /// Create a new client from configuration
    pub fn new(config: ApiConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint(),
            config,
            client,
        })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env()?)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait]
impl AnalysisService for AnalyzeClient {
    async fn analyze(&self, submission: &CodeSubmission) -> Result<AnalysisResult> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(submission)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(%status, endpoint = %self.endpoint, "analyzer replied");

        let body = response.bytes().await.map_err(transport_error)?;
        trace!(body = %String::from_utf8_lossy(&body), "analyzer reply body");

        if !status.is_success() {
            return Err(Error::Server {
                status: status.as_u16(),
                detail: rejection_detail(&body)?,
            });
        }

        Ok(serde_json::from_slice::<AnalysisResult>(&body)?)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Pull `detail` out of a rejection body.
///
/// An empty body carries no detail. A body that is not JSON is a decode
/// failure. `false` and zero count as absent; other non-string details
/// (validation error lists) are rendered as compact JSON.
pub(crate) fn rejection_detail(body: &[u8]) -> Result<Option<String>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)?;
    Ok(match value.get("detail") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::String(detail)) => Some(detail.clone()),
        Some(other) => Some(other.to_string()),
    })
}

/// Flatten a reqwest error and its causes into one message.
fn transport_error(err: reqwest::Error) -> Error {
    let timed_out = err.is_timeout();

    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }

    if timed_out {
        Error::Timeout(message)
    } else {
        Error::Network(message)
    }
}
