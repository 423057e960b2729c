//! Data exchanged with the remote analyzer

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Source text submitted for analysis, trimmed of surrounding whitespace.
///
/// Serializes to the request body the analyzer expects: `{"code": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSubmission {
    code: String,
}

impl CodeSubmission {
    /// Trim `raw` and wrap it. Fails on empty or whitespace-only input.
    pub fn new(raw: &str) -> Result<Self> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(Error::InvalidInput("submission is empty".to_string()));
        }
        Ok(Self {
            code: code.to_string(),
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Successful analyzer reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub suggestion: String,
    pub rating: String,
}

/// Which side of the exchange failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Non-success HTTP status.
    ServerRejection,
    /// The request could not be sent or the reply could not be decoded.
    TransportFailure,
}

/// Failure reply, rendered in place of a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: FailureKind,
    /// Text written to the suggestion region.
    pub detail: String,
}

/// What a single handler invocation produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing to submit; no request was issued.
    EmptyInput,
    Analyzed(AnalysisResult),
    Failed(ErrorReport),
}

impl Outcome {
    pub fn is_analyzed(&self) -> bool {
        matches!(self, Outcome::Analyzed(_))
    }
}
