//! Analysis service trait

use async_trait::async_trait;

use crate::{AnalysisResult, CodeSubmission, Result};

/// Trait for remote analyzers
///
/// Implementations issue exactly one request per call and never retry.
/// A non-success reply must be reported as [`crate::Error::Server`] carrying
/// the reply's `detail` text, if any; every other error is treated by the
/// handler as a transport failure and rendered with its `Display` text.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Submit code for analysis
    async fn analyze(&self, submission: &CodeSubmission) -> Result<AnalysisResult>;

    /// Where requests are sent, for diagnostics
    fn endpoint(&self) -> &str;
}
