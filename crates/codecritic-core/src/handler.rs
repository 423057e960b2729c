//! Analyze request handler
//!
//! One call to [`AnalyzeRequestHandler::handle`] corresponds to one user
//! activation of the "analyze" control: validate, send, render.

use tracing::debug;

use crate::{
    AnalysisService, CodeSubmission, Error, ErrorReport, FailureKind, Notifier, Outcome,
    ResultView,
};

/// Shown when the submission is empty after trimming.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some Python code!";

/// Suggestion text for a rejection whose body carries no `detail`.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred.";

/// Prefix for failures that never produced a server reply.
pub const TRANSPORT_ERROR_PREFIX: &str = "Network or server error: ";

/// Wires a submission through an [`AnalysisService`] into a [`ResultView`].
///
/// Concurrent calls are independent: there is no deduplication or
/// cancellation, so the view shows whichever reply resolved last.
pub struct AnalyzeRequestHandler<S, V, N> {
    service: S,
    view: V,
    notifier: N,
}

impl<S, V, N> AnalyzeRequestHandler<S, V, N>
where
    S: AnalysisService,
    V: ResultView,
    N: Notifier,
{
    /// Create a handler over explicit service, view and notifier handles
    pub fn new(service: S, view: V, notifier: N) -> Self {
        Self {
            service,
            view,
            notifier,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Handle one activation with the current contents of the input.
    pub async fn handle(&self, raw_input: &str) -> Outcome {
        let submission = match CodeSubmission::new(raw_input) {
            Ok(submission) => submission,
            Err(_) => {
                self.notifier.alert(EMPTY_INPUT_MESSAGE);
                return Outcome::EmptyInput;
            }
        };

        debug!(
            endpoint = self.service.endpoint(),
            bytes = submission.code().len(),
            "submitting code for analysis"
        );

        match self.service.analyze(&submission).await {
            Ok(result) => {
                self.view.set_suggestion(&result.suggestion);
                self.view.set_rating(&result.rating);
                Outcome::Analyzed(result)
            }
            Err(err) => {
                let report = failure_report(err);
                debug!(kind = ?report.kind, detail = %report.detail, "analysis failed");
                self.view.set_suggestion(&report.detail);
                self.view.set_rating("");
                Outcome::Failed(report)
            }
        }
    }
}

/// Convert a service error into the text shown in the suggestion region.
fn failure_report(err: Error) -> ErrorReport {
    match err {
        Error::Server { detail, .. } => ErrorReport {
            kind: FailureKind::ServerRejection,
            detail: detail
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        },
        other => ErrorReport {
            kind: FailureKind::TransportFailure,
            detail: format!("{}{}", TRANSPORT_ERROR_PREFIX, other),
        },
    }
}
