//! Core traits and types for codecritic
//!
//! This crate defines the data model exchanged with the remote analyzer, the
//! capability-facing seams (analysis service, result view, notifier) and the
//! [`AnalyzeRequestHandler`] that ties them together. Keeping the seams as
//! traits lets the handler run against a real HTTP client, a terminal, or
//! in-memory doubles in tests.

pub mod error;
pub mod handler;
pub mod service;
pub mod types;
pub mod view;


pub use error::{Error, Result};
pub use handler::{AnalyzeRequestHandler, EMPTY_INPUT_MESSAGE, GENERIC_ERROR_MESSAGE, TRANSPORT_ERROR_PREFIX};
pub use service::AnalysisService;
pub use types::{AnalysisResult, CodeSubmission, ErrorReport, FailureKind, Outcome};
pub use view::{Notifier, ResultView};
