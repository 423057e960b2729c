//! HTTP integration for codecritic
//!
//! This crate provides the reqwest implementation of the AnalysisService trait.

mod client;
mod config;


pub use client::AnalyzeClient;
pub use config::ApiConfig;

// Re-export core types for convenience
pub use codecritic_core::{AnalysisResult, AnalysisService, CodeSubmission, Error, Result};
