//! Terminal front end for codecritic

mod input;
mod ui;


pub use input::{Prompt, SubmissionSource, read_prompt, read_submission};
pub use ui::{TerminalNotifier, TerminalView, display_banner, exit_code, print_help};

// Re-export core types
pub use codecritic_core::{Error, Outcome, Result};
