//! UI utilities for the CLI

use colored::*;
use crossterm::terminal::size;
use std::io::{self, Write};
use std::sync::Mutex;

use codecritic_core::{Notifier, Outcome, ResultView};

/// Display startup banner
pub fn display_banner(endpoint: &str) {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(67, terminal_width.saturating_sub(4)).max(40);

    let top_border = format!("┌{}┐", "─".repeat(banner_width - 2));
    let bottom_border = format!("└{}┘", "─".repeat(banner_width - 2));
    let empty_line = format!("│{}│", " ".repeat(banner_width - 2));

    println!();
    println!("{}", top_border.blue());
    println!("{}", empty_line.blue());

    let title = "codecritic - Python code review";
    println!(
        "{}{}{}",
        "│  ".blue(),
        title.blue().bold(),
        format!("{}│", " ".repeat(banner_width - title.len() - 4)).blue()
    );

    println!("{}", empty_line.blue());

    let target = truncate(endpoint, banner_width - 14);
    let lines = [
        "Paste code, then press Enter on an empty line".to_string(),
        format!("Analyzer: {}", target),
    ];
    for line in &lines {
        let padding = (banner_width - 4).saturating_sub(line.chars().count());
        println!("{}", format!("│  {}{}│", line, " ".repeat(padding)).blue());
    }

    println!("{}", empty_line.blue());
    println!("{}", bottom_border.blue());
    println!();
    println!("{}", "💡 Tip: type 'help' for commands".dimmed());
    println!();
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Paste Python code; an empty line submits it", "code".green());
    println!("  {} - Show this help message", "help".green());
    println!("  {} - Exit the application", "exit/quit".green());
    println!();
    println!("{}", "Example:".bold());
    println!("  for i in range(len(items)):");
    println!("      print(items[i])");
    println!("  <empty line>");
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Regions {
    suggestion: String,
    rating: String,
}

/// Suggestion and rating regions rendered to the terminal.
///
/// Writes only update the regions; [`TerminalView::render`] prints them.
#[derive(Debug, Default)]
pub struct TerminalView {
    regions: Mutex<Regions>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current (suggestion, rating) pair
    pub fn snapshot(&self) -> (String, String) {
        let regions = self.lock();
        (regions.suggestion.clone(), regions.rating.clone())
    }

    /// Print both regions to stdout
    pub fn render(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        self.render_to(&mut stdout)?;
        stdout.flush()
    }

    /// Print both regions to `out`. An empty rating region is omitted.
    pub fn render_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (suggestion, rating) = self.snapshot();

        writeln!(out, "{} {}", "Suggestion:".bold(), suggestion)?;
        if !rating.is_empty() {
            writeln!(out, "{} {}", "Rating:".bold(), rating.green())?;
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Regions> {
        // A poisoned lock still holds the last complete write.
        self.regions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ResultView for TerminalView {
    fn set_suggestion(&self, text: &str) {
        self.lock().suggestion = text.to_string();
    }

    fn set_rating(&self, text: &str) {
        self.lock().rating = text.to_string();
    }
}

/// Prints alerts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{} {}", "⚠️".yellow(), message.yellow());
    }
}

/// Process exit status for an outcome
pub fn exit_code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Analyzed(_) => 0,
        Outcome::Failed(_) => 1,
        Outcome::EmptyInput => 2,
    }
}
