use anyhow::Result;
use clap::Parser;
use colored::*;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codecritic_cli::{
    Prompt, SubmissionSource, TerminalNotifier, TerminalView, display_banner, exit_code,
    print_help, read_prompt, read_submission,
};
use codecritic_core::{AnalysisService, AnalyzeRequestHandler, Outcome};
use codecritic_http::{AnalyzeClient, ApiConfig};

type Handler = AnalyzeRequestHandler<AnalyzeClient, Arc<TerminalView>, TerminalNotifier>;

#[derive(Parser)]
#[command(name = "codecritic")]
#[command(about = "Send Python code to a remote analyzer and show its suggestion and rating", long_about = None)]
struct Cli {
    /// Python file to analyze ("-" reads stdin)
    file: Option<PathBuf>,

    /// Analyze this code instead of reading a file
    #[arg(short, long, conflicts_with = "file")]
    code: Option<String>,

    /// Start an interactive session
    #[arg(short, long, conflicts_with_all = ["file", "code"])]
    interactive: bool,

    /// Analyzer base URL (overrides CODECRITIC_API_URL)
    #[arg(long, conflicts_with = "hosted")]
    api_url: Option<String>,

    /// Use the hosted analyzer
    #[arg(long)]
    hosted: bool,

    /// Give up on a request after this many seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,
}

impl Cli {
    fn api_config(&self) -> Result<ApiConfig> {
        let mut config = ApiConfig::from_env()?;

        if self.hosted {
            config = config.with_base_url(ApiConfig::HOSTED_URL);
        }
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// One-shot source, or `None` for an interactive session
    fn source(&self) -> Option<SubmissionSource> {
        if self.interactive {
            return None;
        }
        if let Some(code) = &self.code {
            return Some(SubmissionSource::Inline(code.clone()));
        }
        match &self.file {
            Some(path) if path.as_os_str() == "-" => Some(SubmissionSource::Stdin),
            Some(path) => Some(SubmissionSource::File(path.clone())),
            None if !io::stdin().is_terminal() => Some(SubmissionSource::Stdin),
            None => None,
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "codecritic=warn,codecritic_core=warn,codecritic_http=warn".into());

    // stdout carries the rendered result
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Loads .env before the filter reads RUST_LOG
    let config = cli.api_config()?;
    init_tracing();
    debug!(base_url = %config.base_url, timeout_ms = ?config.timeout_ms, "analyzer configured");

    let view = Arc::new(TerminalView::new());
    let handler = AnalyzeRequestHandler::new(AnalyzeClient::new(config)?, view.clone(), TerminalNotifier);

    let Some(source) = cli.source() else {
        return run_interactive(&handler, &view).await;
    };

    let code = read_submission(&source)?;
    let outcome = handler.handle(&code).await;
    if outcome != Outcome::EmptyInput {
        view.render()?;
    }

    let code = exit_code(&outcome);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

async fn run_interactive(handler: &Handler, view: &TerminalView) -> Result<()> {
    display_banner(handler.service().endpoint());

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    loop {
        print!("{} ", "codecritic>".green().bold());
        io::stdout().flush()?;

        match read_prompt(&mut reader)? {
            Prompt::Exit => {
                println!("{}", "👋 Goodbye!".green());
                break;
            }
            Prompt::Help => print_help(),
            Prompt::Submit(code) => {
                if !code.trim().is_empty() {
                    println!("{} Analyzing...", "🔍".blue());
                }
                if handler.handle(&code).await != Outcome::EmptyInput {
                    view.render()?;
                    println!();
                }
            }
        }
    }

    Ok(())
}
