//! Checkboard - create a Trello board from a markdown checklist.
//!
//! Parses the checklist, categorizes every task and either prints a
//! preview (`--dry-run`) or creates the board, labels, lists and cards.

use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use checkboard::{
    execute_import, load_document, plan_import, render_preview, BoardConfig, Credentials,
    TrelloClient,
};

/// Create a Trello board from a markdown checklist
#[derive(Parser)]
#[command(name = "checkboard")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Markdown file path
    #[arg(short, long, default_value = "project_plan.md")]
    file: String,

    /// Board name (overrides the config file and document title)
    #[arg(short, long)]
    board_name: Option<String>,

    /// Show what would be created without calling Trello
    #[arg(short, long)]
    dry_run: bool,

    /// Custom configuration file (JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    // Credentials may live in a local .env file
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let file = expand_path(&cli.file);
    let config_path = cli.config.as_deref().map(expand_path);

    let doc = load_document(&file)?;
    let config = BoardConfig::load(config_path.as_deref())?;

    println!("Parsing tasks from {}...", file.display());
    let plan = plan_import(doc, &config, cli.board_name.as_deref(), &file);
    println!("Found {} tasks across {} sections", plan.tasks.len(), plan.section_count);

    if cli.dry_run {
        println!();
        print!("{}", render_preview(&plan, &config));
        return Ok(());
    }

    let credentials = Credentials::from_env()?;
    let mut trello = TrelloClient::new(credentials)?;

    println!("Creating Trello board: '{}'...", plan.board_name);
    let summary = execute_import(&plan, &config, &mut trello)?;

    println!();
    println!("Trello board created.");
    println!("Summary: {} cards created, {} failed", summary.created, summary.failed);
    println!("Check your Trello dashboard for board: '{}'", plan.board_name);

    Ok(())
}

/// Expand `~` and environment variables in a user-supplied path.
fn expand_path(raw: &str) -> PathBuf {
    let expanded = shellexpand::full(raw).unwrap_or(Cow::Borrowed(raw));
    PathBuf::from(expanded.as_ref())
}
