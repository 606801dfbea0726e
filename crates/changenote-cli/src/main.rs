//! changenote CLI
//!
//! Appends a summary of recent git changes to an Obsidian note.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use changenote_core::{run, GitCli, RunOptions};

mod output;

use output::{Output, OutputFormat};

/// Environment variable supplying the note path when neither flag nor config does
const NOTE_PATH_ENV: &str = "OBSIDIAN_NOTE_PATH";

/// Environment variable overriding the log filter
const LOG_ENV: &str = "CHANGENOTE_LOG";

#[derive(Parser, Debug)]
#[command(name = "changenote")]
#[command(about = "Append a git change summary to an Obsidian note")]
#[command(version)]
struct Cli {
    /// Path to the Obsidian .md note
    #[arg(long)]
    note: Option<String>,

    /// Base ref used to compute the merge-base (default: origin/main)
    #[arg(long)]
    base: Option<String>,

    /// Start commit (overrides state and base)
    #[arg(long)]
    since: Option<String>,

    /// Print the entry without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Do not read or write the state file
    #[arg(long)]
    no_state: bool,

    /// Do not include the diffstat section
    #[arg(long)]
    no_diffstat: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', long, value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn run_options(&self, env_note_path: Option<String>) -> RunOptions {
        RunOptions {
            note: self.note.clone(),
            base_ref: self.base.clone(),
            since: self.since.clone(),
            dry_run: self.dry_run,
            no_state: self.no_state,
            no_diffstat: self.no_diffstat,
            env_note_path,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match try_main(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(hint) = e
                .downcast_ref::<changenote_core::Error>()
                .and_then(|err| err.recovery_suggestion())
            {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> Result<u8> {
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let cwd = match &cli.repo {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let vcs = GitCli::discover(&cwd)?;

    let options = cli.run_options(std::env::var(NOTE_PATH_ENV).ok());
    let outcome = run(&vcs, &options, chrono::Local::now().naive_local())?;
    debug!("Run finished: {:?}", outcome);

    output.print_outcome(&outcome);
    Ok(u8::try_from(outcome.exit_code()).unwrap_or(1))
}

/// Log to stderr; `CHANGENOTE_LOG` takes precedence over the verbosity flag
fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "changenote_core={},changenote={}",
            log_level, log_level
        ))
    });

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
