//! Output formatting for CLI
//!
//! Provides consistent output formatting for run outcomes:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use changenote_core::Outcome;

/// Shown when no destination note could be determined
pub const MISSING_DESTINATION: &str = "Missing Obsidian note path. Set it in \
.codex/obsidian-change-summary.json as obsidian_note_path, or pass --note, \
or set OBSIDIAN_NOTE_PATH.";

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the result of a run
    ///
    /// Printed entries reach stdout in every mode; that is the point of a
    /// dry run.
    pub fn print_outcome(&self, outcome: &Outcome) {
        if let Outcome::MissingDestination = outcome {
            eprintln!("{}", MISSING_DESTINATION);
        }

        match self.format {
            OutputFormat::Human => {
                if let Some(text) = human_text(outcome) {
                    print!("{}", text);
                }
            }
            OutputFormat::Json => println!("{}", outcome_json(outcome)),
            OutputFormat::Quiet => {
                if let Outcome::Printed { entry } = outcome {
                    print!("{}", entry);
                }
            }
        }
    }
}

fn human_text(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::MissingDestination => None,
        Outcome::NoChanges { .. } => Some(
            "No changes detected (no commits, no diff, clean working tree).\n".to_string(),
        ),
        Outcome::Printed { entry } => Some(entry.clone()),
        Outcome::Appended { note, .. } => Some(format!(
            "Appended change summary to: {}\n",
            note.display()
        )),
    }
}

fn outcome_json(outcome: &Outcome) -> serde_json::Value {
    match outcome {
        Outcome::MissingDestination => serde_json::json!({
            "status": "missing_destination",
            "message": MISSING_DESTINATION
        }),
        Outcome::NoChanges {
            end,
            checkpoint_saved,
        } => serde_json::json!({
            "status": "no_changes",
            "end": end,
            "checkpoint_saved": checkpoint_saved
        }),
        Outcome::Printed { entry } => serde_json::json!({
            "status": "printed",
            "entry": entry
        }),
        Outcome::Appended {
            note,
            entry,
            checkpoint_saved,
        } => serde_json::json!({
            "status": "appended",
            "note": note.display().to_string(),
            "entry": entry,
            "checkpoint_saved": checkpoint_saved
        }),
    }
}
