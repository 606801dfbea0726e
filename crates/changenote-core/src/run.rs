//! One invocation, end to end
//!
//! Loads configuration, picks the destination note, resolves the range,
//! collects the summary and then either prints or appends the entry.
//!
//! Every git query runs before anything is written. The note is appended
//! before the checkpoint is saved, so an interrupted run re-reports its
//! range next time instead of skipping it.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::checkpoint::CheckpointStore;
use crate::config::Config;
use crate::entry::{format_entry, EntryHeader, Limits};
use crate::error::Result;
use crate::models::{ChangeRange, ChangeSummary, CommitId};
use crate::note::{append_entry, expand_home};
use crate::range::{resolve_start, RangeRequest, RangeStart};
use crate::vcs::Vcs;

/// Exit status when no destination note could be determined
pub const EXIT_MISSING_DESTINATION: i32 = 2;

/// Per-invocation switches
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Destination note given on the command line
    pub note: Option<String>,
    /// Base reference given on the command line
    pub base_ref: Option<String>,
    /// Explicit start commit
    pub since: Option<String>,
    /// Print the entry instead of writing anything
    pub dry_run: bool,
    /// Neither read nor write the checkpoint
    pub no_state: bool,
    /// Leave out the Stats section
    pub no_diffstat: bool,
    /// Destination note from the environment, lowest precedence
    pub env_note_path: Option<String>,
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No destination and not a dry run; nothing was touched
    MissingDestination,
    /// The range and working tree were empty
    NoChanges {
        end: CommitId,
        checkpoint_saved: bool,
    },
    /// The entry was rendered but not written
    Printed { entry: String },
    /// The entry was appended to `note`
    Appended {
        note: PathBuf,
        entry: String,
        checkpoint_saved: bool,
    },
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::MissingDestination => EXIT_MISSING_DESTINATION,
            _ => 0,
        }
    }
}

/// Summarize the changes since the last run and record them
pub fn run<V: Vcs + ?Sized>(
    vcs: &V,
    options: &RunOptions,
    now: NaiveDateTime,
) -> Result<Outcome> {
    let repo_root = vcs.root();
    let config = Config::load(repo_root);

    let note = first_non_blank([
        options.note.as_deref(),
        config.obsidian_note_path.as_deref(),
        options.env_note_path.as_deref(),
    ]);
    if note.is_none() && !options.dry_run {
        return Ok(Outcome::MissingDestination);
    }

    let end = vcs.head()?;
    let store = CheckpointStore::new(repo_root);
    let base_ref =
        first_non_blank([options.base_ref.as_deref()]).unwrap_or(config.base_ref.as_str());
    let request = RangeRequest {
        since: options.since.as_deref(),
        use_state: !options.no_state,
        base_ref,
    };
    let RangeStart { commit: start, source } = resolve_start(vcs, &request, &store)?;
    debug!("Range {}..{} (start from {:?})", start.short(), end.short(), source);

    let range = ChangeRange::new(start, end);
    let include_diffstat = config.include_diffstat && !options.no_diffstat;
    let summary = collect_summary(vcs, &range, include_diffstat)?;

    let persist = !options.no_state && !options.dry_run;

    if summary.is_empty() {
        info!("No changes in {}", range.to_revspec());
        if persist {
            store.save(&range.end)?;
        }
        return Ok(Outcome::NoChanges {
            end: range.end,
            checkpoint_saved: persist,
        });
    }

    let branch = vcs.branch()?;
    let repo_name = repo_root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| repo_root.display().to_string());
    let header = EntryHeader {
        timestamp: now,
        repo_name: &repo_name,
        project_name: config.project_name.as_deref(),
        branch: &branch,
        start: &range.start,
        end: &range.end,
    };
    let entry = format_entry(&header, &summary, Limits::from(&config));

    let note = match note {
        Some(note) if !options.dry_run => expand_home(note),
        _ => return Ok(Outcome::Printed { entry }),
    };

    append_entry(&note, &entry)?;
    if persist {
        store.save(&range.end)?;
    }

    Ok(Outcome::Appended {
        note,
        entry,
        checkpoint_saved: persist,
    })
}

/// Query everything that goes into an entry
///
/// The working tree is only consulted when the range itself is empty.
pub fn collect_summary<V: Vcs + ?Sized>(
    vcs: &V,
    range: &ChangeRange,
    include_diffstat: bool,
) -> Result<ChangeSummary> {
    let commits = vcs.commits(range)?;
    let files = vcs.changed_files(range)?;

    let diffstat = if include_diffstat {
        Some(vcs.diff_stat(range)?).filter(|stat| !stat.is_empty())
    } else {
        None
    };

    let working_tree = if commits.is_empty() && files.is_empty() {
        Some(vcs.working_tree_status()?).filter(|status| !status.is_empty())
    } else {
        None
    };

    Ok(ChangeSummary {
        commits,
        files,
        diffstat,
        working_tree,
    })
}

fn first_non_blank<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}
