//! changenote Core Library
//!
//! This crate summarizes what changed in a git working copy since the last
//! recorded checkpoint and appends that summary as a Markdown entry to a
//! notes file (typically an Obsidian note).
//!
//! # Quick Start
//!
//! ```text
//! let vcs = GitCli::discover(&std::env::current_dir()?)?;
//! let options = RunOptions {
//!     note: Some("~/vault/Projects/app.md".into()),
//!     ..Default::default()
//! };
//! let outcome = run(&vcs, &options, chrono::Local::now().naive_local())?;
//! ```
//!
//! # Modules
//!
//! - `vcs`: Read-only git queries behind the `Vcs` trait
//! - `checkpoint`: Last reported commit, persisted under `.codex/`
//! - `range`: Start-of-range resolution (override, checkpoint, merge-base)
//! - `entry`: Markdown rendering of a change summary
//! - `note`: Append-only writes to the destination note
//! - `run`: One invocation, end to end
//! - `config`: Per-repository configuration

pub mod checkpoint;
pub mod config;
pub mod entry;
pub mod error;
pub mod models;
pub mod note;
pub mod range;
pub mod run;
pub mod vcs;

#[cfg(test)]
mod testing;

pub use checkpoint::CheckpointStore;
pub use config::Config;
pub use entry::{format_entry, truncate_list, EntryHeader, Limits};
pub use error::{Error, Result};
pub use models::{ChangeRange, ChangeSummary, CommitId, FileChange};
pub use note::append_entry;
pub use range::{resolve_start, RangeRequest, RangeStart, StartSource};
pub use run::{run, Outcome, RunOptions, EXIT_MISSING_DESTINATION};
pub use vcs::{GitCli, Vcs};
