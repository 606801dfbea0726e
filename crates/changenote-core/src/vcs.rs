//! Version-control queries
//!
//! The [`Vcs`] trait exposes the handful of read-only questions the rest of
//! the crate asks about a repository. [`GitCli`] answers them by running the
//! `git` executable against a discovered repository root.
//!
//! Every query is a blocking process call. A non-zero exit status becomes
//! [`Error::VcsCommand`] carrying the invoked operation and git's stderr.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{ChangeRange, CommitId, FileChange};

/// Read-only repository queries
pub trait Vcs {
    /// Root of the working copy the queries run against
    fn root(&self) -> &Path;

    /// Current HEAD commit
    fn head(&self) -> Result<CommitId>;

    /// Abbreviated name of the checked-out branch (`HEAD` when detached)
    fn branch(&self) -> Result<String>;

    /// Most recent common ancestor of `base_ref` and HEAD
    fn merge_base(&self, base_ref: &str) -> Result<CommitId>;

    /// One `"<short id> <subject>"` line per commit in the range, oldest first
    fn commits(&self, range: &ChangeRange) -> Result<Vec<String>>;

    /// Paths changed across the range with their status
    fn changed_files(&self, range: &ChangeRange) -> Result<Vec<FileChange>>;

    /// Short insertion/deletion summary; empty when nothing differs
    fn diff_stat(&self, range: &ChangeRange) -> Result<String>;

    /// Porcelain status lines for uncommitted changes
    fn working_tree_status(&self) -> Result<Vec<String>>;
}

/// [`Vcs`] backed by the `git` command-line tool
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Locate the repository containing `cwd` and bind to its root
    pub fn discover(cwd: &Path) -> Result<Self> {
        let out = run_git(cwd, &["rev-parse", "--show-toplevel"])?;
        let root = PathBuf::from(out.trim());
        debug!("Repository root: {:?}", root);
        Ok(Self { root })
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        run_git(&self.root, args)
    }
}

impl Vcs for GitCli {
    fn root(&self) -> &Path {
        &self.root
    }

    fn head(&self) -> Result<CommitId> {
        let out = self.git(&["rev-parse", "HEAD"])?;
        Ok(CommitId::new(out.trim()))
    }

    fn branch(&self) -> Result<String> {
        let out = self.git(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(out.trim().to_string())
    }

    fn merge_base(&self, base_ref: &str) -> Result<CommitId> {
        let out = self.git(&["merge-base", base_ref, "HEAD"])?;
        Ok(CommitId::new(out.trim()))
    }

    fn commits(&self, range: &ChangeRange) -> Result<Vec<String>> {
        let revspec = range.to_revspec();
        let out = self.git(&[
            "log",
            "--no-decorate",
            "--reverse",
            "--format=%h %s",
            &revspec,
        ])?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    fn changed_files(&self, range: &ChangeRange) -> Result<Vec<FileChange>> {
        let revspec = range.to_revspec();
        let out = self.git(&["diff", "--name-status", &revspec])?;
        Ok(parse_name_status(&out))
    }

    fn diff_stat(&self, range: &ChangeRange) -> Result<String> {
        let revspec = range.to_revspec();
        let out = self.git(&["diff", "--shortstat", &revspec])?;
        Ok(out.trim().to_string())
    }

    fn working_tree_status(&self) -> Result<Vec<String>> {
        let out = self.git(&["status", "--porcelain"])?;
        Ok(parse_porcelain(&out))
    }
}

fn run_git(cwd: &Path, args: &[&str]) -> Result<String> {
    let operation = args.join(" ");
    debug!("Executing git command: git {} (in {:?})", operation, cwd);

    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|source| Error::VcsSpawn {
            operation: operation.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!("git {} exited with {}: {}", operation, output.status, stderr);
        return Err(Error::VcsCommand { operation, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `git diff --name-status` output
///
/// Rename (`R*`) and copy (`C*`) lines carry two tab-separated paths and
/// become an old -> new change.
pub fn parse_name_status(output: &str) -> Vec<FileChange> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut parts = line.split('\t');
            let status = parts.next().unwrap_or_default().trim().to_string();
            let paths: Vec<&str> = parts.map(str::trim).filter(|p| !p.is_empty()).collect();

            let is_move = status.starts_with('R') || status.starts_with('C');
            match paths.as_slice() {
                [old, new, ..] if is_move => FileChange::moved(status, *old, *new),
                [path, ..] => FileChange::new(status, *path),
                [] => FileChange::new(status, ""),
            }
        })
        .collect()
}

/// Parse `git status --porcelain` output, keeping the status columns intact
pub fn parse_porcelain(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim_end().to_string())
        .collect()
}
