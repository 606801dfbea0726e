//! Data models for changenote
//!
//! Defines the values passed between the git facade, the range resolver
//! and the entry formatter: commit ids, ranges, file changes and the
//! summary of a range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters shown for an abbreviated commit id
pub const SHORT_ID_LEN: usize = 7;

/// Opaque handle to a commit
///
/// Never parsed; only compared and abbreviated for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First [`SHORT_ID_LEN`] characters of the id
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_ID_LEN) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CommitId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Reportable range of history; `end` is always the current HEAD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRange {
    pub start: CommitId,
    pub end: CommitId,
}

impl ChangeRange {
    pub fn new(start: CommitId, end: CommitId) -> Self {
        Self { start, end }
    }

    /// Two-dot revision range as understood by git
    pub fn to_revspec(&self) -> String {
        format!("{}..{}", self.start, self.end)
    }
}

/// A changed path between two commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// git name-status code (`M`, `A`, `D`, `R100`, `C75`, ...)
    pub status: String,
    /// New path for renames and copies; empty for a bare status line
    pub path: String,
    /// Source path, set for renames and copies
    pub old_path: Option<String>,
}

impl FileChange {
    pub fn new(status: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            path: path.into(),
            old_path: None,
        }
    }

    pub fn moved(
        status: impl Into<String>,
        old_path: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            status: status.into(),
            path: path.into(),
            old_path: Some(old_path.into()),
        }
    }
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.old_path {
            Some(old) => write!(f, "{} {} -> {}", self.status, old, self.path),
            None if self.path.is_empty() => f.write_str(&self.status),
            None => write!(f, "{} {}", self.status, self.path),
        }
    }
}

/// Everything that goes into one note entry besides the header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    /// One `"<short id> <subject>"` line per commit, oldest first
    pub commits: Vec<String>,
    pub files: Vec<FileChange>,
    /// `None` when diffstat is disabled or git reported nothing
    pub diffstat: Option<String>,
    /// Porcelain status lines; only collected when the range is empty
    pub working_tree: Option<Vec<String>>,
}

impl ChangeSummary {
    /// True when there is nothing worth writing down
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
            && self.files.is_empty()
            && self.working_tree.as_ref().map_or(true, |wt| wt.is_empty())
    }
}
