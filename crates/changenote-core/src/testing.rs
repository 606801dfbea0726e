//! In-memory [`Vcs`] for unit tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{ChangeRange, CommitId, FileChange};
use crate::vcs::Vcs;

/// Fixed answers for every query
///
/// Range queries return their canned values only when the range is
/// non-empty (`start != end`), which mirrors git for a fully reported HEAD.
pub(crate) struct FakeVcs {
    root: PathBuf,
    head: CommitId,
    branch: String,
    merge_bases: HashMap<String, CommitId>,
    commits: Vec<String>,
    files: Vec<FileChange>,
    diffstat: String,
    status: Vec<String>,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeVcs {
    pub(crate) fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            head: CommitId::new("feedc0ffee0000000000000000000000000000ee"),
            branch: "main".to_string(),
            merge_bases: HashMap::new(),
            commits: Vec::new(),
            files: Vec::new(),
            diffstat: String::new(),
            status: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn with_head(mut self, head: &str) -> Self {
        self.head = CommitId::new(head);
        self
    }

    pub(crate) fn with_branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    pub(crate) fn with_merge_base(mut self, base_ref: &str, commit: &str) -> Self {
        self.merge_bases
            .insert(base_ref.to_string(), CommitId::new(commit));
        self
    }

    pub(crate) fn with_commits(mut self, commits: &[&str]) -> Self {
        self.commits = commits.iter().map(|c| c.to_string()).collect();
        self
    }

    pub(crate) fn with_files(mut self, files: Vec<FileChange>) -> Self {
        self.files = files;
        self
    }

    pub(crate) fn with_diffstat(mut self, diffstat: &str) -> Self {
        self.diffstat = diffstat.to_string();
        self
    }

    pub(crate) fn with_status(mut self, status: &[&str]) -> Self {
        self.status = status.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Names of the queries made so far, in order
    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }
}

impl Vcs for FakeVcs {
    fn root(&self) -> &Path {
        &self.root
    }

    fn head(&self) -> Result<CommitId> {
        self.record("head");
        Ok(self.head.clone())
    }

    fn branch(&self) -> Result<String> {
        self.record("branch");
        Ok(self.branch.clone())
    }

    fn merge_base(&self, base_ref: &str) -> Result<CommitId> {
        self.record("merge_base");
        self.merge_bases
            .get(base_ref)
            .cloned()
            .ok_or_else(|| Error::VcsCommand {
                operation: format!("merge-base {} HEAD", base_ref),
                stderr: format!("fatal: Not a valid object name {}", base_ref),
            })
    }

    fn commits(&self, range: &ChangeRange) -> Result<Vec<String>> {
        self.record("commits");
        if range.start == range.end {
            return Ok(Vec::new());
        }
        Ok(self.commits.clone())
    }

    fn changed_files(&self, range: &ChangeRange) -> Result<Vec<FileChange>> {
        self.record("changed_files");
        if range.start == range.end {
            return Ok(Vec::new());
        }
        Ok(self.files.clone())
    }

    fn diff_stat(&self, range: &ChangeRange) -> Result<String> {
        self.record("diff_stat");
        if range.start == range.end {
            return Ok(String::new());
        }
        Ok(self.diffstat.clone())
    }

    fn working_tree_status(&self) -> Result<Vec<String>> {
        self.record("working_tree_status");
        Ok(self.status.clone())
    }
}
