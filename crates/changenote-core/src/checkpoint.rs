//! Checkpoint persistence
//!
//! Remembers the last commit that was written to the note so the next run
//! only reports what came after it. The record lives at
//! `.codex/obsidian-change-summary.state.json` under the repository root:
//!
//! ```json
//! {
//!   "last_sha": "0123456789abcdef..."
//! }
//! ```
//!
//! Loading never fails: a missing, unreadable or malformed record simply
//! means there is no checkpoint yet. Saving uses atomic writes (write to a
//! temp file, then rename) so readers never see a truncated record.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::CommitId;

/// Tooling directory shared with the config file
pub const TOOLING_DIR: &str = ".codex";

/// File name of the checkpoint record inside [`TOOLING_DIR`]
pub const STATE_FILE: &str = "obsidian-change-summary.state.json";

#[derive(Debug, Serialize, Deserialize)]
struct StateRecord {
    last_sha: CommitId,
}

/// Reads and writes the checkpoint record of one repository
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(repo_root: &Path) -> Self {
        Self {
            path: repo_root.join(TOOLING_DIR).join(STATE_FILE),
        }
    }

    /// Location of the record on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last recorded commit, if any
    pub fn load(&self) -> Option<CommitId> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No checkpoint at {:?}", self.path);
                return None;
            }
            Err(e) => {
                warn!("Ignoring unreadable checkpoint {:?}: {}", self.path, e);
                return None;
            }
        };

        let record: StateRecord = match serde_json::from_str(&content) {
            Ok(record) => record,
            Err(e) => {
                warn!("Ignoring malformed checkpoint {:?}: {}", self.path, e);
                return None;
            }
        };

        let sha = record.last_sha.as_str().trim();
        if sha.is_empty() {
            debug!("Checkpoint {:?} is empty", self.path);
            return None;
        }
        Some(CommitId::new(sha))
    }

    /// Record `commit` as the last reported commit
    pub fn save(&self, commit: &CommitId) -> Result<()> {
        let record = StateRecord {
            last_sha: commit.clone(),
        };
        let mut data = serde_json::to_string_pretty(&record)?;
        data.push('\n');

        atomic_write(&self.path, data.as_bytes())?;
        debug!("Saved checkpoint {} to {:?}", commit.short(), self.path);
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| Error::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| Error::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| Error::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| Error::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
