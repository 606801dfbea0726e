//! Error handling
//!
//! Typed errors for git queries, range resolution and the two files this
//! crate writes (the checkpoint record and the destination note).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or writing a change summary
#[derive(Error, Debug)]
pub enum Error {
    /// A git command exited with a non-zero status
    #[error("git {operation} failed: {stderr}")]
    VcsCommand { operation: String, stderr: String },

    /// The git executable could not be started
    #[error("Failed to run git {operation}: {source}")]
    VcsSpawn {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// No start commit could be determined for the change range
    #[error("Cannot resolve the start of the change range from base reference '{base_ref}': {reason}")]
    RangeResolution { base_ref: String, reason: String },

    /// Failed to create a parent directory
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Checkpoint record could not be serialized
    #[error("Failed to serialize checkpoint: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Create an error from an I/O error with path context
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.)
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => Error::PermissionDenied {
                path,
                source: error,
            },
            _ if is_disk_full_error(&error) => Error::DiskFull {
                path,
                source: error,
            },
            _ => Error::WriteError {
                path,
                source: error,
            },
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Error::VcsSpawn { .. } => Some("Make sure git is installed and on your PATH."),
            Error::RangeResolution { .. } => Some(
                "Pass --since <sha> or --base <ref>, or set base_ref in .codex/obsidian-change-summary.json.",
            ),
            Error::DiskFull { .. } => Some("Free up disk space and try again."),
            Error::PermissionDenied { .. } => {
                Some("Check file and directory permissions on the note and the .codex directory.")
            }
            Error::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            _ => None,
        }
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for changenote operations
pub type Result<T> = std::result::Result<T, Error>;
