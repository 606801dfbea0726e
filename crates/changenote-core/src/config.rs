//! Repository configuration
//!
//! Configuration is loaded from the first file that exists:
//! 1. `<repo>/.codex/obsidian-change-summary.json`
//! 2. `<repo>/.obsidian-change-summary.json`
//!
//! Missing files and missing keys fall back to defaults. A file that cannot
//! be read or parsed is treated as if there were no configuration at all.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::checkpoint::TOOLING_DIR;

/// Config file name inside the tooling directory
pub const CONFIG_FILE: &str = "obsidian-change-summary.json";

/// Dotfile fallback at the repository root
pub const ROOT_CONFIG_FILE: &str = ".obsidian-change-summary.json";

pub const DEFAULT_BASE_REF: &str = "origin/main";
pub const DEFAULT_MAX_COMMITS: usize = 20;
pub const DEFAULT_MAX_FILES: usize = 50;

/// Recognized options for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Destination note (may also come from the CLI or environment)
    pub obsidian_note_path: Option<String>,

    /// Label used in entry headers instead of the repository directory name
    pub project_name: Option<String>,

    /// Reference used to compute the merge-base fallback
    pub base_ref: String,

    /// Whether entries carry a Stats section
    pub include_diffstat: bool,

    /// Commits listed before the overflow line
    pub max_commits: usize,

    /// Files listed before the overflow line
    pub max_files: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            obsidian_note_path: None,
            project_name: None,
            base_ref: DEFAULT_BASE_REF.to_string(),
            include_diffstat: true,
            max_commits: DEFAULT_MAX_COMMITS,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

/// On-disk shape; bounds are signed so negative values can be rejected per key
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    obsidian_note_path: Option<String>,
    project_name: Option<String>,
    base_ref: Option<String>,
    include_diffstat: Option<bool>,
    max_commits: Option<i64>,
    max_files: Option<i64>,
}

impl Config {
    /// Load configuration for the repository at `repo_root`
    pub fn load(repo_root: &Path) -> Self {
        match Self::config_file_path(repo_root) {
            Some(path) => Self::load_from_path(&path),
            None => {
                debug!("No config file under {:?}, using defaults", repo_root);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    ///
    /// Unreadable or malformed files yield the defaults.
    pub fn load_from_path(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Ignoring unreadable config file {:?}: {}", path, e);
                return Self::default();
            }
        };

        match Self::load_from_str(&content) {
            Ok(config) => {
                debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Ignoring malformed config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse configuration from a JSON string (useful for testing)
    pub fn load_from_str(json: &str) -> serde_json::Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            obsidian_note_path: non_blank(raw.obsidian_note_path),
            project_name: non_blank(raw.project_name),
            base_ref: non_blank(raw.base_ref).unwrap_or(defaults.base_ref),
            include_diffstat: raw.include_diffstat.unwrap_or(defaults.include_diffstat),
            max_commits: bound("max_commits", raw.max_commits, defaults.max_commits),
            max_files: bound("max_files", raw.max_files, defaults.max_files),
        }
    }

    /// First existing config file for the repository
    pub fn config_file_path(repo_root: &Path) -> Option<PathBuf> {
        [
            repo_root.join(TOOLING_DIR).join(CONFIG_FILE),
            repo_root.join(ROOT_CONFIG_FILE),
        ]
        .into_iter()
        .find(|path| path.exists())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn bound(key: &str, value: Option<i64>, default: usize) -> usize {
    match value {
        None => default,
        Some(v) => match usize::try_from(v) {
            Ok(v) => v,
            Err(_) => {
                warn!("Ignoring {} = {}: must not be negative, using {}", key, v, default);
                default
            }
        },
    }
}
