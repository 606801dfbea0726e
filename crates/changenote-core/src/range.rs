//! Change-range resolution
//!
//! The end of the range is always HEAD. The start is the first of:
//! 1. an explicit override
//! 2. the stored checkpoint (when state is enabled)
//! 3. the merge-base of the base reference and HEAD

use tracing::debug;

use crate::checkpoint::CheckpointStore;
use crate::error::{Error, Result};
use crate::models::CommitId;
use crate::vcs::Vcs;

/// Where the start of the range came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartSource {
    Override,
    Checkpoint,
    MergeBase,
}

/// Resolved start commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeStart {
    pub commit: CommitId,
    pub source: StartSource,
}

/// Inputs for [`resolve_start`]
#[derive(Debug, Clone, Copy)]
pub struct RangeRequest<'a> {
    /// Explicit start commit; wins over everything else
    pub since: Option<&'a str>,
    /// Whether the stored checkpoint may be consulted
    pub use_state: bool,
    /// Reference for the merge-base fallback
    pub base_ref: &'a str,
}

/// Decide where the reportable range starts
pub fn resolve_start<V: Vcs + ?Sized>(
    vcs: &V,
    request: &RangeRequest<'_>,
    store: &CheckpointStore,
) -> Result<RangeStart> {
    if let Some(since) = request.since.map(str::trim).filter(|s| !s.is_empty()) {
        debug!("Range starts at explicit override {}", since);
        return Ok(RangeStart {
            commit: CommitId::new(since),
            source: StartSource::Override,
        });
    }

    if request.use_state {
        if let Some(commit) = store.load() {
            debug!("Range starts at checkpoint {}", commit.short());
            return Ok(RangeStart {
                commit,
                source: StartSource::Checkpoint,
            });
        }
    }

    match vcs.merge_base(request.base_ref) {
        Ok(commit) => {
            debug!(
                "Range starts at merge-base {} of {}",
                commit.short(),
                request.base_ref
            );
            Ok(RangeStart {
                commit,
                source: StartSource::MergeBase,
            })
        }
        Err(Error::VcsCommand { stderr, .. }) => Err(Error::RangeResolution {
            base_ref: request.base_ref.to_string(),
            reason: stderr,
        }),
        Err(e) => Err(e),
    }
}
