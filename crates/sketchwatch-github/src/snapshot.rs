//! On-disk commit snapshots: the batch's per-repository fetch cache.
//!
//! A snapshot is the full retrieved history for one repository as pretty
//! JSON, keyed only by `(owner, repository_name)`. The key is deliberately
//! coarse (no time window): re-running with a different window reuses the
//! existing file. Clear the snapshot directory, or pass the CLI's refetch
//! flag, to force a refresh.

use sketchwatch_core::{CommitRecord, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Cache path for one repository's snapshot: `<dir>/<owner>-<repo>`.
#[must_use]
pub fn snapshot_path(dir: &Path, owner: &str, repo: &str) -> PathBuf {
    dir.join(format!("{owner}-{repo}"))
}

/// Persist a full commit sequence, creating parent directories as needed.
pub fn save_snapshot(path: &Path, commits: &[CommitRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(commits)?;
    std::fs::write(path, json)?;
    debug!(path = %path.display(), count = commits.len(), "saved commit snapshot");
    Ok(())
}

/// Load a previously persisted commit sequence.
pub fn load_snapshot(path: &Path) -> Result<Vec<CommitRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
