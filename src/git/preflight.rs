//! Startup checks: git is installed and the watch root is inside a work tree.

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::debug;

use crate::error::GitError;

/// Check that the `git` executable is on `PATH`.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_git_installed() -> Result<PathBuf, GitError> {
    which::which("git").map_err(|_| GitError::NotInstalled)
}

/// Find the work directory of the repository containing `path`.
///
/// Walks up from `path` the same way `git` does. Bare repositories are
/// rejected because there is no working tree to stage from.
pub fn discover_workdir(path: &Path) -> Result<PathBuf, GitError> {
    let repo = Repository::discover(path).map_err(|source| GitError::NotARepository {
        path: path.to_path_buf(),
        source,
    })?;

    let workdir = repo
        .workdir()
        .ok_or_else(|| GitError::BareRepository(repo.path().to_path_buf()))?
        .to_path_buf();

    debug!("Discovered repository work directory {}", workdir.display());
    Ok(workdir)
}
