//! Error types for pbip-autopush modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from establishing the filesystem subscription.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Watch path '{}' is not accessible: {source}", path.display())]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to watch '{}': {source}", path.display())]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found on PATH")]
    NotInstalled,

    #[error("'{}' is not inside a git repository: {source}", path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Repository at '{}' is bare; a working tree is required", .0.display())]
    BareRepository(PathBuf),

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with code {code}: {stderr}")]
    NonZeroExit {
        operation: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("git {operation} timed out after {secs} seconds")]
    Timeout { operation: &'static str, secs: u64 },
}

/// Errors from changelog operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to write changelog: {0}")]
    WriteFailed(#[source] std::io::Error),
}

/// Errors from a single commit pipeline run.
///
/// Each variant names the step that failed; the steps after it were skipped.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to list changed files: {0}")]
    Status(#[source] GitError),

    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    #[error("Failed to stage changes: {0}")]
    Stage(#[source] GitError),

    #[error("Failed to create commit: {0}")]
    Commit(#[source] GitError),

    #[error("Failed to push: {0}")]
    Push(#[source] GitError),
}

/// Errors from validating configuration values.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,
}
