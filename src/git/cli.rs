//! Git subprocess backend: status, diff, add, commit, push.
//!
//! All operations shell out to the system `git` binary, inheriting the user's
//! existing git config, SSH agent, and credential store.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::config::DEFAULT_GIT_TIMEOUT_SECS;
use crate::error::GitError;

/// Trait for the git operations the commit pipeline needs.
///
/// This abstraction allows mocking git in pipeline tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitBackend: Send + Sync {
    /// Raw `git status --porcelain -z` output (NUL-terminated records).
    async fn status_porcelain(&self) -> Result<String, GitError>;

    /// Unified diff of the working tree for a single path.
    async fn diff(&self, path: &str) -> Result<String, GitError>;

    /// Stage every change in the working tree.
    async fn add_all(&self) -> Result<(), GitError>;

    async fn commit(&self, message: &str) -> Result<(), GitError>;

    async fn push(&self) -> Result<(), GitError>;
}

/// Backend that runs the real `git` executable inside a work directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
    timeout: Duration,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            timeout: Duration::from_secs(DEFAULT_GIT_TIMEOUT_SECS),
        }
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a git command and return its stdout, or a descriptive error.
    async fn run_git(&self, args: &[&str], operation: &'static str) -> Result<String, GitError> {
        debug!("Running git {} in {}", args.join(" "), self.workdir.display());

        let output = timeout(
            self.timeout,
            Command::new("git")
                .args(args)
                .current_dir(&self.workdir)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| GitError::Timeout {
            operation,
            secs: self.timeout.as_secs(),
        })?
        .map_err(|source| GitError::SpawnFailed { operation, source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(GitError::NonZeroExit {
                operation,
                code,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl GitBackend for GitCli {
    async fn status_porcelain(&self) -> Result<String, GitError> {
        self.run_git(&["status", "--porcelain", "-z"], "status").await
    }

    async fn diff(&self, path: &str) -> Result<String, GitError> {
        self.run_git(&["diff", "--", path], "diff").await
    }

    async fn add_all(&self) -> Result<(), GitError> {
        self.run_git(&["add", "--all"], "add").await.map(drop)
    }

    async fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run_git(&["commit", "-m", message], "commit")
            .await
            .map(drop)
    }

    async fn push(&self) -> Result<(), GitError> {
        self.run_git(&["push"], "push").await.map(drop)
    }
}
