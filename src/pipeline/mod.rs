//! Commit pipeline: classify changes, write the changelog, commit and push.
//!
//! Steps, each of which aborts the rest on failure:
//! 1. list changed paths (`git status --porcelain -z`)
//! 2. classify them and compose the commit message
//! 3. append a changelog section with diff previews
//! 4. `git add --all`, `git commit -m <message>`, `git push`

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::changelog::{append_changelog, collect_diffs, current_timestamp, render_section};
use crate::changes::{ChangeSummary, compose_commit_message};
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::git::{GitBackend, parse_porcelain};
use crate::watcher::Trigger;

/// Result of a pipeline run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Working tree was clean; nothing was written or committed.
    NoChanges,
    Committed {
        message: String,
        files: usize,
        pushed: bool,
    },
    /// Dry run: what would have been committed and appended.
    DryRun {
        message: String,
        changelog_section: Option<String>,
    },
}

/// The add/commit/push pipeline over a git backend.
pub struct CommitPipeline<G> {
    git: G,
    workdir: PathBuf,
    config: PipelineConfig,
}

impl<G: GitBackend> CommitPipeline<G> {
    /// `workdir` is the repository work directory; a relative changelog path
    /// is resolved against it.
    pub fn new(git: G, workdir: impl Into<PathBuf>, config: PipelineConfig) -> Self {
        Self {
            git,
            workdir: workdir.into(),
            config,
        }
    }

    /// Absolute changelog location, if the changelog is enabled.
    pub fn changelog_path(&self) -> Option<PathBuf> {
        self.config
            .changelog
            .as_ref()
            .map(|settings| resolve(&self.workdir, &settings.path))
    }

    /// Run the pipeline once.
    pub async fn run(&self) -> Result<PipelineOutcome, PipelineError> {
        let status = self
            .git
            .status_porcelain()
            .await
            .map_err(PipelineError::Status)?;
        let files = parse_porcelain(&status);
        let summary = ChangeSummary::from_paths(&files);

        if summary.is_empty() {
            return Ok(PipelineOutcome::NoChanges);
        }

        for (category, paths) in summary.non_empty() {
            debug!(%category, count = paths.len(), "Classified changes");
        }
        let message = compose_commit_message(&summary, &self.config.header);

        let section = match &self.config.changelog {
            Some(settings) => {
                let diffs = collect_diffs(
                    &self.git,
                    &files,
                    &settings.diff_extensions,
                    settings.diff_limit,
                )
                .await;
                Some(render_section(&current_timestamp(), &summary, &diffs))
            }
            None => None,
        };

        if self.config.dry_run {
            return Ok(PipelineOutcome::DryRun {
                message,
                changelog_section: section,
            });
        }

        if let (Some(section), Some(path)) = (&section, self.changelog_path()) {
            append_changelog(&path, section)?;
        }

        self.git.add_all().await.map_err(PipelineError::Stage)?;
        self.git
            .commit(&message)
            .await
            .map_err(PipelineError::Commit)?;

        if self.config.push {
            self.git.push().await.map_err(PipelineError::Push)?;
        }

        Ok(PipelineOutcome::Committed {
            message,
            files: summary.total(),
            pushed: self.config.push,
        })
    }

    /// Run the pipeline once and print the result.
    ///
    /// The result is returned so one-shot callers can turn a failure into a
    /// non-zero exit.
    pub async fn run_and_report(&self) -> Result<PipelineOutcome, PipelineError> {
        let result = self.run().await;
        report(&result);
        result
    }
}

fn resolve(workdir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workdir.join(path)
    }
}

/// Print a pipeline result for the user.
pub fn report(result: &Result<PipelineOutcome, PipelineError>) {
    match result {
        Ok(PipelineOutcome::NoChanges) => {
            info!("No changes to commit");
            println!("No changes to commit.");
        }
        Ok(PipelineOutcome::Committed {
            message,
            files,
            pushed,
        }) => {
            info!(files, pushed, "Committed changes");
            let verb = if *pushed { "pushed" } else { "committed" };
            println!("✓ PBIP smart commit {}:", verb);
            println!("{}", message);
        }
        Ok(PipelineOutcome::DryRun {
            message,
            changelog_section,
        }) => {
            println!("\n--- Dry Run Output ---\n");
            println!("{}", message);
            if let Some(section) = changelog_section {
                println!("{}", section);
            }
        }
        Err(e) => {
            error!("Pipeline run failed: {}", e);
            eprintln!("✗ Git operation failed: {}", e);
        }
    }
}

#[async_trait]
impl<G: GitBackend> Trigger for CommitPipeline<G> {
    async fn fire(&self) {
        let _ = self.run_and_report().await;
    }
}
