//! pbip-autopush - CLI entry point.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pbip_autopush::config::{
    DEFAULT_CHANGELOG_PATH, DEFAULT_COMMIT_HEADER, DEFAULT_DEBOUNCE_SECS, DEFAULT_DIFF_EXTENSIONS,
    DEFAULT_DIFF_LIMIT, DEFAULT_GIT_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_MS,
};
use pbip_autopush::git::{GitCli, check_git_installed, discover_workdir};
use pbip_autopush::watcher::{run_debounce_loop, start_watcher};
use pbip_autopush::{ChangelogSettings, CommitPipeline, DebounceSettings, PipelineConfig, WatcherState};

/// Watch a PBIP project and auto-commit changes once they settle.
#[derive(Parser, Debug)]
#[command(name = "pbip-autopush")]
#[command(about = "Watch a PBIP project and auto-commit changes once they settle")]
#[command(version)]
struct Cli {
    /// Directory to watch (must be inside a git working tree)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Seconds without changes before committing
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_SECS)]
    debounce: u64,

    /// Milliseconds between checks of the pending state
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_interval: u64,

    /// Path to changelog file, relative to the repository root
    #[arg(short = 'o', long, default_value = DEFAULT_CHANGELOG_PATH)]
    changelog: PathBuf,

    /// Skip writing the changelog
    #[arg(long)]
    no_changelog: bool,

    /// Maximum characters of diff embedded per file
    #[arg(long, default_value_t = DEFAULT_DIFF_LIMIT)]
    diff_limit: usize,

    /// File extension whose diff is embedded in the changelog (repeatable)
    #[arg(long = "diff-ext", value_name = "EXT")]
    diff_extensions: Vec<String>,

    /// First line of the commit message
    #[arg(long, default_value = DEFAULT_COMMIT_HEADER)]
    header: String,

    /// Commit locally without pushing
    #[arg(long)]
    no_push: bool,

    /// Timeout in seconds for each git command
    #[arg(long, default_value_t = DEFAULT_GIT_TIMEOUT_SECS)]
    git_timeout: u64,

    /// Run the pipeline once and exit instead of watching
    #[arg(long)]
    once: bool,

    /// Dry run - print commit message and changelog without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        let diff_extensions = if self.diff_extensions.is_empty() {
            DEFAULT_DIFF_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            self.diff_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect()
        };

        let changelog = (!self.no_changelog).then(|| ChangelogSettings {
            path: self.changelog.clone(),
            diff_limit: self.diff_limit,
            diff_extensions,
        });

        PipelineConfig {
            header: self.header.clone(),
            changelog,
            push: !self.no_push,
            dry_run: self.dry_run,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Step 1: Check prerequisites
    check_git_installed().context("git is required")?;

    let workdir = discover_workdir(&cli.path).context(
        "Not a git repository. Run pbip-autopush from within a git working tree.",
    )?;

    let debounce = DebounceSettings::new(
        Duration::from_secs(cli.debounce),
        Duration::from_millis(cli.poll_interval),
    )
    .context("Invalid debounce settings")?;

    // Step 2: Build the pipeline
    let git = GitCli::new(&workdir).with_timeout(Duration::from_secs(cli.git_timeout));
    let pipeline = CommitPipeline::new(git, &workdir, cli.pipeline_config());

    if cli.once {
        pipeline
            .run_and_report()
            .await
            .context("One-shot pipeline run failed")?;
        return Ok(());
    }

    // Step 3: Subscribe to filesystem changes
    let state = Arc::new(WatcherState::new());
    let handle = start_watcher(&cli.path, state.clone())
        .context("Failed to start file watcher")?;

    println!(
        "Watching {} for PBIP changes (debounce {}s, Ctrl+C to stop)...",
        handle.root().display(),
        cli.debounce
    );
    info!(
        workdir = %workdir.display(),
        "Watcher started"
    );

    // Step 4: Debounce until interrupted
    run_debounce_loop(&state, &pipeline, debounce, shutdown_signal()).await;

    drop(handle);
    println!("Stopped watching.");
    Ok(())
}

/// Resolve on Ctrl+C. If the handler cannot be installed, never resolve.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
