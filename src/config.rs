//! Runtime configuration, derived from CLI flags.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Quiet period after the last event before the pipeline fires.
pub const DEFAULT_DEBOUNCE_SECS: u64 = 5;

/// How often the debounce loop wakes up to check the watcher state.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Changelog location, relative to the repository work directory.
pub const DEFAULT_CHANGELOG_PATH: &str = "CHANGELOG.md";

/// Maximum characters of diff text embedded per file.
pub const DEFAULT_DIFF_LIMIT: usize = 1000;

/// Extensions whose diffs are embedded in the changelog.
pub const DEFAULT_DIFF_EXTENSIONS: &[&str] = &["dax", "tmdl"];

/// First line of every generated commit message.
pub const DEFAULT_COMMIT_HEADER: &str = "PBIP auto update:";

/// Per-call timeout for git subprocesses.
pub const DEFAULT_GIT_TIMEOUT_SECS: u64 = 300;

/// Timing of the debounce loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceSettings {
    pub quiet_period: Duration,
    pub poll_interval: Duration,
}

impl DebounceSettings {
    /// Build settings, rejecting a zero poll interval (the loop would spin).
    pub fn new(quiet_period: Duration, poll_interval: Duration) -> Result<Self, ConfigError> {
        if poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(Self {
            quiet_period,
            poll_interval,
        })
    }
}

impl Default for DebounceSettings {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_secs(DEFAULT_DEBOUNCE_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// Where and how the changelog entry is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogSettings {
    pub path: PathBuf,
    pub diff_limit: usize,
    /// Extensions without the leading dot, matched case-insensitively.
    pub diff_extensions: Vec<String>,
}

impl Default for ChangelogSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CHANGELOG_PATH),
            diff_limit: DEFAULT_DIFF_LIMIT,
            diff_extensions: DEFAULT_DIFF_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Configuration for the commit pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub header: String,
    /// `None` disables the changelog step entirely.
    pub changelog: Option<ChangelogSettings>,
    pub push: bool,
    pub dry_run: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_COMMIT_HEADER.to_string(),
            changelog: Some(ChangelogSettings::default()),
            push: true,
            dry_run: false,
        }
    }
}
