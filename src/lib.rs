//! pbip-autopush - Watches a PBIP project and auto-commits debounced changes.
//!
//! # Overview
//!
//! A filesystem watcher marks changes as pending; a debounce loop waits for a
//! quiet period and then runs the commit pipeline, which classifies the
//! changed paths (measures, tables, relationships, visuals, other), appends a
//! changelog section with diff previews, and runs `git add`, `commit`, `push`.

pub mod changelog;
pub mod changes;
pub mod config;
pub mod error;
pub mod git;
pub mod pipeline;
pub mod watcher;

// Re-export commonly used types
pub use changes::{ChangeCategory, ChangeSummary};
pub use config::{ChangelogSettings, DebounceSettings, PipelineConfig};
pub use error::{ChangelogError, ConfigError, GitError, PipelineError, WatchError};
pub use pipeline::{CommitPipeline, PipelineOutcome};
pub use watcher::{ChangeEvent, Trigger, WatcherState};
